use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::crop::{County, Crop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    pub const ALL: [Volatility; 3] = [Volatility::Low, Volatility::Medium, Volatility::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Volatility::Low => "Low",
            Volatility::Medium => "Medium",
            Volatility::High => "High",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Volatility::Low => Color::Green,
            Volatility::Medium => Color::Yellow,
            Volatility::High => Color::Red,
        }
    }
}

impl std::fmt::Display for Volatility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current market conditions for one crop in one county.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    pub crop: Crop,
    pub county: County,
    /// KES per ton.
    pub price_kes: i64,
    /// Percent change over the last 7 days, 1 decimal place.
    pub change_7d: f64,
    /// Percent change over the last 30 days, 1 decimal place.
    pub change_30d: f64,
    pub volatility: Volatility,
    /// County currently paying the most for this crop.
    pub top_buying_county: County,
}

/// One point of a daily price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price_kes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volatility_display() {
        assert_eq!(Volatility::Low.as_str(), "Low");
        assert_eq!(Volatility::High.to_string(), "High");
    }
}
