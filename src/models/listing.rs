use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::crop::{County, Crop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingType {
    /// Supply side: a farmer offering produce at an asking price.
    Farmer,
    /// Demand side: a buyer looking for produce at an offer price.
    Buyer,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Farmer => "Farmer",
            ListingType::Buyer => "Buyer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "farmer" | "seller" => Some(ListingType::Farmer),
            "buyer" => Some(ListingType::Buyer),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            ListingType::Farmer => ListingType::Buyer,
            ListingType::Buyer => ListingType::Farmer,
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            ListingType::Farmer => Color::Green,
            ListingType::Buyer => Color::Cyan,
        }
    }
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One marketplace entry. A set of listings is unordered for scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Option<i64>,
    pub listing_type: ListingType,
    pub name: String,
    pub phone: String,
    pub crop: Crop,
    pub county: County,
    pub quantity_tons: f64,
    /// KES per ton: asking price for farmers, offer price for buyers.
    pub price_kes: i64,
    pub available_from: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(
        listing_type: ListingType,
        name: impl Into<String>,
        crop: Crop,
        county: County,
        quantity_tons: f64,
        price_kes: i64,
    ) -> Self {
        Self {
            id: None,
            listing_type,
            name: name.into(),
            phone: String::new(),
            crop,
            county,
            quantity_tons,
            price_kes,
            available_from: Utc::now().date_naive(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_available_from(mut self, date: NaiveDate) -> Self {
        self.available_from = date;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_type_from_str() {
        assert_eq!(ListingType::from_str("farmer"), Some(ListingType::Farmer));
        assert_eq!(ListingType::from_str("Buyer"), Some(ListingType::Buyer));
        assert_eq!(ListingType::from_str("broker"), None);
    }

    #[test]
    fn listing_type_opposite() {
        assert_eq!(ListingType::Farmer.opposite(), ListingType::Buyer);
        assert_eq!(ListingType::Buyer.opposite(), ListingType::Farmer);
    }

    #[test]
    fn listing_builder() {
        let listing = Listing::new(
            ListingType::Farmer,
            "John Kamau",
            Crop::Maize,
            County::Nakuru,
            12.0,
            33_000,
        )
        .with_phone("0712345678")
        .with_description("Fresh maize from Nakuru county.");

        assert_eq!(listing.listing_type, ListingType::Farmer);
        assert_eq!(listing.price_kes, 33_000);
        assert_eq!(listing.phone, "0712345678");
        assert!(listing.id.is_none());
    }
}
