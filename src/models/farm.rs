use serde::{Deserialize, Serialize};

use super::crop::{County, Crop, SoilType};

/// Persisted default farm, used to pre-fill the planner and drive the
/// dashboard's quick projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmProfile {
    pub id: Option<i64>,
    pub name: String,
    pub county: County,
    pub crop: Crop,
    pub soil_type: SoilType,
    pub farm_size_acres: f64,
    pub fertilizer_budget_kes: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl FarmProfile {
    pub fn new(name: String, county: County, crop: Crop) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: None,
            name,
            county,
            crop,
            soil_type: SoilType::Loam,
            farm_size_acres: 5.0,
            fertilizer_budget_kes: 20_000.0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for FarmProfile {
    fn default() -> Self {
        Self::new("My Farm".to_string(), County::Nakuru, Crop::Maize)
    }
}

/// One projection request. Created fresh per calculation; no identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmInput {
    pub crop: Crop,
    pub county: County,
    /// Must be > 0; the estimator does not guard against division by zero.
    pub farm_size_acres: f64,
    pub soil_type: SoilType,
    pub fertilizer_budget_kes: f64,
    /// Expected annual rainfall in mm. Defaults to a mild yield penalty
    /// when absent.
    pub expected_rainfall_mm: Option<f64>,
}

impl FarmInput {
    pub fn from_profile(profile: &FarmProfile) -> Self {
        Self {
            crop: profile.crop,
            county: profile.county,
            farm_size_acres: profile.farm_size_acres,
            soil_type: profile.soil_type,
            fertilizer_budget_kes: profile.fertilizer_budget_kes,
            expected_rainfall_mm: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Risk tier is a pure function of profit margin (percent).
    pub fn from_margin(margin_percent: f64) -> Self {
        if margin_percent < 15.0 {
            RiskLevel::High
        } else if margin_percent < 30.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            RiskLevel::Low => Color::Green,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::High => Color::Red,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the yield/profit estimator. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmAnalysis {
    /// Total estimated yield in tons, 2 decimal places.
    pub estimated_yield_tons: f64,
    /// KES, whole units.
    pub estimated_revenue_kes: i64,
    pub estimated_cost_kes: i64,
    pub projected_profit_kes: i64,
    /// Acreage at which revenue covers cost, 2 decimal places.
    pub break_even_acres: f64,
    pub risk_level: RiskLevel,
    /// Percent, 1 decimal place. Exactly 0 when revenue is 0.
    pub profit_margin: f64,
    /// Advisory strings in a fixed, significant order.
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_margin_boundaries() {
        assert_eq!(RiskLevel::from_margin(14.9), RiskLevel::High);
        assert_eq!(RiskLevel::from_margin(15.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_margin(29.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_margin(30.0), RiskLevel::Low);
    }

    #[test]
    fn risk_level_extremes() {
        assert_eq!(RiskLevel::from_margin(-250.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_margin(0.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_margin(100.0), RiskLevel::Low);
    }

    #[test]
    fn input_from_profile_leaves_rainfall_unset() {
        let profile = FarmProfile::default();
        let input = FarmInput::from_profile(&profile);
        assert_eq!(input.crop, profile.crop);
        assert_eq!(input.county, profile.county);
        assert_eq!(input.farm_size_acres, profile.farm_size_acres);
        assert!(input.expected_rainfall_mm.is_none());
    }
}
