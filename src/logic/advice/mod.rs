pub mod fertilizer_uplift;
pub mod high_risk;
pub mod market_watch;
pub mod soil_amendment;
pub mod strong_margin;

use crate::models::{County, Crop, RiskLevel, SoilType};

use fertilizer_uplift::FertilizerUpliftRule;
use high_risk::HighRiskRule;
use market_watch::MarketWatchRule;
use soil_amendment::SoilAmendmentRule;
use strong_margin::StrongMarginRule;

/// Everything an advisory rule may look at: the request plus the
/// intermediate factors the estimator derived from it.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryContext {
    pub crop: Crop,
    pub county: County,
    pub soil_type: SoilType,
    pub soil_multiplier: f64,
    pub fertilizer_bonus: f64,
    pub profit_margin: f64,
    pub risk_level: RiskLevel,
}

/// One gated advisory for a farm projection.
pub trait AdvisoryRule: Send + Sync {
    fn id(&self) -> &'static str;

    /// Return the advisory text if the gate condition is met.
    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<String>;
}

/// Evaluates the advisory rules in a fixed order. The order of the rule
/// vector is the order of the resulting recommendations, so it is part of
/// the engine's contract.
pub struct AdviceEngine {
    rules: Vec<Box<dyn AdvisoryRule>>,
}

impl AdviceEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn AdvisoryRule>> = vec![
            Box::new(SoilAmendmentRule),
            Box::new(FertilizerUpliftRule),
            Box::new(HighRiskRule),
            Box::new(StrongMarginRule),
            Box::new(MarketWatchRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, ctx: &AdvisoryContext) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(ctx))
            .collect()
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

impl Default for AdviceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn context() -> AdvisoryContext {
        AdvisoryContext {
            crop: Crop::Maize,
            county: County::Nakuru,
            soil_type: SoilType::Loam,
            soil_multiplier: 1.15,
            fertilizer_bonus: 0.3,
            profit_margin: 25.0,
            risk_level: RiskLevel::Medium,
        }
    }

    #[test]
    fn rule_order_is_fixed() {
        let engine = AdviceEngine::new();
        assert_eq!(
            engine.rule_ids(),
            vec![
                "soil_amendment",
                "fertilizer_uplift",
                "high_risk",
                "strong_margin",
                "market_watch",
            ]
        );
    }

    #[test]
    fn closing_tip_always_present() {
        let engine = AdviceEngine::new();
        let recs = engine.evaluate(&context());
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Monitor market prices weekly"));
    }

    #[test]
    fn all_gates_open() {
        let engine = AdviceEngine::new();
        let ctx = AdvisoryContext {
            soil_type: SoilType::Sandy,
            soil_multiplier: 0.75,
            fertilizer_bonus: 0.05,
            profit_margin: 5.0,
            risk_level: RiskLevel::High,
            ..context()
        };
        // strong_margin stays closed: a high-risk margin cannot exceed 40
        let recs = engine.evaluate(&ctx);
        assert_eq!(recs.len(), 4);
    }
}
