use super::{AdvisoryContext, AdvisoryRule};
use crate::models::RiskLevel;

/// Fires when the projection lands in the High risk tier.
pub struct HighRiskRule;

impl AdvisoryRule for HighRiskRule {
    fn id(&self) -> &'static str {
        "high_risk"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<String> {
        if ctx.risk_level != RiskLevel::High {
            return None;
        }

        Some("High risk detected. Consider diversifying crops or reducing farm size.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fires_on_high_risk() {
        let rule = HighRiskRule;
        let mut ctx = crate::logic::advice::tests::context();

        ctx.risk_level = RiskLevel::High;
        assert!(rule.evaluate(&ctx).is_some());

        ctx.risk_level = RiskLevel::Medium;
        assert!(rule.evaluate(&ctx).is_none());

        ctx.risk_level = RiskLevel::Low;
        assert!(rule.evaluate(&ctx).is_none());
    }
}
