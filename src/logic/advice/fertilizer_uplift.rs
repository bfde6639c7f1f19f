use super::{AdvisoryContext, AdvisoryRule};

/// Fires when fertilizer spend is too thin to matter (bonus below 10%).
pub struct FertilizerUpliftRule;

impl AdvisoryRule for FertilizerUpliftRule {
    fn id(&self) -> &'static str {
        "fertilizer_uplift"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<String> {
        if ctx.fertilizer_bonus >= 0.1 {
            return None;
        }

        Some("Increase fertilizer budget to boost yield by up to 30%.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_on_bonus_below_ten_percent() {
        let rule = FertilizerUpliftRule;
        let mut ctx = crate::logic::advice::tests::context();

        ctx.fertilizer_bonus = 0.05;
        assert!(rule.evaluate(&ctx).is_some());

        ctx.fertilizer_bonus = 0.1;
        assert!(rule.evaluate(&ctx).is_none());
    }
}
