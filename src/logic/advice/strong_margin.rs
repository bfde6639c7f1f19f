use super::{AdvisoryContext, AdvisoryRule};

/// Fires when margins are strong enough to justify expansion (above 40%).
pub struct StrongMarginRule;

impl AdvisoryRule for StrongMarginRule {
    fn id(&self) -> &'static str {
        "strong_margin"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<String> {
        if ctx.profit_margin <= 40.0 {
            return None;
        }

        Some("Strong margins! Consider expanding acreage next season.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_on_margin_above_forty() {
        let rule = StrongMarginRule;
        let mut ctx = crate::logic::advice::tests::context();

        ctx.profit_margin = 40.0;
        assert!(rule.evaluate(&ctx).is_none());

        ctx.profit_margin = 40.1;
        assert!(rule.evaluate(&ctx).is_some());
    }
}
