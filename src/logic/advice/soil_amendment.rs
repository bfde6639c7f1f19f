use super::{AdvisoryContext, AdvisoryRule};

/// Fires when the soil category drags yield down (multiplier below 0.9).
pub struct SoilAmendmentRule;

impl AdvisoryRule for SoilAmendmentRule {
    fn id(&self) -> &'static str {
        "soil_amendment"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<String> {
        if ctx.soil_multiplier >= 0.9 {
            return None;
        }

        Some(format!(
            "Consider soil amendment - {} soil reduces yield. Add organic matter.",
            ctx.soil_type
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SoilType;

    #[test]
    fn gated_on_multiplier_below_point_nine() {
        let rule = SoilAmendmentRule;
        let mut ctx = crate::logic::advice::tests::context();

        ctx.soil_type = SoilType::Clay;
        ctx.soil_multiplier = 0.85;
        let advice = rule.evaluate(&ctx).unwrap();
        assert!(advice.contains("Clay soil reduces yield"));

        ctx.soil_multiplier = 0.9;
        assert!(rule.evaluate(&ctx).is_none());
    }
}
