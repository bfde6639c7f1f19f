use super::{AdvisoryContext, AdvisoryRule};

/// Closing crop/county monitoring tip. Always fires, always last.
pub struct MarketWatchRule;

impl AdvisoryRule for MarketWatchRule {
    fn id(&self) -> &'static str {
        "market_watch"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<String> {
        Some(format!(
            "{} performs well in {}. Monitor market prices weekly.",
            ctx.crop, ctx.county
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{County, Crop};

    #[test]
    fn names_crop_and_county() {
        let rule = MarketWatchRule;
        let mut ctx = crate::logic::advice::tests::context();
        ctx.crop = Crop::Tea;
        ctx.county = County::Kisii;

        let advice = rule.evaluate(&ctx).unwrap();
        assert_eq!(
            advice,
            "Tea performs well in Kisii. Monitor market prices weekly."
        );
    }
}
