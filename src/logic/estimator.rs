use crate::logic::advice::{AdviceEngine, AdvisoryContext};
use crate::models::{FarmAnalysis, FarmInput, ReferenceTables, RiskLevel};

/// Reference fertilizer spend in KES per acre for a full yield response.
const FERTILIZER_REFERENCE_KES_PER_ACRE: f64 = 5_000.0;
/// Yield uplift from fertilizer is capped at 30%.
const FERTILIZER_BONUS_CAP: f64 = 0.3;
/// Annual rainfall in mm treated as a full water supply.
const REFERENCE_RAINFALL_MM: f64 = 800.0;
/// Rainfall above the reference helps at most 20%.
const RAINFALL_FACTOR_CAP: f64 = 1.2;
/// Mild yield penalty applied when rainfall is unknown.
const UNKNOWN_RAINFALL_FACTOR: f64 = 0.9;

/// Project yield, revenue, cost, profit and risk for one farm season.
///
/// Pure and deterministic: the same input and tables always produce the
/// same analysis. Precondition: `input.farm_size_acres > 0` - a zero or
/// negative size produces non-finite output rather than an error, and
/// callers are expected to validate before invoking.
pub fn estimate(input: &FarmInput, tables: &ReferenceTables) -> FarmAnalysis {
    let econ = tables.crop(input.crop);
    let soil_multiplier = tables.soil_multiplier(input.soil_type);
    let fert_bonus = fertilizer_bonus(input.fertilizer_budget_kes, input.farm_size_acres);
    let rain_factor = rainfall_factor(input.expected_rainfall_mm);

    let yield_per_acre =
        econ.base_yield_tons * soil_multiplier * (1.0 + fert_bonus) * rain_factor;
    let estimated_yield_tons = round2(yield_per_acre * input.farm_size_acres);

    let estimated_revenue_kes =
        (estimated_yield_tons * econ.market_price_kes as f64).round() as i64;
    let estimated_cost_kes = (econ.base_cost_kes as f64 * input.farm_size_acres
        + input.fertilizer_budget_kes)
        .round() as i64;
    let projected_profit_kes = estimated_revenue_kes - estimated_cost_kes;

    let profit_margin = if estimated_revenue_kes > 0 {
        round1(projected_profit_kes as f64 / estimated_revenue_kes as f64 * 100.0)
    } else {
        0.0
    };

    // Acreage needed for revenue to cover the total cost.
    let break_even_acres = if estimated_revenue_kes > 0 {
        let revenue_per_acre = estimated_revenue_kes as f64 / input.farm_size_acres;
        round2(estimated_cost_kes as f64 / revenue_per_acre)
    } else {
        0.0
    };

    let risk_level = RiskLevel::from_margin(profit_margin);

    let ctx = AdvisoryContext {
        crop: input.crop,
        county: input.county,
        soil_type: input.soil_type,
        soil_multiplier,
        fertilizer_bonus: fert_bonus,
        profit_margin,
        risk_level,
    };
    let recommendations = AdviceEngine::new().evaluate(&ctx);

    FarmAnalysis {
        estimated_yield_tons,
        estimated_revenue_kes,
        estimated_cost_kes,
        projected_profit_kes,
        break_even_acres,
        risk_level,
        profit_margin,
        recommendations,
    }
}

/// Yield uplift fraction from fertilizer spend intensity, capped at 0.3.
pub fn fertilizer_bonus(budget_kes: f64, farm_size_acres: f64) -> f64 {
    (budget_kes / (farm_size_acres * FERTILIZER_REFERENCE_KES_PER_ACRE)).min(FERTILIZER_BONUS_CAP)
}

/// Yield adjustment from expected annual rainfall relative to the 800mm
/// reference, capped at 1.2. Unknown rainfall costs 10%.
pub fn rainfall_factor(expected_rainfall_mm: Option<f64>) -> f64 {
    match expected_rainfall_mm {
        Some(mm) => (mm / REFERENCE_RAINFALL_MM).min(RAINFALL_FACTOR_CAP),
        None => UNKNOWN_RAINFALL_FACTOR,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{County, Crop, SoilType};

    fn maize_input() -> FarmInput {
        FarmInput {
            crop: Crop::Maize,
            county: County::Nakuru,
            farm_size_acres: 5.0,
            soil_type: SoilType::Loam,
            fertilizer_budget_kes: 20_000.0,
            expected_rainfall_mm: Some(800.0),
        }
    }

    #[test]
    fn maize_nakuru_worked_example() {
        let tables = ReferenceTables::default();
        let analysis = estimate(&maize_input(), &tables);

        // 1.8 * 1.15 * (1 + 0.3) * 1.0 = 2.691 t/acre over 5 acres
        assert_eq!(analysis.estimated_yield_tons, 13.46);
        assert_eq!(analysis.estimated_revenue_kes, 471_100);
        assert_eq!(analysis.estimated_cost_kes, 145_000);
        assert_eq!(analysis.projected_profit_kes, 326_100);
        assert_eq!(analysis.profit_margin, 69.2);
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        // 145_000 / (471_100 / 5)
        assert_eq!(analysis.break_even_acres, 1.54);
    }

    #[test]
    fn fertilizer_bonus_caps_at_30_percent() {
        assert_eq!(fertilizer_bonus(20_000.0, 5.0), 0.3);
        assert_eq!(fertilizer_bonus(1_000_000.0, 5.0), 0.3);
        assert!((fertilizer_bonus(5_000.0, 5.0) - 0.2).abs() < 1e-12);
        assert_eq!(fertilizer_bonus(0.0, 5.0), 0.0);
    }

    #[test]
    fn rainfall_factor_caps_and_defaults() {
        assert_eq!(rainfall_factor(Some(800.0)), 1.0);
        assert_eq!(rainfall_factor(Some(2_000.0)), 1.2);
        assert_eq!(rainfall_factor(Some(400.0)), 0.5);
        assert_eq!(rainfall_factor(None), 0.9);
    }

    #[test]
    fn outputs_are_non_negative_for_valid_inputs() {
        let tables = ReferenceTables::default();
        for crop in Crop::ALL {
            for soil in SoilType::ALL {
                let input = FarmInput {
                    crop,
                    county: County::Meru,
                    farm_size_acres: 2.5,
                    soil_type: soil,
                    fertilizer_budget_kes: 7_500.0,
                    expected_rainfall_mm: None,
                };
                let analysis = estimate(&input, &tables);
                assert!(analysis.estimated_yield_tons >= 0.0);
                assert!(analysis.estimated_cost_kes >= 0);
                assert!(analysis.estimated_revenue_kes >= 0);
                assert!(analysis.profit_margin <= 100.0);
            }
        }
    }

    #[test]
    fn more_fertilizer_never_lowers_yield() {
        let tables = ReferenceTables::default();
        let mut previous = 0.0;
        // Steps stay below the 25_000 KES cap for 5 acres
        for budget in [0.0, 2_000.0, 8_000.0, 14_000.0, 20_000.0, 24_000.0] {
            let input = FarmInput {
                fertilizer_budget_kes: budget,
                ..maize_input()
            };
            let analysis = estimate(&input, &tables);
            assert!(
                analysis.estimated_yield_tons >= previous,
                "yield fell from {} to {} at budget {}",
                previous,
                analysis.estimated_yield_tons,
                budget
            );
            previous = analysis.estimated_yield_tons;
        }
    }

    #[test]
    fn margin_is_exactly_zero_without_revenue() {
        // A zero-yield crop economy produces zero revenue
        let tables = ReferenceTables::default().with_crop(
            Crop::Maize,
            crate::models::CropEconomics {
                base_yield_tons: 0.0,
                market_price_kes: 35_000,
                base_cost_kes: 25_000,
            },
        );
        let analysis = estimate(&maize_input(), &tables);
        assert_eq!(analysis.estimated_revenue_kes, 0);
        assert_eq!(analysis.profit_margin, 0.0);
        assert_eq!(analysis.break_even_acres, 0.0);
        assert_eq!(analysis.risk_level, RiskLevel::High);
    }

    #[test]
    fn recommendations_are_deterministic() {
        let tables = ReferenceTables::default();
        let first = estimate(&maize_input(), &tables);
        for _ in 0..3 {
            let again = estimate(&maize_input(), &tables);
            assert_eq!(first.recommendations, again.recommendations);
        }
    }

    #[test]
    fn recommendation_order_matches_gating_sequence() {
        let tables = ReferenceTables::default();
        // Sandy soil (0.75), no fertilizer, tiny margin: soil, fertilizer
        // and risk advisories fire in that order, then the closing tip.
        let input = FarmInput {
            crop: Crop::Potatoes,
            county: County::Nyandarua,
            farm_size_acres: 5.0,
            soil_type: SoilType::Sandy,
            fertilizer_budget_kes: 0.0,
            expected_rainfall_mm: Some(200.0),
        };
        let analysis = estimate(&input, &tables);
        assert_eq!(analysis.risk_level, RiskLevel::High);

        let recs = &analysis.recommendations;
        assert_eq!(recs.len(), 4);
        assert!(recs[0].contains("soil amendment"));
        assert!(recs[1].contains("fertilizer budget"));
        assert!(recs[2].contains("High risk"));
        assert!(recs[3].contains("Monitor market prices"));
    }

    #[test]
    fn strong_margin_advisory_fires_above_40_percent() {
        let tables = ReferenceTables::default();
        let analysis = estimate(&maize_input(), &tables);
        assert!(analysis.profit_margin > 40.0);
        // Loam + capped fertilizer: no soil or fertilizer advisories
        assert_eq!(analysis.recommendations.len(), 2);
        assert!(analysis.recommendations[0].contains("Strong margins"));
        assert!(analysis.recommendations[1].contains("Maize performs well in Nakuru"));
    }
}
