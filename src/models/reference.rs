use super::crop::{Crop, SoilType};

/// Per-crop economic constants under default growing conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropEconomics {
    /// Average yield in tons per acre.
    pub base_yield_tons: f64,
    /// Market price in KES per ton.
    pub market_price_kes: i64,
    /// Production cost in KES per acre.
    pub base_cost_kes: i64,
}

/// Immutable reference data for the projection calculations.
///
/// The tables are passed into the calculation functions rather than read
/// from module-level state, so tests can substitute their own numbers.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    crops: [CropEconomics; Crop::ALL.len()],
    soil_multipliers: [f64; SoilType::ALL.len()],
}

impl ReferenceTables {
    pub fn crop(&self, crop: Crop) -> CropEconomics {
        self.crops[crop.index()]
    }

    /// Yield adjustment factor for a soil category (0.75..=1.15).
    pub fn soil_multiplier(&self, soil: SoilType) -> f64 {
        self.soil_multipliers[soil.index()]
    }

    pub fn with_crop(mut self, crop: Crop, econ: CropEconomics) -> Self {
        self.crops[crop.index()] = econ;
        self
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        let econ = |base_yield_tons, market_price_kes, base_cost_kes| CropEconomics {
            base_yield_tons,
            market_price_kes,
            base_cost_kes,
        };

        // Order follows Crop::ALL / SoilType::ALL.
        Self {
            crops: [
                econ(1.8, 35_000, 25_000),  // Maize
                econ(0.6, 80_000, 18_000),  // Beans
                econ(1.2, 45_000, 30_000),  // Wheat
                econ(2.5, 90_000, 45_000),  // Rice
                econ(1.0, 30_000, 15_000),  // Sorghum
                econ(2.2, 250_000, 60_000), // Tea
                econ(0.8, 400_000, 55_000), // Coffee
                econ(8.0, 25_000, 40_000),  // Potatoes
                econ(12.0, 40_000, 50_000), // Tomatoes
                econ(10.0, 35_000, 35_000), // Onions
            ],
            soil_multipliers: [1.15, 0.85, 0.75, 1.0, 1.05, 0.95],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_lookup_matches_reference_data() {
        let tables = ReferenceTables::default();

        let maize = tables.crop(Crop::Maize);
        assert_eq!(maize.base_yield_tons, 1.8);
        assert_eq!(maize.market_price_kes, 35_000);
        assert_eq!(maize.base_cost_kes, 25_000);

        let coffee = tables.crop(Crop::Coffee);
        assert_eq!(coffee.market_price_kes, 400_000);
    }

    #[test]
    fn soil_multipliers_within_observed_range() {
        let tables = ReferenceTables::default();
        for soil in SoilType::ALL {
            let m = tables.soil_multiplier(soil);
            assert!((0.75..=1.15).contains(&m), "{:?} multiplier {}", soil, m);
        }
        assert_eq!(tables.soil_multiplier(SoilType::Loam), 1.15);
        assert_eq!(tables.soil_multiplier(SoilType::Sandy), 0.75);
    }

    #[test]
    fn with_crop_overrides_one_entry() {
        let tables = ReferenceTables::default().with_crop(
            Crop::Maize,
            CropEconomics {
                base_yield_tons: 2.0,
                market_price_kes: 40_000,
                base_cost_kes: 20_000,
            },
        );
        assert_eq!(tables.crop(Crop::Maize).base_yield_tons, 2.0);
        // Others untouched
        assert_eq!(tables.crop(Crop::Beans).base_yield_tons, 0.6);
    }
}
