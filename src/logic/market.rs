use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;

use crate::models::{Crop, MarketQuote, PricePoint, ReferenceTables, Volatility};

/// The dashboard tracks the first six crops across the first five counties.
const SNAPSHOT_CROPS: usize = 6;
const SNAPSHOT_COUNTIES: usize = 5;
/// Daily points going back 12 months.
const TREND_DAYS: i64 = 365;

/// Simulated spot quotes for the market dashboard.
///
/// Prices jitter up to 7.5% around the reference price; weekly and monthly
/// changes are drawn with a slight upward bias. The RNG is injected so
/// callers control determinism.
pub fn market_snapshot(tables: &ReferenceTables, rng: &mut impl Rng) -> Vec<MarketQuote> {
    let crops = &Crop::ALL[..SNAPSHOT_CROPS];
    let counties = &crate::models::County::ALL[..SNAPSHOT_COUNTIES];

    let mut quotes = Vec::with_capacity(crops.len() * counties.len());
    for &crop in crops {
        let base = tables.crop(crop).market_price_kes as f64;
        for &county in counties {
            let jitter = (rng.gen::<f64>() - 0.5) * base * 0.15;
            quotes.push(MarketQuote {
                crop,
                county,
                price_kes: (base + jitter.round()) as i64,
                change_7d: round1((rng.gen::<f64>() - 0.4) * 8.0),
                change_30d: round1((rng.gen::<f64>() - 0.3) * 15.0),
                volatility: Volatility::ALL[rng.gen_range(0..Volatility::ALL.len())],
                top_buying_county: counties[rng.gen_range(0..counties.len())],
            });
        }
    }
    quotes
}

/// Simulated daily price series for one crop: seasonal swing (post-harvest
/// scarcity peaks early in the year), random-walk noise and a slight
/// uptrend.
pub fn price_trend(
    crop: Crop,
    tables: &ReferenceTables,
    today: NaiveDate,
    rng: &mut impl Rng,
) -> Vec<PricePoint> {
    let base = tables.crop(crop).market_price_kes as f64;

    (0..TREND_DAYS)
        .map(|i| {
            let date = today - Duration::days(TREND_DAYS - 1 - i);
            let seasonal =
                ((date.month0() as f64 - 1.0) * std::f64::consts::PI / 6.0).sin() * 0.08;
            let noise = (rng.gen::<f64>() - 0.48) * base * 0.03;
            let trend = i as f64 * base * 0.0001;
            PricePoint {
                date,
                price_kes: (base * (1.0 + seasonal) + noise + trend).round() as i64,
            }
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn snapshot_covers_six_crops_in_five_counties() {
        let tables = ReferenceTables::default();
        let mut rng = StdRng::seed_from_u64(42);
        let quotes = market_snapshot(&tables, &mut rng);

        assert_eq!(quotes.len(), 30);
        assert!(quotes.iter().any(|q| q.crop == Crop::Maize));
        assert!(quotes.iter().any(|q| q.crop == Crop::Tea));
        // Coffee is crop #7 and outside the tracked set
        assert!(!quotes.iter().any(|q| q.crop == Crop::Coffee));
    }

    #[test]
    fn snapshot_prices_stay_within_jitter_band() {
        let tables = ReferenceTables::default();
        let mut rng = StdRng::seed_from_u64(7);

        for quote in market_snapshot(&tables, &mut rng) {
            let base = tables.crop(quote.crop).market_price_kes as f64;
            let price = quote.price_kes as f64;
            assert!(
                (base * 0.925 - 1.0..=base * 1.075 + 1.0).contains(&price),
                "{:?} price {} outside band around {}",
                quote.crop,
                price,
                base
            );
            assert!((-3.3..=4.9).contains(&quote.change_7d));
            assert!((-4.6..=10.6).contains(&quote.change_30d));
        }
    }

    #[test]
    fn snapshot_is_deterministic_for_a_seed() {
        let tables = ReferenceTables::default();
        let a = market_snapshot(&tables, &mut StdRng::seed_from_u64(99));
        let b = market_snapshot(&tables, &mut StdRng::seed_from_u64(99));
        for (qa, qb) in a.iter().zip(&b) {
            assert_eq!(qa.price_kes, qb.price_kes);
            assert_eq!(qa.change_7d, qb.change_7d);
        }
    }

    #[test]
    fn trend_spans_a_year_ending_today() {
        let tables = ReferenceTables::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let trend = price_trend(Crop::Maize, &tables, today, &mut rng);

        assert_eq!(trend.len(), 365);
        assert_eq!(trend.last().unwrap().date, today);
        assert_eq!(
            trend.first().unwrap().date,
            today - Duration::days(364)
        );
        // Consecutive days
        for pair in trend.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
        assert!(trend.iter().all(|p| p.price_kes > 0));
    }

    #[test]
    fn trend_prices_stay_near_base() {
        let tables = ReferenceTables::default();
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let base = tables.crop(Crop::Wheat).market_price_kes as f64;

        for point in price_trend(Crop::Wheat, &tables, today, &mut rng) {
            // seasonal ±8%, noise ±3%, uptrend up to ~3.6%
            let price = point.price_kes as f64;
            assert!(price > base * 0.85 && price < base * 1.20);
        }
    }
}
