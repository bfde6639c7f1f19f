use crate::models::Listing;

/// Base score for a candidate trading the same crop.
const SAME_CROP_SCORE: u32 = 50;
/// Awarded when the counterparty is in the same county.
const SAME_COUNTY_SCORE: u32 = 30;
/// Maximum score contribution from price proximity.
const PRICE_SCORE: f64 = 20.0;

/// Compatibility of a listing with its best opposite-type counterpart,
/// 0..=100.
///
/// Greedy best-of-N: every listing is scored against its single best
/// counterpart, so the same candidate may be the best match for several
/// listings at once. Candidates of the same type or a different crop do
/// not participate; with no eligible candidate the score is 0.
pub fn match_score(listing: &Listing, candidates: &[Listing]) -> u8 {
    candidates
        .iter()
        .filter(|c| c.listing_type != listing.listing_type && c.crop == listing.crop)
        .map(|c| candidate_score(listing, c))
        .max()
        .unwrap_or(0)
}

fn candidate_score(listing: &Listing, candidate: &Listing) -> u8 {
    let mut score = SAME_CROP_SCORE;
    if candidate.county == listing.county {
        score += SAME_COUNTY_SCORE;
    }
    score += price_proximity_score(listing.price_kes, candidate.price_kes);
    score.min(100) as u8
}

/// 0..=20 depending on how close the two prices are: identical prices earn
/// the full 20, a price gap equal to the larger price earns 0.
fn price_proximity_score(a_kes: i64, b_kes: i64) -> u32 {
    let max = a_kes.max(b_kes);
    // Two non-positive prices count as identical
    let relative_diff = if max > 0 {
        (a_kes - b_kes).abs() as f64 / max as f64
    } else {
        0.0
    };
    (PRICE_SCORE * (1.0 - relative_diff)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{County, Crop, ListingType};

    fn farmer(crop: Crop, county: County, price: i64) -> Listing {
        Listing::new(ListingType::Farmer, "Seller", crop, county, 10.0, price)
    }

    fn buyer(crop: Crop, county: County, price: i64) -> Listing {
        Listing::new(ListingType::Buyer, "Buyer", crop, county, 10.0, price)
    }

    #[test]
    fn close_prices_same_county_score_99() {
        let listing = farmer(Crop::Maize, County::Nakuru, 35_000);
        let candidates = vec![buyer(Crop::Maize, County::Nakuru, 36_000)];
        // 50 + 30 + round(20 * (1 - 1000/36000)) = 99
        assert_eq!(match_score(&listing, &candidates), 99);
    }

    #[test]
    fn no_eligible_candidates_scores_zero() {
        let listing = farmer(Crop::Maize, County::Nakuru, 35_000);

        // Same type, same crop: not eligible
        let same_type = vec![farmer(Crop::Maize, County::Nakuru, 35_000)];
        assert_eq!(match_score(&listing, &same_type), 0);

        // Opposite type, different crop: not eligible
        let other_crop = vec![buyer(Crop::Beans, County::Nakuru, 35_000)];
        assert_eq!(match_score(&listing, &other_crop), 0);

        assert_eq!(match_score(&listing, &[]), 0);
    }

    #[test]
    fn identical_listing_caps_at_100() {
        let listing = farmer(Crop::Wheat, County::Kiambu, 45_000);
        let candidates = vec![buyer(Crop::Wheat, County::Kiambu, 45_000)];
        // 50 + 30 + 20 clamps exactly at the ceiling
        assert_eq!(match_score(&listing, &candidates), 100);
    }

    #[test]
    fn best_candidate_wins_not_average() {
        let listing = farmer(Crop::Maize, County::Nakuru, 35_000);
        let candidates = vec![
            buyer(Crop::Maize, County::Embu, 70_000),   // 50 + 10 = 60
            buyer(Crop::Maize, County::Nakuru, 36_000), // 99
            buyer(Crop::Maize, County::Kisii, 35_000),  // 50 + 20 = 70
        ];
        assert_eq!(match_score(&listing, &candidates), 99);
    }

    #[test]
    fn score_is_symmetric_for_a_pair() {
        let a = farmer(Crop::Rice, County::Meru, 90_000);
        let b = buyer(Crop::Rice, County::Nyeri, 95_000);
        assert_eq!(
            match_score(&a, std::slice::from_ref(&b)),
            match_score(&b, std::slice::from_ref(&a))
        );
    }

    #[test]
    fn distant_prices_still_score_county_and_crop() {
        let listing = farmer(Crop::Tea, County::Kisii, 1);
        let candidates = vec![buyer(Crop::Tea, County::Kisii, 1_000_000)];
        // Price component rounds to 0, crop + county remain
        assert_eq!(match_score(&listing, &candidates), 80);
    }

    #[test]
    fn zero_prices_treated_as_identical() {
        let listing = farmer(Crop::Onions, County::Narok, 0);
        let candidates = vec![buyer(Crop::Onions, County::Narok, 0)];
        assert_eq!(match_score(&listing, &candidates), 100);
    }
}
