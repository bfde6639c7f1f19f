use crate::db::Database;
use crate::error::{FarmWiseError, Result};
use crate::models::{County, Crop, FarmProfile, Listing, ListingType, SoilType};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};
use tracing::warn;

// Farm Profile Queries

impl Database {
    pub fn create_farm_profile(&self, profile: &FarmProfile) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO farm_profiles
                    (name, county, crop, soil_type, farm_size_acres, fertilizer_budget_kes, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    profile.name,
                    format!("{:?}", profile.county),
                    format!("{:?}", profile.crop),
                    format!("{:?}", profile.soil_type),
                    profile.farm_size_acres,
                    profile.fertilizer_budget_kes,
                    profile.created_at.to_rfc3339(),
                    profile.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_default_farm_profile(&self) -> Result<Option<FarmProfile>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM farm_profiles ORDER BY id LIMIT 1",
                [],
                row_to_farm_profile,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn update_farm_profile(&self, profile: &FarmProfile) -> Result<()> {
        let id = profile
            .id
            .ok_or_else(|| FarmWiseError::InvalidData("Profile has no ID".into()))?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                UPDATE farm_profiles SET
                    name = ?1, county = ?2, crop = ?3, soil_type = ?4,
                    farm_size_acres = ?5, fertilizer_budget_kes = ?6, updated_at = ?7
                WHERE id = ?8
                "#,
                params![
                    profile.name,
                    format!("{:?}", profile.county),
                    format!("{:?}", profile.crop),
                    format!("{:?}", profile.soil_type),
                    profile.farm_size_acres,
                    profile.fertilizer_budget_kes,
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )?;
            Ok(())
        })
    }
}

fn row_to_farm_profile(row: &Row) -> rusqlite::Result<FarmProfile> {
    let county_str: String = row.get("county")?;
    let crop_str: String = row.get("crop")?;
    let soil_str: String = row.get("soil_type")?;
    let created_at_str: String = row.get("created_at")?;
    let updated_at_str: String = row.get("updated_at")?;

    let county = County::from_str(&county_str).unwrap_or_else(|| {
        warn!(county = %county_str, "Unknown county in database, defaulting to Nakuru");
        County::Nakuru
    });
    let crop = Crop::from_str(&crop_str).unwrap_or_else(|| {
        warn!(crop = %crop_str, "Unknown crop in database, defaulting to Maize");
        Crop::Maize
    });
    let soil_type = SoilType::from_str(&soil_str).unwrap_or_else(|| {
        warn!(soil_type = %soil_str, "Unknown soil_type in database, defaulting to Loam");
        SoilType::Loam
    });

    Ok(FarmProfile {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        county,
        crop,
        soil_type,
        farm_size_acres: row.get("farm_size_acres")?,
        fertilizer_budget_kes: row.get("fertilizer_budget_kes")?,
        created_at: parse_timestamp(&created_at_str),
        updated_at: parse_timestamp(&updated_at_str),
    })
}

// Listing Queries

impl Database {
    pub fn create_listing(&self, listing: &Listing) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO listings
                    (listing_type, name, phone, crop, county, quantity_tons,
                     price_kes, available_from, description, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    format!("{:?}", listing.listing_type),
                    listing.name,
                    listing.phone,
                    format!("{:?}", listing.crop),
                    format!("{:?}", listing.county),
                    listing.quantity_tons,
                    listing.price_kes,
                    listing.available_from.format("%Y-%m-%d").to_string(),
                    listing.description,
                    listing.created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All listings, newest first.
    pub fn get_listings(&self) -> Result<Vec<Listing>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT * FROM listings ORDER BY created_at DESC, id DESC")?;
            let listings = stmt
                .query_map([], row_to_listing)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(listings)
        })
    }

    pub fn delete_listing(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM listings WHERE id = ?1", [id])?;
            Ok(())
        })
    }

    pub fn count_listings(&self) -> Result<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))
                .map_err(Into::into)
        })
    }

    /// Insert the canonical starter listings when the board is empty, so a
    /// fresh install has something to match against.
    pub fn seed_listings_if_empty(&self) -> Result<usize> {
        if self.count_listings()? > 0 {
            return Ok(0);
        }

        let seeds = seed_listings();
        let count = seeds.len();
        for listing in &seeds {
            self.create_listing(listing)?;
        }
        tracing::info!("Seeded {} marketplace listings", count);
        Ok(count)
    }
}

fn row_to_listing(row: &Row) -> rusqlite::Result<Listing> {
    let type_str: String = row.get("listing_type")?;
    let crop_str: String = row.get("crop")?;
    let county_str: String = row.get("county")?;
    let available_str: String = row.get("available_from")?;
    let created_at_str: String = row.get("created_at")?;

    let listing_type = ListingType::from_str(&type_str).unwrap_or_else(|| {
        warn!(listing_type = %type_str, "Unknown listing_type in database, defaulting to Farmer");
        ListingType::Farmer
    });
    let crop = Crop::from_str(&crop_str).unwrap_or_else(|| {
        warn!(crop = %crop_str, "Unknown crop in database, defaulting to Maize");
        Crop::Maize
    });
    let county = County::from_str(&county_str).unwrap_or_else(|| {
        warn!(county = %county_str, "Unknown county in database, defaulting to Nakuru");
        County::Nakuru
    });

    Ok(Listing {
        id: Some(row.get("id")?),
        listing_type,
        name: row.get("name")?,
        phone: row.get("phone")?,
        crop,
        county,
        quantity_tons: row.get("quantity_tons")?,
        price_kes: row.get("price_kes")?,
        available_from: NaiveDate::parse_from_str(&available_str, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Local::now().date_naive()),
        description: row.get("description")?,
        created_at: parse_timestamp(&created_at_str),
    })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn seed_listings() -> Vec<Listing> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    let stamp = |y, m, d, h| {
        date(y, m, d)
            .and_hms_opt(h, 0, 0)
            .unwrap_or_default()
            .and_utc()
    };

    let mut listings = vec![
        Listing::new(
            ListingType::Farmer,
            "John Kamau",
            Crop::Maize,
            County::Nakuru,
            12.0,
            33_000,
        )
        .with_phone("0712345678")
        .with_description("Fresh maize from Nakuru county. Quality certified.")
        .with_available_from(date(2026, 3, 15)),
        Listing::new(
            ListingType::Farmer,
            "Mary Wanjiku",
            Crop::Beans,
            County::UasinGishu,
            5.0,
            78_000,
        )
        .with_phone("0723456789")
        .with_description("Premium beans, organic farming methods.")
        .with_available_from(date(2026, 4, 1)),
        Listing::new(
            ListingType::Farmer,
            "Peter Ochieng",
            Crop::Wheat,
            County::TransNzoia,
            20.0,
            43_000,
        )
        .with_phone("0734567890")
        .with_description("High-quality wheat ready for harvest.")
        .with_available_from(date(2026, 3, 20)),
        Listing::new(
            ListingType::Buyer,
            "KenGrain Ltd",
            Crop::Wheat,
            County::Kiambu,
            50.0,
            48_000,
        )
        .with_phone("0700111222")
        .with_description("Looking for quality wheat. Bulk purchase, prompt payment.")
        .with_available_from(date(2026, 3, 10)),
        Listing::new(
            ListingType::Buyer,
            "FreshMart Kenya",
            Crop::Potatoes,
            County::Nyandarua,
            30.0,
            28_000,
        )
        .with_phone("0700333444")
        .with_description("Buying potatoes for retail chain. Regular orders available.")
        .with_available_from(date(2026, 3, 25)),
        Listing::new(
            ListingType::Buyer,
            "Nairobi Foods Co",
            Crop::Rice,
            County::Meru,
            25.0,
            95_000,
        )
        .with_phone("0700555666")
        .with_description("Premium rice needed for restaurant supply chain.")
        .with_available_from(date(2026, 4, 5)),
    ];

    // Stable creation stamps keep newest-first ordering deterministic
    let stamps = [
        stamp(2026, 2, 10, 8),
        stamp(2026, 2, 11, 10),
        stamp(2026, 2, 12, 9),
        stamp(2026, 2, 9, 14),
        stamp(2026, 2, 10, 11),
        stamp(2026, 2, 13, 7),
    ];
    for (listing, stamp) in listings.iter_mut().zip(stamps) {
        listing.created_at = stamp;
    }

    listings
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farm_profile_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_default_farm_profile().unwrap().is_none());

        let mut profile = FarmProfile::new("Green Acres".into(), County::Meru, Crop::Coffee);
        profile.soil_type = SoilType::ClayLoam;
        profile.farm_size_acres = 3.5;

        let id = db.create_farm_profile(&profile).unwrap();
        let loaded = db.get_default_farm_profile().unwrap().unwrap();
        assert_eq!(loaded.id, Some(id));
        assert_eq!(loaded.name, "Green Acres");
        assert_eq!(loaded.county, County::Meru);
        assert_eq!(loaded.crop, Crop::Coffee);
        assert_eq!(loaded.soil_type, SoilType::ClayLoam);
        assert_eq!(loaded.farm_size_acres, 3.5);
    }

    #[test]
    fn update_farm_profile_persists_changes() {
        let db = Database::open_in_memory().unwrap();
        let mut profile = FarmProfile::default();
        let id = db.create_farm_profile(&profile).unwrap();
        profile.id = Some(id);

        profile.crop = Crop::Tea;
        profile.fertilizer_budget_kes = 35_000.0;
        db.update_farm_profile(&profile).unwrap();

        let loaded = db.get_default_farm_profile().unwrap().unwrap();
        assert_eq!(loaded.crop, Crop::Tea);
        assert_eq!(loaded.fertilizer_budget_kes, 35_000.0);
    }

    #[test]
    fn update_without_id_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let profile = FarmProfile::default();
        assert!(db.update_farm_profile(&profile).is_err());
    }

    #[test]
    fn seeding_runs_once() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.seed_listings_if_empty().unwrap(), 6);
        assert_eq!(db.seed_listings_if_empty().unwrap(), 0);
        assert_eq!(db.count_listings().unwrap(), 6);
    }

    #[test]
    fn listings_come_back_newest_first() {
        let db = Database::open_in_memory().unwrap();
        db.seed_listings_if_empty().unwrap();

        let listings = db.get_listings().unwrap();
        assert_eq!(listings.len(), 6);
        // Nairobi Foods Co carries the latest creation stamp
        assert_eq!(listings[0].name, "Nairobi Foods Co");
        for pair in listings.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn create_and_delete_listing() {
        let db = Database::open_in_memory().unwrap();
        let listing = Listing::new(
            ListingType::Farmer,
            "Grace Muthoni",
            Crop::Tomatoes,
            County::Kirinyaga,
            8.0,
            38_000,
        );

        let id = db.create_listing(&listing).unwrap();
        assert_eq!(db.count_listings().unwrap(), 1);

        db.delete_listing(id).unwrap();
        assert_eq!(db.count_listings().unwrap(), 0);
    }
}
