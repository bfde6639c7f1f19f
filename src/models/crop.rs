use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Maize,
    Beans,
    Wheat,
    Rice,
    Sorghum,
    Tea,
    Coffee,
    Potatoes,
    Tomatoes,
    Onions,
}

impl Crop {
    pub const ALL: [Crop; 10] = [
        Crop::Maize,
        Crop::Beans,
        Crop::Wheat,
        Crop::Rice,
        Crop::Sorghum,
        Crop::Tea,
        Crop::Coffee,
        Crop::Potatoes,
        Crop::Tomatoes,
        Crop::Onions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Maize => "Maize",
            Crop::Beans => "Beans",
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Sorghum => "Sorghum",
            Crop::Tea => "Tea",
            Crop::Coffee => "Coffee",
            Crop::Potatoes => "Potatoes",
            Crop::Tomatoes => "Tomatoes",
            Crop::Onions => "Onions",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "maize" => Some(Crop::Maize),
            "beans" => Some(Crop::Beans),
            "wheat" => Some(Crop::Wheat),
            "rice" => Some(Crop::Rice),
            "sorghum" => Some(Crop::Sorghum),
            "tea" => Some(Crop::Tea),
            "coffee" => Some(Crop::Coffee),
            "potatoes" => Some(Crop::Potatoes),
            "tomatoes" => Some(Crop::Tomatoes),
            "onions" => Some(Crop::Onions),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        Crop::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum County {
    Nakuru,
    UasinGishu,
    TransNzoia,
    Nyandarua,
    Kiambu,
    Meru,
    Nyeri,
    Kirinyaga,
    Machakos,
    Bungoma,
    Kakamega,
    Kisii,
    Narok,
    Laikipia,
    Embu,
}

impl County {
    pub const ALL: [County; 15] = [
        County::Nakuru,
        County::UasinGishu,
        County::TransNzoia,
        County::Nyandarua,
        County::Kiambu,
        County::Meru,
        County::Nyeri,
        County::Kirinyaga,
        County::Machakos,
        County::Bungoma,
        County::Kakamega,
        County::Kisii,
        County::Narok,
        County::Laikipia,
        County::Embu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            County::Nakuru => "Nakuru",
            County::UasinGishu => "Uasin Gishu",
            County::TransNzoia => "Trans Nzoia",
            County::Nyandarua => "Nyandarua",
            County::Kiambu => "Kiambu",
            County::Meru => "Meru",
            County::Nyeri => "Nyeri",
            County::Kirinyaga => "Kirinyaga",
            County::Machakos => "Machakos",
            County::Bungoma => "Bungoma",
            County::Kakamega => "Kakamega",
            County::Kisii => "Kisii",
            County::Narok => "Narok",
            County::Laikipia => "Laikipia",
            County::Embu => "Embu",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nakuru" => Some(County::Nakuru),
            "uasingishu" | "uasin gishu" => Some(County::UasinGishu),
            "transnzoia" | "trans nzoia" => Some(County::TransNzoia),
            "nyandarua" => Some(County::Nyandarua),
            "kiambu" => Some(County::Kiambu),
            "meru" => Some(County::Meru),
            "nyeri" => Some(County::Nyeri),
            "kirinyaga" => Some(County::Kirinyaga),
            "machakos" => Some(County::Machakos),
            "bungoma" => Some(County::Bungoma),
            "kakamega" => Some(County::Kakamega),
            "kisii" => Some(County::Kisii),
            "narok" => Some(County::Narok),
            "laikipia" => Some(County::Laikipia),
            "embu" => Some(County::Embu),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        County::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}

impl std::fmt::Display for County {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Loam,
    Clay,
    Sandy,
    Silt,
    ClayLoam,
    SandyLoam,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Loam,
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Silt,
        SoilType::ClayLoam,
        SoilType::SandyLoam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loam => "Loam",
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Silt => "Silt",
            SoilType::ClayLoam => "Clay Loam",
            SoilType::SandyLoam => "Sandy Loam",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "loam" => Some(SoilType::Loam),
            "clay" => Some(SoilType::Clay),
            "sandy" => Some(SoilType::Sandy),
            "silt" => Some(SoilType::Silt),
            "clayloam" | "clay loam" => Some(SoilType::ClayLoam),
            "sandyloam" | "sandy loam" => Some(SoilType::SandyLoam),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        SoilType::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_from_str_valid() {
        assert_eq!(Crop::from_str("Maize"), Some(Crop::Maize));
        assert_eq!(Crop::from_str("maize"), Some(Crop::Maize));
        assert_eq!(Crop::from_str("COFFEE"), Some(Crop::Coffee));
        assert_eq!(Crop::from_str("Tomatoes"), Some(Crop::Tomatoes));
    }

    #[test]
    fn crop_from_str_invalid() {
        assert_eq!(Crop::from_str("cassava"), None);
        assert_eq!(Crop::from_str(""), None);
    }

    #[test]
    fn crop_round_trip() {
        for crop in Crop::ALL {
            assert_eq!(
                Crop::from_str(crop.as_str()),
                Some(crop),
                "Round-trip failed for {:?}",
                crop
            );
        }
    }

    #[test]
    fn county_round_trip() {
        for county in County::ALL {
            assert_eq!(
                County::from_str(county.as_str()),
                Some(county),
                "Round-trip failed for {:?}",
                county
            );
        }
        // Debug form (no space) also parses
        assert_eq!(County::from_str("UasinGishu"), Some(County::UasinGishu));
        assert_eq!(County::from_str("TransNzoia"), Some(County::TransNzoia));
    }

    #[test]
    fn soil_type_from_str_valid() {
        assert_eq!(SoilType::from_str("clay"), Some(SoilType::Clay));
        assert_eq!(SoilType::from_str("Loam"), Some(SoilType::Loam));
        assert_eq!(SoilType::from_str("SANDY"), Some(SoilType::Sandy));
        assert_eq!(SoilType::from_str("clay loam"), Some(SoilType::ClayLoam));
        assert_eq!(SoilType::from_str("ClayLoam"), Some(SoilType::ClayLoam));
    }

    #[test]
    fn soil_type_from_str_invalid() {
        assert_eq!(SoilType::from_str("peat"), None);
        assert_eq!(SoilType::from_str(""), None);
    }

    #[test]
    fn index_matches_all_order() {
        assert_eq!(Crop::Maize.index(), 0);
        assert_eq!(Crop::Onions.index(), 9);
        assert_eq!(County::Nakuru.index(), 0);
        assert_eq!(County::Embu.index(), 14);
        assert_eq!(SoilType::SandyLoam.index(), 5);
    }
}
