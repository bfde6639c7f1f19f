use crate::error::{FarmWiseError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub market: MarketConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub county: String,
    pub crop: String,
    pub soil_type: String,
    pub farm_size_acres: f64,
    pub fertilizer_budget_kes: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    /// Fetch live conditions from Open-Meteo.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Pre-fill the planner's expected rainfall from the 30-day history.
    #[serde(default = "default_enabled")]
    pub auto_fill_rainfall: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_fill_rainfall: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Fixed RNG seed for the simulated market feed. Unset means a fresh
    /// feed every launch.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FarmWiseError::Config(format!(
                "Config file not found at {:?}. Run `farmwise init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FarmWiseError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| FarmWiseError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("farmwise").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| FarmWiseError::Config("Cannot determine config directory".into()))?
            .join("farmwise")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/farmwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmWiseError::Config("Cannot determine config directory".into()))?
            .join("farmwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up FarmWise!");
        println!();

        println!("Farm Profile");
        let name: String = Input::new()
            .with_prompt("  Farm name")
            .default("My Farm".into())
            .interact_text()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let county: String = Input::new()
            .with_prompt("  County (Nakuru, Uasin Gishu, Meru, ...)")
            .default("Nakuru".into())
            .interact_text()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let crop: String = Input::new()
            .with_prompt("  Main crop (Maize, Beans, Wheat, ...)")
            .default("Maize".into())
            .interact_text()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let soil_type: String = Input::new()
            .with_prompt("  Soil type (Loam, Clay, Sandy, ...)")
            .default("Loam".into())
            .interact_text()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let farm_size_acres: f64 = Input::new()
            .with_prompt("  Farm size (acres)")
            .default(5.0)
            .interact_text()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let fertilizer_budget_kes: f64 = Input::new()
            .with_prompt("  Fertilizer budget (KES)")
            .default(20_000.0)
            .interact_text()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            farm: FarmConfig {
                name,
                county,
                crop,
                soil_type,
                farm_size_acres,
                fertilizer_budget_kes,
            },
            weather: WeatherConfig::default(),
            market: MarketConfig::default(),
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FarmWiseError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# FarmWise Configuration\n# Generated by `farmwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("FARMWISE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| FarmWiseError::Config("Cannot determine data directory".into()))?
            .join("farmwise");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("farmwise.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "My Farm".into(),
                county: "Nakuru".into(),
                crop: "Maize".into(),
                soil_type: "Loam".into(),
                farm_size_acres: 5.0,
                fertilizer_budget_kes: 20_000.0,
            },
            weather: WeatherConfig::default(),
            market: MarketConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml() {
        let yaml = r#"
farm:
  name: Green Acres
  county: Meru
  crop: Coffee
  soil_type: Clay Loam
  farm_size_acres: 3.5
  fertilizer_budget_kes: 15000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.farm.name, "Green Acres");
        assert_eq!(config.farm.farm_size_acres, 3.5);
        // Omitted sections take defaults
        assert!(config.weather.enabled);
        assert!(config.weather.auto_fill_rainfall);
        assert!(config.market.seed.is_none());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("FARMWISE_TEST_COUNTY", "Kisii");
        let substituted =
            Config::substitute_env_vars("county: ${FARMWISE_TEST_COUNTY}\ncrop: Maize");
        assert_eq!(substituted, "county: Kisii\ncrop: Maize");
        std::env::remove_var("FARMWISE_TEST_COUNTY");
    }

    #[test]
    fn unknown_env_vars_are_left_alone() {
        let raw = "county: ${FARMWISE_NO_SUCH_VAR}";
        assert_eq!(Config::substitute_env_vars(raw), raw);
    }
}
