//! Configuration for the bearcalc command line.
//!
//! Loaded with figment from defaults, a TOML file and `BEARCALC_`
//! environment variables.
//!
//! ```toml
//! [output]
//! json = false
//! currency_symbol = "€"
//!
//! [defaults.mortgage-calculator]
//! interest_rate = "5.9"
//! loan_term_years = "15"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use bearcalc_core::registry::{self, CalculatorId};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the platform config dir.
const APP_DIR_NAME: &str = "bearcalc";

/// Prefix for environment overrides; nested keys split on `__`.
const ENV_PREFIX: &str = "BEARCALC_";

/// Application configuration.
///
/// Precedence, highest first:
/// 1. Environment variables (`BEARCALC_OUTPUT__JSON=true`)
/// 2. TOML config file at `~/.config/bearcalc/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output formatting.
    pub output: OutputConfig,
    /// Per-calculator field defaults: slug -> field -> value.
    pub defaults: BTreeMap<String, BTreeMap<String, String>>,
}

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print JSON instead of text.
    pub json: bool,
    /// Symbol placed before money amounts.
    pub currency_symbol: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        tracing::debug!(path = %config_file.display(), "loading configuration");

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty currency symbol, or for defaults that
    /// name an unknown calculator or field.
    pub fn validate(&self) -> Result<()> {
        if self.output.currency_symbol.trim().is_empty() {
            return Err(Error::config_validation("output.currency_symbol must not be empty"));
        }

        for (slug, fields) in &self.defaults {
            let descriptor = registry::find(slug)
                .ok_or_else(|| Error::config_validation(format!("defaults: unknown calculator '{slug}'")))?;
            for key in fields.keys() {
                if descriptor.field(key).is_none() {
                    return Err(Error::config_validation(format!(
                        "defaults.{slug}: '{key}' is not a field of this calculator"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Configured field defaults for one calculator.
    pub fn defaults_for(&self, id: CalculatorId) -> impl Iterator<Item = (&str, &str)> {
        self.defaults
            .get(id.slug())
            .into_iter()
            .flat_map(|fields| fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.output.json);
        assert_eq!(config.output.currency_symbol, "$");
        assert!(config.defaults.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("bearcalc"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/bearcalc.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[output]
currency_symbol = "€"

[defaults.mortgage-calculator]
interest_rate = "5.9"
"#,
        );
        let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.output.currency_symbol, "€");
        assert!(!config.output.json);
        let overrides: Vec<_> = config.defaults_for(CalculatorId::Mortgage).collect();
        assert_eq!(overrides, vec![("interest_rate", "5.9")]);
        assert_eq!(config.defaults_for(CalculatorId::Tip).count(), 0);
    }

    #[test]
    fn test_validate_empty_symbol() {
        let mut config = Config::default();
        config.output.currency_symbol = " ".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("currency_symbol"));
    }

    #[test]
    fn test_validate_unknown_calculator() {
        let mut config = Config::default();
        config.defaults.insert("warp-drive".to_string(), BTreeMap::new());
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("warp-drive"));
    }

    #[test]
    fn test_validate_unknown_field() {
        let mut config = Config::default();
        let mut fields = BTreeMap::new();
        fields.insert("warp_factor".to_string(), "9".to_string());
        config.defaults.insert("tip-calculator".to_string(), fields);
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("warp_factor"));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let file = write_config("[defaults.tip-calculator]\nwarp_factor = \"9\"\n");
        let result = Config::load_from(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("currency_symbol"));
    }
}
