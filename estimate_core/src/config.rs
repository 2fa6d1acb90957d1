//! # Estimator Configuration
//!
//! Settings for one deployment of the estimator, loaded from a TOML file.
//! Every section and key is optional; anything left out takes the default.
//!
//! ```toml
//! [branding]
//! company_name = "Mike's Contracting"
//! logo = "https://example.com/logo.png"
//! logo_timeout_secs = 5
//!
//! [pricing]
//! policy = "fixed_multiplier"
//!
//! [records]
//! path = "estimates.csv"
//!
//! [permits]
//! jurisdiction = "Baltimore City"
//! zip_codes = ["21201", "21202"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calculations::PricingPolicy;
use crate::errors::{CoreResult, EstimateError};
use crate::permits::PermitAdvisory;

/// Config file looked for in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "estimator.toml";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub branding: BrandingConfig,
    pub pricing: PricingConfig,
    pub records: RecordsConfig,
    pub permits: PermitAdvisory,
}

impl EstimatorConfig {
    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(EstimatorConfig::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            EstimateError::file_error("read config", path.display().to_string(), e.to_string())
        })?;

        let config = Self::from_toml_str(&contents, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), policy = config.pricing.policy.display_name(), "loaded config");
        Ok(config)
    }

    /// Parse configuration text. `origin` names the source in errors.
    pub fn from_toml_str(contents: &str, origin: &str) -> CoreResult<Self> {
        toml::from_str(contents).map_err(|e| EstimateError::InvalidConfig {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Company details printed on every quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Document title
    pub company_name: String,
    /// Footer contact person
    pub contact_name: String,
    pub phone: String,
    pub website: String,
    /// Logo image: a local path or an http(s) URL
    pub logo: Option<String>,
    /// Time allowed for fetching a remote logo
    pub logo_timeout_secs: u64,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        BrandingConfig {
            company_name: "Mike's Contracting".to_string(),
            contact_name: "Mike".to_string(),
            phone: "443-467-0899".to_string(),
            website: "www.Attractiveremodels.com".to_string(),
            logo: Some("logo.png".to_string()),
            logo_timeout_secs: 10,
        }
    }
}

impl BrandingConfig {
    pub fn logo_timeout(&self) -> Duration {
        Duration::from_secs(self.logo_timeout_secs)
    }
}

/// Pricing policy and defaults for new requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub policy: PricingPolicy,
    /// Markup applied when a request does not give one
    pub default_markup_percent: f64,
}

/// Where saved estimates are appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub path: PathBuf,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        RecordsConfig {
            path: PathBuf::from("estimates.csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = EstimatorConfig::from_toml_str("", "test").unwrap();
        assert_eq!(config, EstimatorConfig::default());
        assert_eq!(config.pricing.policy, PricingPolicy::Markup);
        assert_eq!(config.records.path, PathBuf::from("estimates.csv"));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = EstimatorConfig::from_toml_str(
            r#"
            [branding]
            company_name = "Deck Bros"
            logo_timeout_secs = 3

            [pricing]
            policy = "fixed_multiplier"

            [permits]
            jurisdiction = "Testville"
            "#,
            "test",
        )
        .unwrap();

        assert_eq!(config.branding.company_name, "Deck Bros");
        assert_eq!(config.branding.contact_name, "Mike");
        assert_eq!(config.branding.logo_timeout(), Duration::from_secs(3));
        assert_eq!(config.pricing.policy, PricingPolicy::FixedMultiplier);
        assert_eq!(config.permits.jurisdiction, "Testville");
        assert!(config.permits.zip_codes.contains("21201"));
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let err = EstimatorConfig::from_toml_str("[pricing]\npolicy = \"surge\"", "bad.toml").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EstimatorConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EstimatorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[records]\npath = \"out/log.csv\"\n").unwrap();

        let config = EstimatorConfig::load(&path).unwrap();
        assert_eq!(config.records.path, PathBuf::from("out/log.csv"));
    }
}
