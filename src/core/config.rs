use super::period::Period;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// User-selected display options. Read-only for the duration of one render.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub region: String,
    pub operating_system: String,
    pub period: Period,
    pub reservation_term: String,
    pub reservation_type: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub calculator: bool,
    pub emr_percent: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            region: "us-east-1".to_string(),
            operating_system: "linux".to_string(),
            period: Period::Hourly,
            reservation_term: "yrTerm1".to_string(),
            reservation_type: "reserved".to_string(),
            sort_field: "apiName".to_string(),
            sort_ascending: true,
            calculator: false,
            emr_percent: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: DisplaySettings,
    pub catalog_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "ec2pricing", "ec2pricing")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
settings:
  region: "eu-west-1"
  operatingSystem: "mswin"
  period: "Monthly"
  reservationTerm: "yrTerm3"
  reservationType: "reserved"
  sortField: "onDemandPrice"
  sortAscending: false
  calculator: true
catalog_path: "/tmp/instances.json"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.settings.region, "eu-west-1");
        assert_eq!(config.settings.operating_system, "mswin");
        assert_eq!(config.settings.period, Period::Monthly);
        assert_eq!(config.settings.reservation_term, "yrTerm3");
        assert_eq!(config.settings.sort_field, "onDemandPrice");
        assert!(!config.settings.sort_ascending);
        assert!(config.settings.calculator);
        // Not in the yaml, falls back to the default
        assert!(!config.settings.emr_percent);
        assert_eq!(config.catalog_path.as_deref(), Some("/tmp/instances.json"));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("catalog_path: ~\n").unwrap();
        assert_eq!(config.settings, DisplaySettings::default());
        assert!(config.catalog_path.is_none());
        assert_eq!(config.settings.sort_field, "apiName");
        assert!(config.settings.sort_ascending);
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let yaml_str = "settings:\n  period: fortnightly\n";
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }
}
