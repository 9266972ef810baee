pub mod cli;
pub mod core;

use crate::core::config::{AppConfig, DisplaySettings};
use crate::core::period::Period;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Per-invocation overrides of the configured display settings.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub catalog: Option<String>,
    pub sort_field: Option<String>,
    pub descending: bool,
    pub period: Option<Period>,
    pub region: Option<String>,
    pub operating_system: Option<String>,
    pub limit: Option<usize>,
}

impl ListOptions {
    pub fn apply(&self, settings: &mut DisplaySettings) {
        if let Some(field) = &self.sort_field {
            settings.sort_field = field.clone();
        }
        if self.descending {
            settings.sort_ascending = false;
        }
        if let Some(period) = self.period {
            settings.period = period;
        }
        if let Some(region) = &self.region {
            settings.region = region.clone();
        }
        if let Some(os) = &self.operating_system {
            settings.operating_system = os.clone();
        }
    }
}

pub enum AppCommand {
    List(ListOptions),
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    match config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => {
            let default_path = AppConfig::default_config_path()?;
            if default_path.exists() {
                AppConfig::load_from_path(&default_path)
            } else {
                debug!(
                    "No config at {}, using default settings",
                    default_path.display()
                );
                Ok(AppConfig::default())
            }
        }
    }
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("ec2pricing starting...");

    let mut config = load_config(config_path)?;
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::List(options) => {
            options.apply(&mut config.settings);
            let catalog_path = options
                .catalog
                .as_deref()
                .or(config.catalog_path.as_deref())
                .context("No catalog given, pass --catalog or set catalog_path in the config")?;
            let instances = crate::core::catalog::load_catalog(catalog_path)?;
            cli::list::run(&instances, &config.settings, options.limit)
        }
    }
}
