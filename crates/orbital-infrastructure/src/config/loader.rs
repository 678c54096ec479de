//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::{OrbitalConfig, PolicyConfig};
use crate::constants::{
    CONFIG_CASE_PRESERVING_KEYS, CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR,
    DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::{ErrorContext, config_error};
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use orbital_domain::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `OrbitalConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first one discovered)
    /// 3. Environment variables with prefix (e.g., `ORBITAL_BULK__MAX_CONCURRENCY`)
    pub fn load(&self) -> Result<OrbitalConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(OrbitalConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys so single ones survive in field names
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR)
                .lowercase(false)
                .map(|key| normalize_env_key(key.as_str()).into()),
        );

        let config: OrbitalConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_config(&config)?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &OrbitalConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(current_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase a dotted environment key except for entity type names
///
/// `DURABILITY.ENTITY_POLICIES.TestDocument.RETRY` becomes
/// `durability.entity_policies.TestDocument.retry`, so the map key matches
/// the registered type name.
pub fn normalize_env_key(key: &str) -> String {
    let mut preserve_next = false;
    key.split('.')
        .map(|segment| {
            if std::mem::take(&mut preserve_next) {
                return segment.to_string();
            }
            let lowered = segment.to_ascii_lowercase();
            preserve_next = CONFIG_CASE_PRESERVING_KEYS.contains(&lowered.as_str());
            lowered
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Validate configuration values
pub fn validate_config(config: &OrbitalConfig) -> Result<()> {
    validate_logging_config(config)?;
    validate_durability_config(config)?;
    validate_bulk_config(config)?;
    validate_database_config(config)?;
    Ok(())
}

fn validate_logging_config(config: &OrbitalConfig) -> Result<()> {
    if config.logging.level.trim().is_empty() {
        return Err(config_error("Log level cannot be empty"));
    }
    parse_log_level(&config.logging.level).map(|_| ())
}

fn validate_durability_config(config: &OrbitalConfig) -> Result<()> {
    let durability = &config.durability;
    validate_policy("default", &durability.default_policy)?;
    for (name, policy) in &durability.entity_policies {
        if name.trim().is_empty() {
            return Err(config_error("Entity policy name cannot be empty"));
        }
        validate_policy(name, policy)?;
    }
    Ok(())
}

fn validate_policy(name: &str, policy: &PolicyConfig) -> Result<()> {
    if let Some(retry_max) = policy.retry.max_delay_ms
        && retry_max < policy.retry.delay_ms
    {
        return Err(config_error(format!(
            "Policy '{name}': max_delay_ms cannot be lower than delay_ms"
        )));
    }
    if let Some(breaker) = &policy.circuit_breaker {
        if !(0.0..=1.0).contains(&breaker.failure_ratio) {
            return Err(config_error(format!(
                "Policy '{name}': failure_ratio must be between 0 and 1"
            )));
        }
        if breaker.minimum_throughput == 0 {
            return Err(config_error(format!(
                "Policy '{name}': minimum_throughput cannot be 0"
            )));
        }
        if breaker.sampling_duration_secs == 0 {
            return Err(config_error(format!(
                "Policy '{name}': sampling_duration_secs cannot be 0"
            )));
        }
    }
    Ok(())
}

fn validate_bulk_config(config: &OrbitalConfig) -> Result<()> {
    if config.bulk.max_concurrency == Some(0) {
        return Err(config_error(
            "Bulk max_concurrency cannot be 0; leave it unset for unbounded fan-out",
        ));
    }
    Ok(())
}

fn validate_database_config(config: &OrbitalConfig) -> Result<()> {
    let database = &config.database;
    if !database.containers.is_empty() && database.database_name.trim().is_empty() {
        return Err(config_error(
            "Database name cannot be empty when containers are declared",
        ));
    }
    if database.containers.values().any(|name| name.trim().is_empty()) {
        return Err(config_error("Container names cannot be empty"));
    }
    Ok(())
}
