//! Configuration schema types
//!
//! The configuration structure mapped from the TOML file. Every section
//! has working defaults so a minimal file (or none of the optional
//! sections) still yields a valid configuration.

use crate::core::retry::RetryPolicy;
use crate::core::service::ServiceOptions;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Crossmatch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CrossmatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Notification dispatch settings
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Donor response settings
    #[serde(default)]
    pub response: ResponseConfig,

    /// Stale-request housekeeping settings
    #[serde(default)]
    pub housekeeping: HousekeepingConfig,

    /// Donor directory settings
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CrossmatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.dispatch.validate()?;
        self.response.validate()?;
        self.housekeeping.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Translates the configuration into service options
    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            prune_on_list: self.housekeeping.prune_on_list,
            debug_errors: self.application.debug_errors
                || self.environment == Environment::Development,
            housekeeping_max_age_days: self.housekeeping.max_age_days,
            notification_ttl_days: self.dispatch.notification_ttl_days,
            response_retry: RetryPolicy {
                max_attempts: self.response.max_retries,
                backoff_ms: self.response.retry_backoff_ms.clone(),
            },
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Include internal error detail in caller-facing messages
    #[serde(default)]
    pub debug_errors: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            debug_errors: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Notification dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DispatchConfig {
    /// Optional expiry for donor prompts, in days; unset means no expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_ttl_days: Option<i64>,
}

impl DispatchConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(days) = self.notification_ttl_days {
            if days < 1 {
                return Err(format!(
                    "notification_ttl_days must be at least 1, got {days}"
                ));
            }
        }
        Ok(())
    }
}

/// Donor response configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Attempts for the conflict-prone response upsert, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Backoff before each retry, in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: Vec<u64>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl ResponseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries < 1 {
            return Err("response.max_retries must be at least 1".to_string());
        }
        if self.retry_backoff_ms.is_empty() {
            return Err("response.retry_backoff_ms cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Stale-request housekeeping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousekeepingConfig {
    /// Age limit in days before terminal requests are pruned
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,

    /// Run pruning opportunistically after list-fetches
    #[serde(default = "default_true")]
    pub prune_on_list: bool,
}

impl Default for HousekeepingConfig {
    fn default() -> Self {
        Self {
            max_age_days: default_max_age_days(),
            prune_on_list: true,
        }
    }
}

impl HousekeepingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_age_days < 1 {
            return Err(format!(
                "housekeeping.max_age_days must be at least 1, got {}",
                self.max_age_days
            ));
        }
        Ok(())
    }
}

/// Donor directory configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DirectoryConfig {
    /// JSON seed file for the in-memory directory (simulate harness)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rotating JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,

    /// Soft cap on log file size, in megabytes
    #[serde(default = "default_max_size_mb")]
    pub local_max_size_mb: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
            local_max_size_mb: default_max_size_mb(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_backoff_ms() -> Vec<u64> {
    vec![50, 150, 400]
}

fn default_max_age_days() -> i64 {
    7
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_max_size_mb() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CrossmatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.housekeeping.max_age_days, 7);
        assert!(config.housekeeping.prune_on_list);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = CrossmatchConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_age_rejected() {
        let mut config = CrossmatchConfig::default();
        config.housekeeping.max_age_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retries_rejected() {
        let mut config = CrossmatchConfig::default();
        config.response.max_retries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimal_toml_parses_with_defaults() {
        let config: CrossmatchConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_service_options_reflect_config() {
        let toml = r#"
            environment = "production"

            [application]
            log_level = "warn"

            [dispatch]
            notification_ttl_days = 14

            [response]
            max_retries = 5
            retry_backoff_ms = [10, 20]

            [housekeeping]
            max_age_days = 30
            prune_on_list = false
        "#;
        let config: CrossmatchConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();

        let options = config.service_options();
        assert!(!options.prune_on_list);
        assert!(!options.debug_errors, "production suppresses detail");
        assert_eq!(options.housekeeping_max_age_days, 30);
        assert_eq!(options.notification_ttl_days, Some(14));
        assert_eq!(options.response_retry.max_attempts, 5);
    }

    #[test]
    fn test_development_enables_debug_errors() {
        let config = CrossmatchConfig::default();
        assert!(config.service_options().debug_errors);
    }
}
