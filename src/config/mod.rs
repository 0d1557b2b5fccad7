//! Configuration management for Crossmatch.
//!
//! TOML-based configuration loading, parsing and validation with
//! environment variable substitution and `CROSSMATCH_*` overrides.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crossmatch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("crossmatch.toml")?;
//! println!("Log level: {}", config.application.log_level);
//! println!("Prune after: {} days", config.housekeeping.max_age_days);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [application]
//! log_level = "info"
//! debug_errors = false
//!
//! [dispatch]
//! notification_ttl_days = 14
//!
//! [response]
//! max_retries = 3
//! retry_backoff_ms = [50, 150, 400]
//!
//! [housekeeping]
//! max_age_days = 7
//! prune_on_list = true
//!
//! [directory]
//! seed_path = "${CROSSMATCH_DIRECTORY_SEED_PATH}"
//!
//! [logging]
//! local_enabled = false
//! local_path = "logs"
//! ```

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CrossmatchConfig, DirectoryConfig, DispatchConfig, Environment,
    HousekeepingConfig, LoggingConfig, ResponseConfig,
};
