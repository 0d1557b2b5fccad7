//! Logging and observability
//!
//! Structured logging via `tracing`: console output always, optional
//! rotating JSON file logging.
//!
//! # Example
//!
//! ```no_run
//! use crossmatch::logging::init_logging;
//! use crossmatch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Service started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
