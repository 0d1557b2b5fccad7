//! Validate config command implementation
//!
//! Loads and validates the configuration file, then prints a summary.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates internally; a loaded config is a valid one
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration loaded and valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Debug Errors: {}", config.application.debug_errors);
        match config.dispatch.notification_ttl_days {
            Some(days) => println!("  Prompt TTL: {days} day(s)"),
            None => println!("  Prompt TTL: none"),
        }
        println!("  Response Retries: {}", config.response.max_retries);
        println!(
            "  Housekeeping: prune after {} day(s), on_list = {}",
            config.housekeeping.max_age_days, config.housekeeping.prune_on_list
        );
        if let Some(ref seed) = config.directory.seed_path {
            println!("  Donor Seed: {seed}");
        }
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_missing_file_fails() {
        let args = ValidateArgs {};
        let code = args.execute("definitely-missing.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_good_file_passes() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[application]\nlog_level = \"warn\"").unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(file.path().to_string_lossy().as_ref())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
