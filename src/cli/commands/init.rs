//! Init command implementation
//!
//! Generates a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "crossmatch.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Crossmatch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: crossmatch validate-config");
                println!(
                    "  3. Try a matching run: crossmatch simulate --blood-group A+ \
                     --donors seeds/donors.json"
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration contents
    fn sample_config() -> &'static str {
        r#"# Crossmatch Configuration File
# Blood donation matching and notification dispatch core

environment = "development"  # development | staging | production

[application]
log_level = "info"
# Include internal error detail in caller-facing messages
debug_errors = false

[dispatch]
# Optional expiry for donor prompts, in days; remove for no expiry
# notification_ttl_days = 14

[response]
# Bounded retries for conflicting donor-response writes
max_retries = 3
retry_backoff_ms = [50, 150, 400]

[housekeeping]
# Completed/rejected requests older than this are pruned
max_age_days = 7
# Prune opportunistically after request listings
prune_on_list = true

[directory]
# JSON seed file for the simulate harness
# seed_path = "seeds/donors.json"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly
local_max_size_mb = 100
"#
    }
}
