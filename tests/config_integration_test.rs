//! Integration tests for configuration loading

use crossmatch::config::{load_config, Environment};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_full_config_round_trip() {
    let file = write_config(
        r#"
environment = "production"

[application]
log_level = "warn"
debug_errors = false

[dispatch]
notification_ttl_days = 14

[response]
max_retries = 5
retry_backoff_ms = [25, 75, 200]

[housekeeping]
max_age_days = 21
prune_on_list = false

[directory]
seed_path = "seeds/donors.json"

[logging]
local_enabled = false
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.dispatch.notification_ttl_days, Some(14));
    assert_eq!(config.response.max_retries, 5);
    assert_eq!(config.housekeeping.max_age_days, 21);
    assert!(!config.housekeeping.prune_on_list);
    assert_eq!(config.directory.seed_path.as_deref(), Some("seeds/donors.json"));

    let options = config.service_options();
    assert_eq!(options.notification_ttl_days, Some(14));
    assert_eq!(options.response_retry.max_attempts, 5);
    assert_eq!(options.response_retry.backoff_ms, vec![25, 75, 200]);
}

#[test]
fn test_empty_config_uses_defaults() {
    let file = write_config("");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.housekeeping.max_age_days, 7);
    assert!(config.housekeeping.prune_on_list);
    assert!(config.dispatch.notification_ttl_days.is_none());
}

#[test]
fn test_env_var_substitution() {
    std::env::set_var("CROSSMATCH_IT_SEED", "from-env/donors.json");
    let file = write_config(
        r#"
[directory]
seed_path = "${CROSSMATCH_IT_SEED}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.directory.seed_path.as_deref(),
        Some("from-env/donors.json")
    );
    std::env::remove_var("CROSSMATCH_IT_SEED");
}

#[test]
fn test_missing_env_var_fails_load() {
    std::env::remove_var("CROSSMATCH_IT_MISSING");
    let file = write_config(
        r#"
[directory]
seed_path = "${CROSSMATCH_IT_MISSING}"
"#,
    );
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_invalid_section_values_rejected() {
    let file = write_config(
        r#"
[response]
max_retries = 0
"#,
    );
    assert!(load_config(file.path()).is_err());

    let file = write_config(
        r#"
[logging]
local_rotation = "weekly"
"#,
    );
    assert!(load_config(file.path()).is_err());
}
