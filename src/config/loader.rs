//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CrossmatchConfig;
use crate::domain::errors::CrossmatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`CrossmatchConfig`]
/// 4. Applies environment variable overrides (`CROSSMATCH_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use crossmatch::config::loader::load_config;
///
/// let config = load_config("crossmatch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CrossmatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CrossmatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CrossmatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CrossmatchConfig = toml::from_str(&contents)
        .map_err(|e| CrossmatchError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CrossmatchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CrossmatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `CROSSMATCH_*` prefix
///
/// Variables follow the pattern `CROSSMATCH_<SECTION>_<KEY>`, e.g.
/// `CROSSMATCH_APPLICATION_LOG_LEVEL` or `CROSSMATCH_HOUSEKEEPING_MAX_AGE_DAYS`.
fn apply_env_overrides(config: &mut CrossmatchConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CROSSMATCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("CROSSMATCH_APPLICATION_DEBUG_ERRORS") {
        config.application.debug_errors = val.parse().unwrap_or(false);
    }

    // Dispatch overrides
    if let Ok(val) = std::env::var("CROSSMATCH_DISPATCH_NOTIFICATION_TTL_DAYS") {
        if let Ok(days) = val.parse() {
            config.dispatch.notification_ttl_days = Some(days);
        }
    }

    // Response overrides
    if let Ok(val) = std::env::var("CROSSMATCH_RESPONSE_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.response.max_retries = retries;
        }
    }

    // Housekeeping overrides
    if let Ok(val) = std::env::var("CROSSMATCH_HOUSEKEEPING_MAX_AGE_DAYS") {
        if let Ok(days) = val.parse() {
            config.housekeeping.max_age_days = days;
        }
    }
    if let Ok(val) = std::env::var("CROSSMATCH_HOUSEKEEPING_PRUNE_ON_LIST") {
        config.housekeeping.prune_on_list = val.parse().unwrap_or(true);
    }

    // Directory overrides
    if let Ok(val) = std::env::var("CROSSMATCH_DIRECTORY_SEED_PATH") {
        config.directory.seed_path = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CROSSMATCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CROSSMATCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CROSSMATCH_TEST_VAR", "seeds/donors.json");
        let input = "seed_path = \"${CROSSMATCH_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "seed_path = \"seeds/donors.json\"\n");
        std::env::remove_var("CROSSMATCH_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CROSSMATCH_MISSING_VAR");
        let input = "seed_path = \"${CROSSMATCH_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# seed_path = \"${NOT_A_REAL_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("NOT_A_REAL_VAR"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
environment = "staging"

[application]
log_level = "debug"

[housekeeping]
max_age_days = 14
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.housekeeping.max_age_days, 14);
    }

    #[test]
    fn test_load_config_invalid_values_rejected() {
        let toml_content = r#"
[housekeeping]
max_age_days = 0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
