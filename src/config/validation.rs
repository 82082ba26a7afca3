use crate::config::types::{Config, HttpConfig, OutputConfig, TargetEntry};
use crate::url::parse_target_url;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_output_config(&config.output)?;
    validate_http_config(&config.http)?;
    validate_targets(&config.targets)?;
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates the configured scrape targets
fn validate_targets(targets: &[TargetEntry]) -> Result<(), ConfigError> {
    for entry in targets {
        parse_target_url(&entry.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", entry.url, e))
        })?;

        if entry.selector.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Target '{}' must have a non-empty selector",
                entry.url
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(url: &str, selector: &str) -> TargetEntry {
        TargetEntry {
            url: url.to_string(),
            selector: selector.to_string(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_results_dir() {
        let mut config = Config::default();
        config.output.results_dir = PathBuf::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = Some(0);
        assert!(validate(&config).is_err());

        config.http.timeout_secs = Some(1);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_targets() {
        assert!(validate_targets(&[entry("https://example.com", "img")]).is_ok());
        assert!(validate_targets(&[entry("http://127.0.0.1:9000/a", "img.x")]).is_ok());

        assert!(matches!(
            validate_targets(&[entry("example.com", "img")]),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_targets(&[entry("ftp://example.com", "img")]),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_targets(&[entry("https://example.com", "")]),
            Err(ConfigError::Validation(_))
        ));
    }
}
