use crate::config::types::ScrapeConfig;
use crate::export::ExportFormat;
use crate::extract::ExtractorKind;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Runs before any network activity so a bad config never starts a run.
pub fn validate(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError::Validation("name must not be empty".into()));
    }

    validate_url("base-url", &config.base_url)?;
    for url in &config.urls {
        validate_url("urls entry", url)?;
    }

    if !config.rate_limit.requests_per_second.is_finite()
        || config.rate_limit.requests_per_second <= 0.0
    {
        return Err(ConfigError::Validation(format!(
            "requests-per-second must be positive, got {}",
            config.rate_limit.requests_per_second
        )));
    }
    if config.rate_limit.burst == 0 {
        return Err(ConfigError::Validation(
            "burst must be at least 1".into(),
        ));
    }

    if config.retry.max_attempts == 0 {
        return Err(ConfigError::Validation(
            "max-attempts must be at least 1".into(),
        ));
    }
    if !config.retry.backoff_base.is_finite() || config.retry.backoff_base < 0.0 {
        return Err(ConfigError::Validation(format!(
            "backoff-base must be non-negative, got {}",
            config.retry.backoff_base
        )));
    }
    if !config.retry.backoff_max.is_finite() || config.retry.backoff_max <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "backoff-max must be positive, got {}",
            config.retry.backoff_max
        )));
    }

    if config.pagination.max_pages == 0 {
        return Err(ConfigError::Validation(
            "max-pages must be at least 1".into(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be at least 1".into(),
        ));
    }

    if ExtractorKind::parse(&config.selectors.parser).is_none() {
        return Err(ConfigError::Validation(format!(
            "unknown parser: {}",
            config.selectors.parser
        )));
    }

    if ExportFormat::parse(&config.export.format).is_none() {
        return Err(ConfigError::Validation(format!(
            "unknown export format: {}",
            config.export.format
        )));
    }
    if config.export.output.trim().is_empty() {
        return Err(ConfigError::Validation(
            "export output must not be empty".into(),
        ));
    }

    Ok(())
}

fn validate_url(label: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|err| ConfigError::Validation(format!("invalid {}: {} ({})", label, value, err)))?;
    if url.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "invalid {}: {} has no host",
            label, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn valid_config() -> ScrapeConfig {
        parse_config("name = \"test\"\nbase-url = \"https://example.com\"\n").unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut config = valid_config();
        config.name = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_malformed_base_url_rejected() {
        let mut config = valid_config();
        config.base_url = "not a url".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_hostless_url_rejected() {
        let mut config = valid_config();
        config.urls = vec!["file:///tmp/page.html".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut config = valid_config();
        config.rate_limit.requests_per_second = 0.0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_burst_rejected() {
        let mut config = valid_config();
        config.rate_limit.burst = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = valid_config();
        config.retry.max_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_parser_rejected() {
        let mut config = valid_config();
        config.selectors.parser = "xpath".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_export_format_rejected() {
        let mut config = valid_config();
        config.export.format = "parquet".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = valid_config();
        config.pagination.max_pages = 0;
        assert!(validate(&config).is_err());
    }
}
