use crate::config::types::ScrapeConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a scrape config from a TOML file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use kumoweb::config::load_config;
///
/// let config = load_config(Path::new("job.toml")).unwrap();
/// println!("Scraping {}", config.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<ScrapeConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates a scrape config from TOML content
pub fn parse_config(content: &str) -> Result<ScrapeConfig, ConfigError> {
    let config: ScrapeConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}
