use crate::errors::ConfigError;
use reqwest::Url;
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ROW_LIMIT: usize = 100;
pub const TREND_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// Base url of the hosted table API. `None` selects the in-memory store.
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
    /// Every select is capped at this many rows.
    pub row_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store_url: None,
            store_api_key: None,
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl Config {
    /// Reads `PORT`, `STORE_URL`, `STORE_API_KEY` and `ROW_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        let port = match non_empty("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let row_limit = match non_empty("ROW_LIMIT") {
            Some(value) => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::Invalid { name: "ROW_LIMIT", value }),
            },
            None => DEFAULT_ROW_LIMIT,
        };

        let store_url = non_empty("STORE_URL");
        if let Some(url) = &store_url {
            Url::parse(url).map_err(|err| ConfigError::StoreUrl(err.to_string()))?;
        }

        Ok(Self {
            port,
            store_url,
            store_api_key: non_empty("STORE_API_KEY"),
            row_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_all_values() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("STORE_URL", "https://db.example.test"),
            ("STORE_API_KEY", "secret"),
            ("ROW_LIMIT", "25"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.store_url.as_deref(), Some("https://db.example.test"));
        assert_eq!(config.store_api_key.as_deref(), Some("secret"));
        assert_eq!(config.row_limit, 25);
    }

    #[test]
    fn blank_store_url_means_memory_store() {
        let config = config_from(&[("STORE_URL", "  ")]).unwrap();
        assert_eq!(config.store_url, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("ROW_LIMIT", "0")]),
            Err(ConfigError::Invalid { name: "ROW_LIMIT", .. })
        ));
        assert!(matches!(
            config_from(&[("STORE_URL", "db.example")]),
            Err(ConfigError::StoreUrl(_))
        ));
    }
}
