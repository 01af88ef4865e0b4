use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration from `.todoboard/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub board: BoardInfo,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardInfo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Collection name; documents live in `<collection>.json`
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            collection: default_collection(),
            lock_timeout_ms: default_lock_timeout_ms(),
            retry: RetryConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

fn default_collection() -> String {
    "todos".to_string()
}

fn default_lock_timeout_ms() -> u64 {
    5000
}

/// Backoff settings for transient store failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
        }
    }
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    50
}

fn default_max_delay_ms() -> u64 {
    2000
}

fn default_multiplier() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// chrono format string for `createddate`
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            date_format: default_date_format(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_date_format() -> String {
    "%Y年%-m月%-d日".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_takes_defaults() {
        let config: BoardConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.collection, "todos");
        assert_eq!(config.store.lock_timeout_ms, 5000);
        assert_eq!(config.store.retry.max_retries, 3);
        assert_eq!(config.ui.date_format, "%Y年%-m月%-d日");
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: BoardConfig = toml::from_str(
            r#"
[board]
name = "home"

[store.retry]
max_retries = 0

[ui]
date_format = "%Y-%m-%d"
"#,
        )
        .unwrap();
        assert_eq!(config.board.name, "home");
        assert_eq!(config.store.collection, "todos");
        assert_eq!(config.store.retry.max_retries, 0);
        assert_eq!(config.store.retry.initial_delay_ms, 50);
        assert_eq!(config.ui.date_format, "%Y-%m-%d");
    }
}
