//! User configuration loaded from `$XDG_CONFIG_HOME/appraise/config.toml`.
//!
//! Every key is optional. A missing file yields the defaults; a file that does
//! not parse yields the defaults plus a message on stderr (printed before the
//! terminal is taken over, so it stays visible).

use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable that overrides `api_base_url`.
pub const API_URL_ENV: &str = "APPRAISE_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `"catppuccin-mocha"` or `"dark"`.
    pub theme: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Holds the session database and the log file.
    pub data_dir: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            api_base_url: "http://localhost:8000".to_owned(),
            request_timeout_secs: 30,
            data_dir: PathBuf::from(".appraise"),
            log_filter: "info".to_owned(),
        }
    }
}

impl AppConfig {
    /// Parses a config file body.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Replaces the base URL when `value` is present and non-blank.
    pub fn with_api_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_owned();
        }
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("session.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("appraise.log")
    }
}

/// Returns the path to the appraise config file.
///
/// Prefers `$XDG_CONFIG_HOME/appraise/config.toml`; falls back to
/// `~/.config/appraise/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("appraise").join("config.toml")
}

/// Loads the config file and applies the environment override. Never fails.
pub fn load() -> AppConfig {
    let path = config_path();
    let config = match std::fs::read_to_string(&path) {
        Ok(raw) => AppConfig::from_toml(&raw).unwrap_or_else(|e| {
            eprintln!("appraise: config parse error in {:?}: {}", path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };
    config.with_api_url_override(std::env::var(API_URL_ENV).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = AppConfig::from_toml(
            r#"
            theme = "dark"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.db_path(), PathBuf::from(".appraise/session.db"));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        assert!(AppConfig::from_toml("request_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn env_override_replaces_base_url_unless_blank() {
        let config = AppConfig::default()
            .with_api_url_override(Some(" https://reviews.example.com ".into()));
        assert_eq!(config.api_base_url, "https://reviews.example.com");

        let config = AppConfig::default().with_api_url_override(Some("   ".into()));
        assert_eq!(config.api_base_url, "http://localhost:8000");
        let config = AppConfig::default().with_api_url_override(None);
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }
}
