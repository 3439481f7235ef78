//! Configuration handling for the TUI

use crate::api::DEFAULT_API_SERVER;
use crate::state::{AppConstants, DEFAULT_COMMIT_WINDOW};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment override for the API server
const API_SERVER_ENV: &str = "APPCO_API_SERVER";

const DEFAULT_SITE_ORIGIN: &str = "https://app.co";
const DEFAULT_SIGN_IN_URL: &str = "https://app.co/login";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the App.co API
    pub api_server: Option<String>,
    /// Origin prefixed to the maker-portal link
    pub site_origin: Option<String>,
    /// Where makers sign in with Blockstack
    pub sign_in_url: Option<String>,
    /// Request timeout for the submission call
    pub request_timeout_secs: Option<u64>,
    /// Quiet window before typed input is committed
    pub commit_window_ms: Option<u64>,
    /// Category/blockchain/storage/authentication option lists
    pub app_constants: Option<AppConstants>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        let mut config = match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(server) = std::env::var(API_SERVER_ENV) {
            if !server.trim().is_empty() {
                config.api_server = Some(server);
            }
        }

        Ok(config)
    }

    pub fn api_server(&self) -> &str {
        self.api_server.as_deref().unwrap_or(DEFAULT_API_SERVER)
    }

    pub fn site_origin(&self) -> &str {
        self.site_origin
            .as_deref()
            .unwrap_or(DEFAULT_SITE_ORIGIN)
            .trim_end_matches('/')
    }

    /// Sign-in URL that returns the maker to the submission form
    pub fn sign_in_redirect_url(&self) -> String {
        let base = self.sign_in_url.as_deref().unwrap_or(DEFAULT_SIGN_IN_URL);
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{base}{separator}redirect=submit")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn commit_window(&self) -> Duration {
        self.commit_window_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COMMIT_WINDOW)
    }

    pub fn app_constants(&self) -> AppConstants {
        self.app_constants.clone().unwrap_or_else(AppConstants::builtin)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("co", "app", "appco-tui")
}

/// Directory backing the durable snapshot store
pub fn store_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("store"))
        .unwrap_or_else(|| std::env::temp_dir().join("appco-tui").join("store"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert_eq!(config.api_server(), "https://api.app.co");
        assert_eq!(config.site_origin(), "https://app.co");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.commit_window(), Duration::from_millis(100));
        assert_eq!(config.app_constants(), AppConstants::builtin());
    }

    #[test]
    fn test_sign_in_redirect_url() {
        let mut config = TuiConfig::default();
        assert_eq!(config.sign_in_redirect_url(), "https://app.co/login?redirect=submit");

        config.sign_in_url = Some("https://auth.example.com/start?app=appco".to_string());
        assert_eq!(
            config.sign_in_redirect_url(),
            "https://auth.example.com/start?app=appco&redirect=submit"
        );
    }

    #[test]
    fn test_site_origin_trims_trailing_slash() {
        let config = TuiConfig {
            site_origin: Some("https://staging.app.co/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.site_origin(), "https://staging.app.co");
    }

    #[test]
    fn test_partial_serialization() {
        let json = r#"{"api_server": "http://localhost:4000", "commit_window_ms": 250}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_server(), "http://localhost:4000");
        assert_eq!(parsed.commit_window(), Duration::from_millis(250));
        assert!(parsed.site_origin.is_none());
    }

    #[test]
    fn test_app_constants_from_config() {
        let json = r#"{"app_constants": {"categoryEnums": {"Music": "Music"}}}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        let constants = parsed.app_constants();
        assert_eq!(constants.category_enums.len(), 1);
        assert!(constants.authentication_enums.is_empty());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"site_origin": "https://app.co", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.site_origin(), "https://app.co");
    }

    #[test]
    fn test_store_dir_ends_with_store() {
        assert!(store_dir().ends_with("store"));
    }
}
