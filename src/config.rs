//! Client configuration.
//!
//! Read from `vipix.toml` in the app data directory; every value can be
//! overridden from the environment (`VIPIX_API_URL`, `VIPIX_STRIPE_KEY`,
//! `VIPIX_PUBLIC_ORIGIN`).

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_API_URL: &str = "VIPIX_API_URL";
pub const ENV_STRIPE_KEY: &str = "VIPIX_STRIPE_KEY";
pub const ENV_PUBLIC_ORIGIN: &str = "VIPIX_PUBLIC_ORIGIN";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Publishable key for the hosted payment form
    pub stripe_publishable_key: String,
    /// Public origin used for share links and payment return URLs
    pub public_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            stripe_publishable_key: String::new(),
            public_origin: "http://localhost:5000".to_string(),
        }
    }
}

impl AppConfig {
    /// Parses a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Loads the config file if present. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Applies overrides from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(key) = lookup(ENV_STRIPE_KEY) {
            self.stripe_publishable_key = key;
        }
        if let Some(origin) = lookup(ENV_PUBLIC_ORIGIN) {
            self.public_origin = origin;
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.public_origin = self.public_origin.trim_end_matches('/').to_string();
        self
    }

    /// Config file plus environment. A malformed file is logged and ignored.
    pub fn load() -> Self {
        let path = crate::filesystem::config_path();
        let base = match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        };
        let config = base.with_overrides(|key| std::env::var(key).ok());
        log::info!("Using API at {}", config.api_base_url);
        config
    }

    /// Share link for guests: `{origin}/camera/{code}`
    pub fn camera_link(&self, login_code: &str) -> String {
        format!("{}/camera/{}", self.public_origin, login_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(r#"api_base_url = "https://api.vipix.app""#).unwrap();
        assert_eq!(config.api_base_url, "https://api.vipix.app");
        assert_eq!(config.public_origin, "http://localhost:5000");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let result = AppConfig::from_toml("api_base_url = ");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://staging.vipix.app/"),
            (ENV_STRIPE_KEY, "pk_test_123"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "https://staging.vipix.app");
        assert_eq!(config.stripe_publishable_key, "pk_test_123");
    }

    #[test]
    fn test_camera_link() {
        let config = AppConfig {
            public_origin: "https://vipix.app".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.camera_link("WEDDING1"), "https://vipix.app/camera/WEDDING1");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("vipix-does-not-exist.toml");
        assert_eq!(AppConfig::from_file(&path).unwrap(), AppConfig::default());
    }
}
