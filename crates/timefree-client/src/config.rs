//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/timefree/config.toml` by default. The resolved [`AppConfig`]
//! is built once at startup (file + CLI/env overrides) and injected into
//! the application; nothing reads the environment ad hoc after that.
//!
//! The identity-provider `client_id` supports secret references:
//! - `pass::path/in/store` — resolved via `pass show`
//! - `env::VAR_NAME` — resolved from the environment
//! - `file::path` — first line of a file
//! - plain text — used as-is

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the timefree client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Analysis backend settings.
    #[serde(default)]
    pub backend: BackendSettings,

    /// Identity-provider settings.
    #[serde(default)]
    pub auth: AuthSettings,

    /// OAuth callback listener settings.
    #[serde(default)]
    pub callback: CallbackSettings,
}

/// Analysis backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the backend (the `/api` prefix is appended per request).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout: 30,
        }
    }
}

/// Identity-provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// OAuth client ID of the provider app (supports `pass::`, `env::`,
    /// `file::` prefixes). Informational for the client; the backend owns
    /// the code exchange.
    pub client_id: Option<String>,
}

impl AuthSettings {
    /// Resolves the client ID, expanding secret references.
    pub fn resolve_client_id(&self) -> Result<Option<String>, String> {
        match self.client_id.as_deref() {
            Some(raw) => crate::secret::resolve(raw)
                .map(Some)
                .map_err(|e| format!("failed to resolve auth.client_id: {}", e)),
            None => Ok(None),
        }
    }
}

/// OAuth callback listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackSettings {
    /// First port to try for the loopback listener.
    pub port_min: u16,

    /// Last port to try for the loopback listener.
    pub port_max: u16,

    /// Seconds to wait for the provider redirect before giving up.
    pub timeout: u64,
}

impl Default for CallbackSettings {
    fn default() -> Self {
        Self {
            port_min: 8400,
            port_max: 8420,
            timeout: 300,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read config: {}", e))?;
            toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timefree")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timefree")
    }

    /// Path of the persisted session file.
    pub fn session_path(&self) -> PathBuf {
        Self::default_data_dir().join("session.json")
    }

    /// Path of the cached last analysis result.
    pub fn analysis_cache_path(&self) -> PathBuf {
        Self::default_data_dir().join("analysis.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.backend.timeout, 30);
        assert!(config.auth.client_id.is_none());
        assert!(config.callback.port_min <= config.callback.port_max);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_content = r#"
[backend]
base_url = "https://freedom.example.com"
"#;
        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.backend.base_url, "https://freedom.example.com");
        // Unspecified sections fall back to defaults.
        assert_eq!(config.backend.timeout, 30);
        assert_eq!(config.callback.timeout, 300);
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"http://localhost:9999\"\ntimeout = 5\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:9999");
        assert_eq!(config.backend.timeout, 5);
    }

    #[test]
    fn load_from_bad_toml_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "backend = [not toml").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn resolve_client_id_plain() {
        let auth = AuthSettings {
            client_id: Some("id.apps.googleusercontent.com".to_string()),
        };
        assert_eq!(
            auth.resolve_client_id().unwrap(),
            Some("id.apps.googleusercontent.com".to_string())
        );
    }

    #[test]
    fn resolve_client_id_env_reference() {
        unsafe {
            std::env::set_var("_TIMEFREE_CFG_TEST_ID", "env-id.apps.googleusercontent.com");
        }
        let auth = AuthSettings {
            client_id: Some("env::_TIMEFREE_CFG_TEST_ID".to_string()),
        };
        assert_eq!(
            auth.resolve_client_id().unwrap(),
            Some("env-id.apps.googleusercontent.com".to_string())
        );
        unsafe {
            std::env::remove_var("_TIMEFREE_CFG_TEST_ID");
        }
    }

    #[test]
    fn resolve_client_id_absent_is_none() {
        assert_eq!(AuthSettings::default().resolve_client_id().unwrap(), None);
    }
}
