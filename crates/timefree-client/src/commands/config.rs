//! Configuration commands.

use std::time::Duration;

use timefree_api::BackendClient;

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

/// Dumps the resolved configuration as TOML.
pub fn dump(config: &AppConfig) -> ClientResult<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("could not serialize config: {}", e)))?;
    print!("{}", rendered);
    Ok(())
}

/// Validates the configuration: backend URL well-formed, client ID
/// secret references resolvable, callback port range sane.
pub fn validate(config: &AppConfig) -> ClientResult<()> {
    BackendClient::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout),
    )
    .map_err(|e| ClientError::Config(format!("backend.base_url: {}", e)))?;

    config
        .auth
        .resolve_client_id()
        .map_err(ClientError::Config)?;

    if config.callback.port_min > config.callback.port_max {
        return Err(ClientError::Config(format!(
            "callback port range is empty ({}-{})",
            config.callback.port_min, config.callback.port_max
        )));
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Prints the default configuration file path.
pub fn path() -> ClientResult<()> {
    println!("{}", AppConfig::default_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CallbackSettings;

    #[test]
    fn default_config_validates() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn bad_backend_url_fails_validation() {
        let mut config = AppConfig::default();
        config.backend.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn inverted_port_range_fails_validation() {
        let mut config = AppConfig::default();
        config.callback = CallbackSettings {
            port_min: 9000,
            port_max: 8000,
            timeout: 300,
        };
        assert!(matches!(validate(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn dump_round_trips() {
        let config = AppConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.backend.base_url, config.backend.base_url);
        assert_eq!(parsed.callback.port_min, config.callback.port_min);
    }
}
