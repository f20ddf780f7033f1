//! Sign-in command.

use std::io::Read;
use std::path::PathBuf;

use tracing::info;

use crate::app::App;
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

/// Runs the sign-in flow.
///
/// The credential comes from `--credential` (with secret-reference
/// expansion), `--credential-file`, or stdin. When `--backend` was given
/// on the command line, the chosen base URL is persisted to `config.toml`
/// so later invocations talk to the same backend.
pub async fn run(
    app: &mut App,
    credential: Option<String>,
    credential_file: Option<PathBuf>,
    backend_override: Option<&str>,
) -> ClientResult<()> {
    let credential = resolve_credential(credential, credential_file)?;

    app.sign_in(&credential).await?;

    match app.state().session() {
        Some(session) => {
            if let Some(backend) = backend_override {
                persist_backend_url(backend);
            }
            println!(
                "Signed in as {} <{}>.",
                session.user.name, session.user.email
            );
            println!();
            println!("Next: connect your calendar with `timefree connect`,");
            println!("then run `timefree analyze --auto`.");
            Ok(())
        }
        None => {
            let message = app
                .state()
                .error()
                .unwrap_or("sign-in failed")
                .to_string();
            Err(ClientError::Input(message))
        }
    }
}

/// Resolves the identity credential from its possible sources.
///
/// Priority (highest to lowest):
/// 1. `--credential` (secret references expanded)
/// 2. `--credential-file` (first line)
/// 3. stdin
fn resolve_credential(
    credential: Option<String>,
    credential_file: Option<PathBuf>,
) -> ClientResult<String> {
    if let Some(raw) = credential {
        return crate::secret::resolve(&raw).map_err(ClientError::Config);
    }

    if let Some(path) = credential_file {
        let content = std::fs::read_to_string(&path)?;
        return content
            .lines()
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ClientError::Input(format!("credential file {} is empty", path.display()))
            });
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let credential = input.trim().to_string();
    if credential.is_empty() {
        return Err(ClientError::Input(
            "no credential provided; pass --credential, --credential-file, or pipe it on stdin"
                .to_string(),
        ));
    }
    Ok(credential)
}

/// Persists the backend base URL to `config.toml`, preserving everything
/// else in the file.
fn persist_backend_url(base_url: &str) {
    let config_path = AppConfig::default_path();

    let content = if config_path.exists() {
        std::fs::read_to_string(&config_path).unwrap_or_default()
    } else {
        String::new()
    };

    let mut doc = match content.parse::<toml_edit::DocumentMut>() {
        Ok(d) => d,
        Err(e) => {
            info!("could not parse config.toml for writing: {}", e);
            return;
        }
    };

    if !doc.contains_key("backend") {
        doc["backend"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    if let Some(backend) = doc["backend"].as_table_mut() {
        backend["base_url"] = toml_edit::value(base_url);
    }

    if let Some(parent) = config_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            info!(
                "could not create config directory {}: {}",
                parent.display(),
                e
            );
            return;
        }
    }

    match std::fs::write(&config_path, doc.to_string()) {
        Ok(()) => info!("backend URL saved to {}", config_path.display()),
        Err(e) => info!(
            "could not save backend URL to {}: {}",
            config_path.display(),
            e
        ),
    }
}
