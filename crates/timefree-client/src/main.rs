//! timefree CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use timefree_client::app::App;
use timefree_client::cli::{Cli, Command, ConfigAction};
use timefree_client::config::AppConfig;
use timefree_client::error::{ClientError, ClientResult};
use timefree_client::commands;

use timefree_core::tracing::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: could not initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Resolve configuration once; everything downstream gets it injected.
    let mut config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        AppConfig::load().unwrap_or_default()
    };
    if let Some(ref backend) = cli.backend {
        config.backend.base_url = backend.clone();
    }

    match cli.command {
        // Config commands do not need a running application.
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
        command => {
            let mut app = App::new(&config)?;
            app.init();

            match command {
                None | Some(Command::Status) => commands::session::status(&app, &config),
                Some(Command::Login {
                    credential,
                    credential_file,
                }) => {
                    commands::login::run(
                        &mut app,
                        credential,
                        credential_file,
                        cli.backend.as_deref(),
                    )
                    .await
                }
                Some(Command::Connect) => commands::connect::run(&mut app).await,
                Some(Command::Analyze {
                    auto,
                    period,
                    file,
                    text,
                }) => commands::analyze::run(&mut app, auto, period, file, text, cli.json).await,
                Some(Command::Reset) => commands::session::reset(&mut app),
                Some(Command::Logout) => commands::session::logout(&mut app),
                Some(Command::Config { .. }) => unreachable!(),
            }
        }
    }
}
