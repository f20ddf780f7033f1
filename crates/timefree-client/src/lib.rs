//! CLI, application state, backend calls, rendering
//!
//! This crate provides the `timefree` command-line interface.

pub mod app;
pub mod callback;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;
pub mod state;
pub mod store;
pub mod view;

pub use app::App;
pub use cli::Cli;
pub use error::{ClientError, ClientResult};
