//! CLI subcommand implementations.

pub mod analyze;
pub mod config;
pub mod connect;
pub mod login;
pub mod session;
