//! Session housekeeping commands: status, reset, logout.

use crate::app::App;
use crate::config::AppConfig;
use crate::error::ClientResult;
use crate::view;

/// Prints the current screen plus where things live on disk.
pub fn status(app: &App, config: &AppConfig) -> ClientResult<()> {
    print!("{}", view::render(app.state()));
    println!();
    println!("  Backend:   {}", config.backend.base_url);
    println!("  Config:    {}", AppConfig::default_path().display());
    println!("  Session:   {}", config.session_path().display());
    Ok(())
}

/// Clears the last result and pasted text; the session survives.
pub fn reset(app: &mut App) -> ClientResult<()> {
    app.reset();
    println!("Cleared the last analysis.");
    Ok(())
}

/// Signs out and forgets the stored session.
pub fn logout(app: &mut App) -> ClientResult<()> {
    app.logout();
    println!("Signed out.");
    Ok(())
}
