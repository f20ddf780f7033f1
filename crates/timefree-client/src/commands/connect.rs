//! Calendar authorization command.

use crate::app::App;
use crate::error::{ClientError, ClientResult};

/// Runs the calendar-authorization hand-off and reports the outcome.
pub async fn run(app: &mut App) -> ClientResult<()> {
    println!("Opening your browser to authorize calendar access...");
    println!("Waiting for the authorization to complete.");
    println!();

    app.connect_calendar().await?;

    match app.state().error() {
        None => {
            println!("Calendar connected.");
            println!();
            println!("Run `timefree analyze --auto` to get your score.");
            Ok(())
        }
        Some(message) => Err(ClientError::Callback(message.to_string())),
    }
}
