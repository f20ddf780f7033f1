//! Analysis command.

use std::io::Read;
use std::path::PathBuf;

use timefree_core::TimePeriod;

use crate::app::App;
use crate::error::{ClientError, ClientResult};
use crate::view;

/// Runs an analysis and prints the result panel (or JSON).
///
/// `--auto` analyzes the connected calendar; otherwise calendar text is
/// taken from `--text`, `--file`, or stdin, in that order.
pub async fn run(
    app: &mut App,
    auto: bool,
    period: TimePeriod,
    file: Option<PathBuf>,
    text: Option<String>,
    json: bool,
) -> ClientResult<()> {
    app.state_mut().set_period(period);

    if auto {
        app.analyze_auto().await?;
    } else {
        let calendar_text = read_calendar_text(file, text)?;
        app.state_mut().set_manual_mode(true);
        app.state_mut().set_calendar_text(calendar_text);
        app.analyze_manual().await?;
    }

    match app.state().result() {
        Some(result) => {
            if json {
                println!("{}", view::render_json(result));
            } else {
                print!("{}", view::result_panel(result));
            }
            Ok(())
        }
        None => {
            let message = app
                .state()
                .error()
                .unwrap_or("analysis produced no result")
                .to_string();
            Err(ClientError::Input(message))
        }
    }
}

/// Collects manual calendar text: inline flag, file, or stdin.
fn read_calendar_text(file: Option<PathBuf>, text: Option<String>) -> ClientResult<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_wins_over_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cal.txt");
        std::fs::write(&path, "from file").unwrap();

        let text = read_calendar_text(Some(path), Some("inline".into())).unwrap();
        assert_eq!(text, "inline");
    }

    #[test]
    fn file_text_is_read_whole() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cal.txt");
        std::fs::write(&path, "Mon 9am standup\nTue 2pm sync\n").unwrap();

        let text = read_calendar_text(Some(path), None).unwrap();
        assert_eq!(text, "Mon 9am standup\nTue 2pm sync\n");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = read_calendar_text(Some(PathBuf::from("/nonexistent/cal.txt")), None);
        assert!(matches!(result, Err(ClientError::Io(_))));
    }
}
