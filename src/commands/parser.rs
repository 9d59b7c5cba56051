use super::types::Command;
use crate::persona::Mode;

/// Parse a chat line. Returns `None` for ordinary messages.
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?.to_lowercase();
    let args = parts.next().unwrap_or("").trim();

    let command = match cmd.as_str() {
        "/mode" if args.is_empty() => Command::Mode { mode: None },
        "/mode" => match args.parse::<Mode>() {
            Ok(mode) => Command::Mode { mode: Some(mode) },
            Err(e) => Command::Invalid {
                message: e.to_string(),
            },
        },
        "/history" => Command::History,
        "/prompt" => Command::Prompt,
        "/help" | "/?" => Command::Help,
        "/quit" | "/exit" | "/q" => Command::Quit,
        other => Command::Invalid {
            message: format!("unknown command {other}; try /help"),
        },
    };
    Some(command)
}
