use crate::persona::Mode;
use serde::{Deserialize, Serialize};

/// Slash command typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// `/mode` with no argument prints the current mode.
    Mode { mode: Option<Mode> },
    History,
    Prompt,
    Help,
    Quit,
    /// A slash command that could not be understood.
    Invalid { message: String },
}

pub const HELP_TEXT: &str = "\
/mode [professional|casual]  switch mode (or show the current one)
/history                     print the current mode's transcript
/prompt                      print the assembled system prompt
/help                        show this list
/quit                        leave the chat";
