use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tonal register of a conversation. Each mode owns its own transcript and
/// sample context.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Professional,
    Casual,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Professional, Mode::Casual];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Professional => "professional",
            Mode::Casual => "casual",
        }
    }

    /// Sampling temperature sent with every completion in this mode.
    pub fn temperature(self) -> f64 {
        match self {
            Mode::Professional => 0.7,
            Mode::Casual => 0.8,
        }
    }

    /// Fixed assistant message seeded before any user input.
    pub fn greeting(self) -> &'static str {
        match self {
            Mode::Professional => "hello — how can I assist you today?",
            Mode::Casual => "hey, what's up! i'm zain",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Professional => "professional discourse",
            Mode::Casual => "casual conversation",
        }
    }

    pub fn input_placeholder(self) -> &'static str {
        match self {
            Mode::Professional => "Enter your professional inquiry...",
            Mode::Casual => "What's on your mind?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode {0:?}; expected \"professional\" or \"casual\"")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("professional") {
            Ok(Mode::Professional)
        } else if normalized.eq_ignore_ascii_case("casual") {
            Ok(Mode::Casual)
        } else {
            Err(ParseModeError(raw.to_string()))
        }
    }
}
