//! Static tone rules per mode.
//!
//! Everything here is data: the slang vocabulary, the banned fillers and the
//! fallback sentences live in tables so prompt assembly never hard-codes
//! phrasing of its own.

use super::Mode;
use crate::config::schema::DEFAULT_PERSONA_NAME;
use std::fmt::Write as _;

pub const PROFESSIONAL_FALLBACK: &str = "I don't have that information available.";
pub const CASUAL_FALLBACK: &str = "not sure about that one lad";

/// Slang the casual register may use.
pub const CASUAL_SLANG: [&str; 12] = [
    "lad", "mate", "innit", "bare", "peak", "calm", "safe", "proper", "lowkey", "ngl", "tbh", "fr",
];

/// Words and fillers the casual register must never use.
pub const CASUAL_BANNED: [&str; 9] = [
    "delve",
    "moreover",
    "furthermore",
    "indeed",
    "utilize",
    "um",
    "uh",
    "kindly",
    "as an ai",
];

const PROFESSIONAL_STYLE_RULES: [&str; 6] = [
    "Match the professional tone and structure from the provided writing samples.",
    "Use clear, concise and grammatically formal language.",
    "Maintain appropriate formality for business contexts.",
    "Never use slang, casual language or contractions.",
    "Never use the em dash character (—); use commas, colons or separate sentences instead.",
    "Write in complete sentences with standard capitalisation.",
];

const CASUAL_STYLE_RULES: [&str; 4] = [
    "Write entirely in lowercase.",
    "Match the casual tone, slang and energy from the provided writing samples.",
    "Be relaxed, conversational and authentic; contractions are fine.",
    "Never use formal or stiff language.",
];

/// Returns the sentence used for unknown personal facts in `mode`.
pub fn fallback_sentence(mode: Mode) -> &'static str {
    match mode {
        Mode::Professional => PROFESSIONAL_FALLBACK,
        Mode::Casual => CASUAL_FALLBACK,
    }
}

/// Instruction block for the default persona.
pub fn instructions_for(mode: Mode) -> String {
    PersonaPolicy::default().instructions(mode)
}

/// Persona-wide instruction renderer. The only parameter beyond the mode is
/// the name of the person being simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaPolicy {
    name: String,
}

impl Default for PersonaPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA_NAME)
    }
}

impl PersonaPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            DEFAULT_PERSONA_NAME.to_string()
        } else {
            name.trim().to_string()
        };
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self, mode: Mode) -> String {
        let name = &self.name;
        let mut out = format!(
            "You are {name}. You can use general knowledge to answer questions, but your writing \
             style MUST match {name}'s {mode} style exactly.\n\nCRITICAL STYLE RULES:\n"
        );

        let rules: &[&str] = match mode {
            Mode::Professional => &PROFESSIONAL_STYLE_RULES,
            Mode::Casual => &CASUAL_STYLE_RULES,
        };
        let mut index = 1;
        for rule in rules {
            let _ = writeln!(out, "{index}. {rule}");
            index += 1;
        }
        if mode == Mode::Casual {
            let _ = writeln!(
                out,
                "{index}. Slang you may use: {}.",
                CASUAL_SLANG.join(", ")
            );
            index += 1;
            let _ = writeln!(
                out,
                "{index}. Never use these words or fillers: {}.",
                CASUAL_BANNED.join(", ")
            );
        }

        let _ = write!(
            out,
            "\nCONTENT RULES:\n\
             1. You can use general knowledge to answer questions.\n\
             2. For personal details about {name}, use only the identity card and knowledge samples.\n\
             3. If you don't know something personal, say \"{}\"\n",
            fallback_sentence(mode)
        );
        out
    }
}
