mod mode;
pub mod policy;

pub use mode::{Mode, ParseModeError};
pub use policy::{PersonaPolicy, fallback_sentence, instructions_for};
