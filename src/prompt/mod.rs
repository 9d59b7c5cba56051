pub mod builder;
pub mod engine;

pub use builder::{PromptBuilder, build_system_prompt};
pub use engine::TeraEngine;
