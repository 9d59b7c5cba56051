#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod admin;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod gateway;
pub mod persona;
pub mod prompt;
pub mod providers;
pub mod store;

pub use commands::{IdentityCommands, SampleCommands};
pub use config::Config;
pub use conversation::{ConversationEngine, SubmitOutcome};
pub use error::MakerError;
pub use persona::Mode;
