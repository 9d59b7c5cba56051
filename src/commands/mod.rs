pub mod parser;
pub mod subcommands;
pub mod types;

pub use parser::parse_command;
pub use subcommands::{IdentityCommands, SampleCommands};
pub use types::{Command, HELP_TEXT};
