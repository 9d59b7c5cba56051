use clap::{Parser, Subcommand};
use meetyourmaker::{IdentityCommands, SampleCommands};

/// `meetyourmaker` - talk to a simulated persona in professional or casual mode.
#[derive(Parser, Debug)]
#[command(name = "meetyourmaker")]
#[command(version)]
#[command(about = "Converse with a simulated persona grounded in stored writing samples.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat (type /help for commands)
    Chat {
        /// Mode to start in (professional, casual)
        #[arg(short, long, default_value = "professional")]
        mode: String,
    },

    /// Send a single message and print the reply
    Ask {
        /// Mode to answer in (professional, casual)
        #[arg(short, long, default_value = "professional")]
        mode: String,

        /// Message to send
        message: String,
    },

    /// Start the HTTP gateway
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage stored writing samples
    Samples {
        #[command(subcommand)]
        sample_command: SampleCommands,
    },

    /// Show or replace the identity card
    Identity {
        #[command(subcommand)]
        identity_command: IdentityCommands,
    },

    /// Print the system prompt assembled for a mode
    Prompt {
        /// Mode to assemble for (professional, casual)
        #[arg(short, long, default_value = "professional")]
        mode: String,
    },

    /// Show the effective configuration
    Status,
}
