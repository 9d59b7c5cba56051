use clap::Subcommand;
use serde::{Deserialize, Serialize};

/// Writing sample management subcommands
#[derive(Subcommand, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SampleCommands {
    /// List samples in a collection
    List {
        /// Collection to read (knowledge_chunks, RAW)
        #[arg(short, long, default_value = "knowledge_chunks")]
        collection: String,
        /// Only samples of this type (professional, casual)
        #[arg(short = 't', long = "type")]
        sample_type: Option<String>,
    },
    /// Add a sample
    Add {
        /// Collection to write (knowledge_chunks, RAW)
        #[arg(short, long, default_value = "knowledge_chunks")]
        collection: String,
        /// Sample text
        #[arg(long)]
        content: String,
        /// Where the text came from (email, group chat, ...)
        #[arg(long)]
        context: String,
        /// Category label; required for knowledge_chunks
        #[arg(long)]
        category: Option<String>,
        /// Register the sample was written in (professional, casual)
        #[arg(short = 't', long = "type")]
        sample_type: Option<String>,
    },
    /// Replace the fields of an existing sample
    Update {
        /// Collection holding the sample
        #[arg(short, long, default_value = "knowledge_chunks")]
        collection: String,
        /// Sample id
        id: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        context: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(short = 't', long = "type")]
        sample_type: Option<String>,
    },
    /// Delete a sample
    Delete {
        /// Collection holding the sample
        #[arg(short, long, default_value = "knowledge_chunks")]
        collection: String,
        /// Sample id
        id: String,
    },
}

/// Identity card subcommands
#[derive(Subcommand, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum IdentityCommands {
    /// Print the stored identity card
    Show,
    /// Replace the identity card; omitted fields are cleared
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        occupation: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
}
