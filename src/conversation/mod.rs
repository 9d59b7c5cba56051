pub mod engine;
pub mod retrieval;
pub mod transcript;

pub use engine::{
    ConversationEngine, ConversationSnapshot, EngineOptions, RefreshOutcome, SubmitOutcome,
    Turn,
};
pub use retrieval::{SampleSet, load_identity, load_samples};
pub use transcript::{Message, Role, Transcript};
