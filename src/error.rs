use crate::persona::Mode;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `meetyourmaker`.
///
/// Each subsystem defines its own error type. Library callers can match on
/// these to decide how to surface a failure; adapter and CLI code continues to
/// use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum MakerError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Sample store ────────────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Sample retrieval ────────────────────────────────────────────────
    #[error("samples: {0}")]
    SampleFetch(#[from] SampleFetchError),

    // ── Completion service ──────────────────────────────────────────────
    #[error("completion: {0}")]
    Completion(#[from] CompletionError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Store errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection {collection} is unreadable: {message}")]
    Unreadable { collection: String, message: String },

    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("write to {collection} failed: {message}")]
    Write { collection: String, message: String },

    #[error("invalid sample: {0}")]
    Invalid(String),
}

// ─── Sample retrieval errors ────────────────────────────────────────────────

/// Raised only when every source for the active mode failed. Partial
/// failures degrade to empty sequences and never reach this type.
#[derive(Debug, Error)]
pub enum SampleFetchError {
    #[error("Unable to load writing samples. Please try again.")]
    AllSourcesFailed { mode: Mode },
}

// ─── Completion errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("{0}")]
    Request(String),

    #[error("The response took longer than {secs}s. Please try again.")]
    Timeout { secs: u64 },

    #[error("completion API key not set. Set OPENAI_API_KEY or edit config.toml.")]
    MissingApiKey,
}

impl CompletionError {
    /// Text shown in the inline error banner.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            GENERIC_COMPLETION_FAILURE.to_string()
        } else {
            text
        }
    }
}

pub const GENERIC_COMPLETION_FAILURE: &str = "Failed to generate response. Please try again.";
