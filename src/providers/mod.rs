pub mod http_client;
pub mod openai;
pub mod scrub;
pub mod traits;
pub mod types;

pub use http_client::{build_http_client, build_http_client_with_timeout};
pub use openai::OpenAiProvider;
pub use scrub::{api_error_message, sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;
pub use types::{ChatMessage, Completion, CompletionRequest, MessageRole};
