use super::retrieval::{SampleSet, load_identity, load_samples};
use super::transcript::{Message, Transcript};
use crate::config::Config;
use crate::error::{CompletionError, GENERIC_COMPLETION_FAILURE};
use crate::persona::{Mode, PersonaPolicy};
use crate::prompt::PromptBuilder;
use crate::providers::{ChatMessage, Completion, CompletionRequest, Provider};
use crate::store::{IdentityCard, SampleStore, WritingSample};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Construction parameters for [`ConversationEngine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub model: String,
    pub persona: PersonaPolicy,
    pub initial_mode: Mode,
    /// Upper bound for one completion call. `0` waits indefinitely.
    pub timeout_secs: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4".into(),
            persona: PersonaPolicy::default(),
            initial_mode: Mode::default(),
            timeout_secs: 0,
        }
    }
}

impl EngineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.completion.model.clone(),
            persona: PersonaPolicy::new(config.persona_name.clone()),
            initial_mode: Mode::default(),
            timeout_secs: config.completion.timeout_secs,
        }
    }
}

/// What a call to [`ConversationEngine::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or a reply was already pending. Nothing changed.
    Ignored,
    /// The assistant answered and the reply was appended.
    Replied(String),
    /// The service answered without text; only the user message was kept.
    EmptyReply,
    /// The call failed; the message is also stored as the last error.
    Failed(String),
}

/// A submitted turn: the mode it was issued in and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub mode: Mode,
    pub outcome: SubmitOutcome,
}

impl Turn {
    fn ignored(mode: Mode) -> Self {
        Self {
            mode,
            outcome: SubmitOutcome::Ignored,
        }
    }
}

/// Result of applying a sample/identity fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// The mode changed while the fetch was in flight; its result was dropped.
    Discarded,
    Failed(String),
}

/// Point-in-time copy of the engine state.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub mode: Mode,
    pub history: Transcript,
    pub professional: Transcript,
    pub casual: Transcript,
    pub style_samples: Vec<WritingSample>,
    pub knowledge_samples: Vec<WritingSample>,
    pub identity: IdentityCard,
    pub pending: bool,
    pub last_error: Option<String>,
}

struct State {
    mode: Mode,
    professional: Transcript,
    casual: Transcript,
    samples: SampleSet,
    identity: IdentityCard,
    pending: bool,
    last_error: Option<String>,
}

impl State {
    fn history(&self, mode: Mode) -> &Transcript {
        match mode {
            Mode::Professional => &self.professional,
            Mode::Casual => &self.casual,
        }
    }

    fn set_history(&mut self, mode: Mode, transcript: Transcript) {
        match mode {
            Mode::Professional => self.professional = transcript,
            Mode::Casual => self.casual = transcript,
        }
    }
}

struct Inner {
    provider: Arc<dyn Provider>,
    store: Arc<dyn SampleStore>,
    prompt: PromptBuilder,
    model: String,
    timeout: Option<Duration>,
    state: Mutex<State>,
}

/// Per-mode chat state machine.
///
/// Cloning is cheap and every clone drives the same conversation. At most
/// one completion call is in flight; sample fetches run independently and
/// are applied only if their mode is still current when they resolve.
#[derive(Clone)]
pub struct ConversationEngine {
    inner: Arc<Inner>,
}

impl ConversationEngine {
    pub fn new(
        provider: Arc<dyn Provider>,
        store: Arc<dyn SampleStore>,
        options: EngineOptions,
    ) -> anyhow::Result<Self> {
        let state = State {
            mode: options.initial_mode,
            professional: Transcript::seeded(Mode::Professional.greeting()),
            casual: Transcript::seeded(Mode::Casual.greeting()),
            samples: SampleSet::default(),
            identity: IdentityCard::default(),
            pending: false,
            last_error: None,
        };

        Ok(Self {
            inner: Arc::new(Inner {
                provider,
                store,
                prompt: PromptBuilder::new(options.persona)?,
                model: options.model,
                timeout: (options.timeout_secs > 0)
                    .then(|| Duration::from_secs(options.timeout_secs)),
                state: Mutex::new(state),
            }),
        })
    }

    pub async fn mode(&self) -> Mode {
        self.inner.state.lock().await.mode
    }

    pub async fn history(&self, mode: Mode) -> Transcript {
        self.inner.state.lock().await.history(mode).clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.inner.state.lock().await.last_error.clone()
    }

    pub async fn is_pending(&self) -> bool {
        self.inner.state.lock().await.pending
    }

    pub async fn snapshot(&self) -> ConversationSnapshot {
        let state = self.inner.state.lock().await;
        ConversationSnapshot {
            mode: state.mode,
            history: state.history(state.mode).clone(),
            professional: state.professional.clone(),
            casual: state.casual.clone(),
            style_samples: state.samples.style.clone(),
            knowledge_samples: state.samples.knowledge.clone(),
            identity: state.identity.clone(),
            pending: state.pending,
            last_error: state.last_error.clone(),
        }
    }

    /// Assemble the system prompt from the currently held context.
    pub async fn system_prompt(&self) -> anyhow::Result<String> {
        let state = self.inner.state.lock().await;
        self.inner.prompt.build(
            state.mode,
            &state.identity,
            &state.samples.style,
            &state.samples.knowledge,
        )
    }

    /// Reload samples and identity for the current mode.
    pub async fn refresh(&self) -> RefreshOutcome {
        let mode = self.mode().await;
        self.load_context(mode).await
    }

    /// Select `mode`. Returns the handle of the context fetch it started, or
    /// `None` when `mode` was already current.
    pub async fn switch_mode(&self, mode: Mode) -> Option<JoinHandle<RefreshOutcome>> {
        {
            let mut state = self.inner.state.lock().await;
            if state.mode == mode {
                return None;
            }
            state.mode = mode;
            state.last_error = None;

            let history = state.history(mode);
            if history.is_empty() || history.is_greeting_only() {
                state.set_history(mode, Transcript::seeded(mode.greeting()));
            }
        }
        tracing::info!(mode = mode.as_str(), "switched mode");

        let engine = self.clone();
        Some(tokio::spawn(async move { engine.load_context(mode).await }))
    }

    async fn load_context(&self, issued: Mode) -> RefreshOutcome {
        let store = self.inner.store.as_ref();
        let (samples, identity) = tokio::join!(load_samples(store, issued), load_identity(store));

        let mut state = self.inner.state.lock().await;
        if state.mode != issued {
            tracing::debug!(
                issued = issued.as_str(),
                current = state.mode.as_str(),
                "discarding stale context fetch"
            );
            return RefreshOutcome::Discarded;
        }

        state.identity = identity;
        match samples {
            Ok(samples) => {
                tracing::debug!(
                    mode = issued.as_str(),
                    style = samples.style.len(),
                    knowledge = samples.knowledge.len(),
                    "context loaded"
                );
                state.samples = samples;
                RefreshOutcome::Applied
            }
            Err(error) => {
                let message = error.to_string();
                state.last_error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    /// Send `text` as the user's next message in the current mode.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        self.submit_turn(text).await.outcome
    }

    /// Like [`ConversationEngine::submit`], also reporting the mode the turn
    /// was issued in.
    ///
    /// The completion call and its bookkeeping run on their own task, so
    /// dropping this future never leaves the engine awaiting a reply.
    pub async fn submit_turn(&self, text: &str) -> Turn {
        let text = text.trim();

        let (mode, request) = {
            let mut state = self.inner.state.lock().await;
            let mode = state.mode;
            if text.is_empty() {
                return Turn::ignored(mode);
            }
            if state.pending {
                tracing::debug!("reply already pending; ignoring submit");
                return Turn::ignored(mode);
            }

            let history = state.history(mode).appended(Message::user(text));
            state.set_history(mode, history.clone());
            state.last_error = None;

            let system = match self.inner.prompt.build(
                mode,
                &state.identity,
                &state.samples.style,
                &state.samples.knowledge,
            ) {
                Ok(system) => system,
                Err(error) => {
                    tracing::error!(%error, "prompt assembly failed");
                    let message = format!("Failed to assemble prompt: {error}");
                    state.last_error = Some(message.clone());
                    return Turn {
                        mode,
                        outcome: SubmitOutcome::Failed(message),
                    };
                }
            };
            state.pending = true;

            let mut messages = Vec::with_capacity(history.len() + 1);
            messages.push(ChatMessage::system(system));
            messages.extend(history.messages().iter().map(ChatMessage::from));

            let request = CompletionRequest {
                model: self.inner.model.clone(),
                messages,
                temperature: mode.temperature(),
            };
            (mode, request)
        };

        tracing::debug!(
            mode = mode.as_str(),
            provider = self.inner.provider.name(),
            messages = request.messages.len(),
            "requesting completion"
        );
        let engine = self.clone();
        let call = tokio::spawn(async move { engine.finish_turn(mode, request).await });

        let outcome = match call.await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::error!(%error, "completion task failed");
                let message = GENERIC_COMPLETION_FAILURE.to_string();
                let mut state = self.inner.state.lock().await;
                state.pending = false;
                if state.mode == mode {
                    state.last_error = Some(message.clone());
                }
                SubmitOutcome::Failed(message)
            }
        };
        Turn { mode, outcome }
    }

    /// Await the completion for a turn issued in `mode` and record its result.
    async fn finish_turn(&self, mode: Mode, request: CompletionRequest) -> SubmitOutcome {
        let result = self.complete(&request).await;

        let mut state = self.inner.state.lock().await;
        state.pending = false;
        match result {
            Ok(completion) => match completion.reply() {
                Some(reply) => {
                    let reply = reply.to_string();
                    let history = state
                        .history(mode)
                        .appended(Message::assistant(reply.clone()));
                    state.set_history(mode, history);
                    SubmitOutcome::Replied(reply)
                }
                None => {
                    tracing::warn!(mode = mode.as_str(), "completion returned no text");
                    SubmitOutcome::EmptyReply
                }
            },
            Err(error) => {
                tracing::warn!(mode = mode.as_str(), %error, "completion failed");
                let message = error.user_message();
                // The banner belongs to the visible mode only.
                if state.mode == mode {
                    state.last_error = Some(message.clone());
                }
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, CompletionError> {
        let call = self.inner.provider.complete(request);
        match self.inner.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| CompletionError::Timeout {
                    secs: limit.as_secs(),
                })?,
            None => call.await,
        }
    }
}
