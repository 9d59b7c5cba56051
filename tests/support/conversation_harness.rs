#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use meetyourmaker::conversation::{ConversationEngine, EngineOptions};
use meetyourmaker::error::{CompletionError, StoreError};
use meetyourmaker::persona::Mode;
use meetyourmaker::providers::{Completion, CompletionRequest, Provider};
use meetyourmaker::store::{
    Collection, IdentityCard, MemoryStore, SampleDraft, SampleStore, SampleType, WritingSample,
};

/// Provider that answers from a script and records every request.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<Completion, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_reply(&self, text: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(Completion::text(text)));
    }

    pub fn push_empty(&self) {
        self.replies.lock().unwrap().push_back(Ok(Completion::empty()));
    }

    pub fn push_error(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(completion)) => Ok(completion),
            Some(Err(message)) => Err(CompletionError::Request(message)),
            None => Ok(Completion::text("ok")),
        }
    }
}

/// Provider that blocks every call until released.
#[derive(Default)]
pub struct GatedProvider {
    pub entered: Notify,
    release: Notify,
    fail: bool,
}

impl GatedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Released calls fail instead of echoing.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl Provider for GatedProvider {
    fn name(&self) -> &str {
        "gated"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        self.entered.notify_one();
        self.release.notified().await;
        if self.fail {
            return Err(CompletionError::Request(
                "OpenAI API error (502): bad gateway".into(),
            ));
        }
        let last = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(Completion::text(format!("re: {last}")))
    }
}

/// Memory store whose `RAW` listings can be held open, to order fetches,
/// and whose reads can be switched off.
#[derive(Default)]
pub struct GatedStore {
    pub inner: MemoryStore,
    raw_gate: Mutex<Option<Arc<Notify>>>,
    offline: AtomicBool,
}

impl GatedStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make subsequent `RAW` listings wait for [`GatedStore::release_raw`].
    pub fn hold_raw(&self) {
        *self.raw_gate.lock().unwrap() = Some(Arc::new(Notify::new()));
    }

    /// Make every read fail until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self, collection: &str) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unreadable {
                collection: collection.to_string(),
                message: "connection refused".into(),
            });
        }
        Ok(())
    }

    pub fn release_raw(&self) {
        if let Some(gate) = self.raw_gate.lock().unwrap().take() {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl SampleStore for GatedStore {
    fn name(&self) -> &str {
        "gated"
    }

    async fn list(&self, collection: Collection) -> Result<Vec<WritingSample>, StoreError> {
        self.check_online(collection.as_str())?;
        if collection == Collection::Raw {
            let gate = self.raw_gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }
        self.inner.list(collection).await
    }

    async fn list_by_type(
        &self,
        collection: Collection,
        sample_type: SampleType,
    ) -> Result<Vec<WritingSample>, StoreError> {
        self.check_online(collection.as_str())?;
        self.inner.list_by_type(collection, sample_type).await
    }

    async fn identity(&self) -> Result<Option<IdentityCard>, StoreError> {
        self.check_online("identity")?;
        self.inner.identity().await
    }

    async fn create_sample(
        &self,
        collection: Collection,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        self.inner.create_sample(collection, draft).await
    }

    async fn update_sample(
        &self,
        collection: Collection,
        id: &str,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        self.inner.update_sample(collection, id, draft).await
    }

    async fn delete_sample(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.inner.delete_sample(collection, id).await
    }

    async fn put_identity(&self, card: &IdentityCard) -> Result<(), StoreError> {
        self.inner.put_identity(card).await
    }
}

pub fn draft(content: &str, sample_type: Option<SampleType>, category: Option<&str>) -> SampleDraft {
    SampleDraft {
        content: content.to_string(),
        context: format!("{content} context"),
        category: category.map(ToString::to_string),
        sample_type,
    }
}

pub fn engine_with(
    provider: Arc<dyn Provider>,
    store: Arc<dyn SampleStore>,
    mode: Mode,
) -> ConversationEngine {
    ConversationEngine::new(
        provider,
        store,
        EngineOptions {
            initial_mode: mode,
            ..EngineOptions::default()
        },
    )
    .unwrap()
}

pub fn contents(samples: &[WritingSample]) -> Vec<String> {
    let mut out: Vec<String> = samples.iter().map(|s| s.content.clone()).collect();
    out.sort();
    out
}
