use std::sync::Arc;

use async_trait::async_trait;

use meetyourmaker::admin::Admin;
use meetyourmaker::conversation::{Message, RefreshOutcome, SubmitOutcome};
use meetyourmaker::error::StoreError;
use meetyourmaker::persona::Mode;
use meetyourmaker::store::{
    Collection, IdentityCard, MemoryStore, SampleDraft, SampleStore, SampleType, WritingSample,
};

use super::conversation_harness::{
    GatedStore, ScriptedProvider, contents, draft, engine_with,
};

/// Store with nothing readable behind it.
struct OfflineStore;

fn offline(collection: Collection) -> StoreError {
    StoreError::Unreadable {
        collection: collection.to_string(),
        message: "connection refused".into(),
    }
}

#[async_trait]
impl SampleStore for OfflineStore {
    fn name(&self) -> &str {
        "offline"
    }

    async fn list(&self, collection: Collection) -> Result<Vec<WritingSample>, StoreError> {
        Err(offline(collection))
    }

    async fn list_by_type(
        &self,
        collection: Collection,
        _sample_type: SampleType,
    ) -> Result<Vec<WritingSample>, StoreError> {
        Err(offline(collection))
    }

    async fn identity(&self) -> Result<Option<IdentityCard>, StoreError> {
        Err(StoreError::Unreadable {
            collection: "identity".into(),
            message: "connection refused".into(),
        })
    }

    async fn create_sample(
        &self,
        collection: Collection,
        _draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        Err(offline(collection))
    }

    async fn update_sample(
        &self,
        collection: Collection,
        _id: &str,
        _draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        Err(offline(collection))
    }

    async fn delete_sample(&self, collection: Collection, _id: &str) -> Result<(), StoreError> {
        Err(offline(collection))
    }

    async fn put_identity(&self, _card: &IdentityCard) -> Result<(), StoreError> {
        Err(offline(Collection::KnowledgeChunks))
    }
}

#[tokio::test]
async fn completion_failure_keeps_user_message_and_sets_error() {
    let provider = ScriptedProvider::new();
    provider.push_error("OpenAI API error (503): overloaded");
    let engine = engine_with(
        provider,
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    let outcome = engine.submit("test").await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("OpenAI API error (503): overloaded".into())
    );

    let snapshot = engine.snapshot().await;
    assert!(!snapshot.pending);
    assert_eq!(
        snapshot.last_error.as_deref(),
        Some("OpenAI API error (503): overloaded")
    );
    assert_eq!(
        snapshot.history.messages(),
        &[
            Message::assistant("hello — how can I assist you today?"),
            Message::user("test"),
        ]
    );
}

#[tokio::test]
async fn next_submit_after_failure_clears_error() {
    let provider = ScriptedProvider::new();
    provider.push_error("OpenAI request failed: timeout");
    provider.push_reply("Apologies for the delay.");
    let engine = engine_with(
        provider,
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    engine.submit("first").await;
    assert!(engine.last_error().await.is_some());

    assert_eq!(
        engine.submit("second").await,
        SubmitOutcome::Replied("Apologies for the delay.".into())
    );
    assert!(engine.last_error().await.is_none());
    assert_eq!(engine.history(Mode::Professional).await.len(), 4);
}

#[tokio::test]
async fn blank_reply_appends_nothing_and_raises_no_error() {
    let provider = ScriptedProvider::new();
    provider.push_empty();
    provider.push_reply("   ");
    let engine = engine_with(provider, Arc::new(MemoryStore::new()), Mode::Casual);

    assert_eq!(engine.submit("yo").await, SubmitOutcome::EmptyReply);
    assert_eq!(engine.submit("you there").await, SubmitOutcome::EmptyReply);

    let snapshot = engine.snapshot().await;
    assert!(snapshot.last_error.is_none());
    assert!(!snapshot.pending);
    assert_eq!(
        snapshot.history.messages()[1..],
        [Message::user("yo"), Message::user("you there")]
    );
}

#[tokio::test]
async fn unreadable_store_surfaces_banner_but_chat_still_works() {
    let provider = ScriptedProvider::new();
    provider.push_reply("Understood.");
    let engine = engine_with(provider.clone(), Arc::new(OfflineStore), Mode::Professional);

    let outcome = engine.refresh().await;
    assert_eq!(
        outcome,
        RefreshOutcome::Failed("Unable to load writing samples. Please try again.".into())
    );
    assert_eq!(
        engine.last_error().await.as_deref(),
        Some("Unable to load writing samples. Please try again.")
    );

    assert_eq!(
        engine.submit("hello").await,
        SubmitOutcome::Replied("Understood.".into())
    );
    let system = &provider.requests()[0].messages[0].content;
    assert!(system.contains("There are currently no saved style examples for this mode."));
    assert!(!system.contains("Authoritative identity"));
}

#[tokio::test]
async fn failed_refresh_keeps_previous_samples() {
    let store = GatedStore::new();
    Admin::new(store.clone())
        .create(
            Collection::KnowledgeChunks,
            &draft("Best regards", Some(SampleType::Professional), Some("email")),
        )
        .await
        .unwrap();

    let engine = engine_with(ScriptedProvider::new(), store.clone(), Mode::Professional);
    assert_eq!(engine.refresh().await, RefreshOutcome::Applied);
    let loaded = engine.snapshot().await;
    assert_eq!(contents(&loaded.style_samples), vec!["Best regards"]);

    store.set_offline(true);
    assert_eq!(
        engine.refresh().await,
        RefreshOutcome::Failed("Unable to load writing samples. Please try again.".into())
    );

    let after = engine.snapshot().await;
    assert_eq!(after.style_samples, loaded.style_samples);
    assert_eq!(after.knowledge_samples, loaded.knowledge_samples);
    assert_eq!(
        after.last_error.as_deref(),
        Some("Unable to load writing samples. Please try again.")
    );
}
