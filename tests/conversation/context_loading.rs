use std::sync::Arc;

use meetyourmaker::admin::Admin;
use meetyourmaker::conversation::{RefreshOutcome, load_samples};
use meetyourmaker::persona::Mode;
use meetyourmaker::store::{Collection, IdentityCard, MemoryStore, SampleType};

use super::conversation_harness::{
    GatedStore, ScriptedProvider, contents, draft, engine_with,
};

#[tokio::test]
async fn admin_writes_are_what_retrieval_reads() {
    let store = Arc::new(MemoryStore::new());
    let admin = Admin::new(store.clone());

    admin
        .create(
            Collection::KnowledgeChunks,
            &draft("Kind regards", Some(SampleType::Professional), Some("email")),
        )
        .await
        .unwrap();
    admin
        .create(
            Collection::KnowledgeChunks,
            &draft("cheers lad", Some(SampleType::Casual), Some("chat")),
        )
        .await
        .unwrap();
    admin
        .create(Collection::Raw, &draft("proper peak innit", None, None))
        .await
        .unwrap();

    let professional = load_samples(store.as_ref(), Mode::Professional).await.unwrap();
    assert_eq!(contents(&professional.style), vec!["Kind regards"]);
    assert_eq!(professional.style, professional.knowledge);

    let casual = load_samples(store.as_ref(), Mode::Casual).await.unwrap();
    assert_eq!(contents(&casual.style), vec!["proper peak innit"]);
    assert_eq!(
        contents(&casual.knowledge),
        vec!["Kind regards", "cheers lad", "proper peak innit"]
    );
}

#[tokio::test]
async fn refreshed_context_flows_into_system_prompt() {
    let store = Arc::new(MemoryStore::new());
    let admin = Admin::new(store.clone());
    admin
        .create(
            Collection::KnowledgeChunks,
            &draft("Thank you for your time.", Some(SampleType::Professional), Some("email")),
        )
        .await
        .unwrap();
    admin
        .set_identity(&IdentityCard {
            name: Some("Zain".into()),
            occupation: Some("Engineer".into()),
            ..IdentityCard::default()
        })
        .await
        .unwrap();

    let provider = ScriptedProvider::new();
    let engine = engine_with(provider.clone(), store, Mode::Professional);

    let before = engine.system_prompt().await.unwrap();
    assert!(before.contains("There are currently no saved style examples for this mode."));

    assert_eq!(engine.refresh().await, RefreshOutcome::Applied);
    engine.submit("What do you do?").await;

    let system = &provider.requests()[0].messages[0].content;
    assert!(system.contains("Authoritative identity (treat as fact, never contradict):\nZain | Engineer"));
    assert!(system.contains("Thank you for your time.\nContext: Thank you for your time. context"));
    assert!(!system.contains("no saved style examples"));
}

#[tokio::test]
async fn stale_fetch_result_is_discarded() {
    let store = GatedStore::new();
    let admin = Admin::new(store.clone());
    admin
        .create(
            Collection::KnowledgeChunks,
            &draft("Regards", Some(SampleType::Professional), Some("email")),
        )
        .await
        .unwrap();
    admin
        .create(Collection::Raw, &draft("safe mate", None, None))
        .await
        .unwrap();

    let engine = engine_with(ScriptedProvider::new(), store.clone(), Mode::Professional);
    assert_eq!(engine.refresh().await, RefreshOutcome::Applied);

    store.hold_raw();
    let casual_fetch = engine.switch_mode(Mode::Casual).await.unwrap();
    let professional_fetch = engine.switch_mode(Mode::Professional).await.unwrap();

    assert_eq!(professional_fetch.await.unwrap(), RefreshOutcome::Applied);
    store.release_raw();
    assert_eq!(casual_fetch.await.unwrap(), RefreshOutcome::Discarded);

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.mode, Mode::Professional);
    assert_eq!(contents(&snapshot.style_samples), vec!["Regards"]);
    assert_eq!(contents(&snapshot.knowledge_samples), vec!["Regards"]);
    assert!(snapshot.last_error.is_none());
}

#[tokio::test]
async fn switching_clears_error_and_keeps_greeting() {
    let provider = ScriptedProvider::new();
    provider.push_error("OpenAI API error (500): upstream");
    let engine = engine_with(
        provider,
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    engine.submit("hello").await;
    assert!(engine.last_error().await.is_some());

    engine.switch_mode(Mode::Casual).await.unwrap().await.unwrap();
    let snapshot = engine.snapshot().await;
    assert!(snapshot.last_error.is_none());
    assert_eq!(snapshot.history.len(), 1);
    assert_eq!(snapshot.professional.len(), 2);
}
