use std::sync::Arc;

use meetyourmaker::conversation::{Message, SubmitOutcome};
use meetyourmaker::persona::Mode;
use meetyourmaker::providers::MessageRole;
use meetyourmaker::store::MemoryStore;

use super::conversation_harness::{ScriptedProvider, engine_with};

#[tokio::test]
async fn fresh_engine_is_seeded_with_greeting_per_mode() {
    let professional = engine_with(
        ScriptedProvider::new(),
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );
    assert_eq!(
        professional.history(Mode::Professional).await.messages(),
        &[Message::assistant("hello — how can I assist you today?")]
    );

    let casual = engine_with(
        ScriptedProvider::new(),
        Arc::new(MemoryStore::new()),
        Mode::Casual,
    );
    assert_eq!(casual.mode().await, Mode::Casual);
    assert_eq!(
        casual.history(Mode::Casual).await.messages(),
        &[Message::assistant("hey, what's up! i'm zain")]
    );
}

#[tokio::test]
async fn switching_modes_never_mixes_transcripts() {
    let provider = ScriptedProvider::new();
    provider.push_reply("Good day.");
    let engine = engine_with(provider, Arc::new(MemoryStore::new()), Mode::Professional);

    assert_eq!(
        engine.submit("hi").await,
        SubmitOutcome::Replied("Good day.".into())
    );
    let professional_before = engine.history(Mode::Professional).await;

    engine.switch_mode(Mode::Casual).await.unwrap().await.unwrap();
    assert_eq!(
        engine.history(Mode::Casual).await.messages(),
        &[Message::assistant("hey, what's up! i'm zain")]
    );

    engine
        .switch_mode(Mode::Professional)
        .await
        .unwrap()
        .await
        .unwrap();
    let professional_after = engine.history(Mode::Professional).await;

    assert_eq!(professional_after, professional_before);
    assert_eq!(
        professional_after.messages(),
        &[
            Message::assistant("hello — how can I assist you today?"),
            Message::user("hi"),
            Message::assistant("Good day."),
        ]
    );
    assert_eq!(engine.history(Mode::Casual).await.len(), 1);
}

#[tokio::test]
async fn request_carries_system_prompt_history_and_mode_temperature() {
    let provider = ScriptedProvider::new();
    let engine = engine_with(
        provider.clone(),
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    engine.submit("first").await;
    engine.switch_mode(Mode::Casual).await.unwrap().await.unwrap();
    engine.submit("yo").await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);

    let professional = &requests[0];
    assert!((professional.temperature - 0.7).abs() < f64::EPSILON);
    assert_eq!(professional.model, "gpt-4");
    assert_eq!(professional.messages[0].role, MessageRole::System);
    assert!(professional.messages[0].content.starts_with("You are Zain."));
    assert_eq!(professional.messages.len(), 3);
    assert_eq!(professional.messages[2].content, "first");

    let casual = &requests[1];
    assert!((casual.temperature - 0.8).abs() < f64::EPSILON);
    assert!(casual.messages[0].content.contains("Write entirely in lowercase."));
    assert_eq!(casual.messages[1].content, "hey, what's up! i'm zain");
    assert_eq!(casual.messages[2].content, "yo");
    assert_eq!(casual.messages.len(), 3);
}

#[tokio::test]
async fn switching_to_current_mode_changes_nothing() {
    let engine = engine_with(
        ScriptedProvider::new(),
        Arc::new(MemoryStore::new()),
        Mode::Casual,
    );
    let before = engine.snapshot().await;
    assert!(engine.switch_mode(Mode::Casual).await.is_none());
    let after = engine.snapshot().await;
    assert_eq!(before.casual, after.casual);
    assert_eq!(after.mode, Mode::Casual);
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let provider = ScriptedProvider::new();
    let engine = engine_with(
        provider.clone(),
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    assert_eq!(engine.submit("").await, SubmitOutcome::Ignored);
    assert_eq!(engine.submit("   \n\t").await, SubmitOutcome::Ignored);

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.history.len(), 1);
    assert!(!snapshot.pending);
    assert!(snapshot.last_error.is_none());
    assert!(provider.requests().is_empty());
}
