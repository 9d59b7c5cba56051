use std::sync::Arc;
use std::time::Duration;

use meetyourmaker::conversation::{Message, SubmitOutcome};
use meetyourmaker::persona::Mode;
use meetyourmaker::store::MemoryStore;

use super::conversation_harness::{GatedProvider, engine_with};

#[tokio::test]
async fn submit_while_awaiting_reply_is_noop() {
    let provider = GatedProvider::new();
    let engine = engine_with(
        provider.clone(),
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.submit("first").await }
    });
    provider.entered.notified().await;

    assert!(engine.is_pending().await);
    assert_eq!(engine.submit("second").await, SubmitOutcome::Ignored);
    assert_eq!(engine.submit("").await, SubmitOutcome::Ignored);
    assert_eq!(engine.history(Mode::Professional).await.len(), 2);

    provider.release();
    assert_eq!(
        first.await.unwrap(),
        SubmitOutcome::Replied("re: first".into())
    );

    let history = engine.history(Mode::Professional).await;
    assert_eq!(
        history.messages()[1..],
        [Message::user("first"), Message::assistant("re: first")]
    );
    assert!(!engine.is_pending().await);
}

#[tokio::test]
async fn reply_lands_in_the_mode_that_asked() {
    let provider = GatedProvider::new();
    let engine = engine_with(
        provider.clone(),
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    let pending = tokio::spawn({
        let engine = engine.clone();
        async move { engine.submit_turn("status update?").await }
    });
    provider.entered.notified().await;

    engine.switch_mode(Mode::Casual).await.unwrap().await.unwrap();
    provider.release();
    let turn = pending.await.unwrap();

    assert_eq!(turn.mode, Mode::Professional);
    assert_eq!(
        turn.outcome,
        SubmitOutcome::Replied("re: status update?".into())
    );
    assert_eq!(engine.history(Mode::Casual).await.len(), 1);
    assert_eq!(
        engine.history(Mode::Professional).await.last(),
        Some(&Message::assistant("re: status update?"))
    );
}

#[tokio::test]
async fn stalled_completion_times_out_into_error_state() {
    let provider = GatedProvider::new();
    let engine = meetyourmaker::conversation::ConversationEngine::new(
        provider,
        Arc::new(MemoryStore::new()),
        meetyourmaker::conversation::EngineOptions {
            timeout_secs: 1,
            ..Default::default()
        },
    )
    .unwrap();

    let outcome = engine.submit("hello?").await;
    let SubmitOutcome::Failed(message) = outcome else {
        panic!("expected timeout failure, got {outcome:?}");
    };
    assert!(message.contains("took longer than 1s"));
    assert!(!engine.is_pending().await);
    assert_eq!(engine.last_error().await.as_deref(), Some(message.as_str()));
    assert_eq!(engine.history(Mode::Professional).await.len(), 2);
}

#[tokio::test]
async fn dropped_submit_still_settles_the_turn() {
    let provider = GatedProvider::new();
    let engine = engine_with(
        provider.clone(),
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    let caller = tokio::spawn({
        let engine = engine.clone();
        async move { engine.submit("first").await }
    });
    provider.entered.notified().await;
    caller.abort();
    assert!(caller.await.unwrap_err().is_cancelled());

    provider.release();
    for _ in 0..100 {
        if !engine.is_pending().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!engine.is_pending().await);
    assert_eq!(
        engine.history(Mode::Professional).await.last(),
        Some(&Message::assistant("re: first"))
    );

    provider.release();
    assert_eq!(
        engine.submit("second").await,
        SubmitOutcome::Replied("re: second".into())
    );
}

#[tokio::test]
async fn failure_after_switch_stays_out_of_new_mode_banner() {
    let provider = GatedProvider::failing();
    let engine = engine_with(
        provider.clone(),
        Arc::new(MemoryStore::new()),
        Mode::Professional,
    );

    let pending = tokio::spawn({
        let engine = engine.clone();
        async move { engine.submit_turn("quarterly numbers?").await }
    });
    provider.entered.notified().await;

    engine.switch_mode(Mode::Casual).await.unwrap().await.unwrap();
    provider.release();
    let turn = pending.await.unwrap();

    assert_eq!(turn.mode, Mode::Professional);
    assert!(matches!(turn.outcome, SubmitOutcome::Failed(ref m) if m.contains("502")));
    assert!(engine.last_error().await.is_none());
    assert!(!engine.is_pending().await);
    assert_eq!(
        engine.history(Mode::Professional).await.last(),
        Some(&Message::user("quarterly numbers?"))
    );
}
