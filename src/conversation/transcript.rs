use crate::providers::ChatMessage;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        match message.role {
            Role::User => ChatMessage::user(message.content.clone()),
            Role::Assistant => ChatMessage::assistant(message.content.clone()),
        }
    }
}

/// Ordered, immutable message history for one mode.
///
/// Appending never mutates: it yields a new transcript, so a snapshot taken
/// before a turn keeps reading the old sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript(Arc<[Message]>);

impl Transcript {
    pub fn seeded(greeting: &str) -> Self {
        Self(Arc::from(vec![Message::assistant(greeting)]))
    }

    #[must_use]
    pub fn appended(&self, message: Message) -> Self {
        let mut messages = Vec::with_capacity(self.0.len() + 1);
        messages.extend_from_slice(&self.0);
        messages.push(message);
        Self(messages.into())
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    /// True while nothing but the opening assistant message is present.
    pub fn is_greeting_only(&self) -> bool {
        matches!(&*self.0, [only] if only.role == Role::Assistant)
    }
}

impl Serialize for Transcript {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}
