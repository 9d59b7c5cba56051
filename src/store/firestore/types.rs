//! Firestore REST v1 wire types.

use crate::store::types::{IdentityCard, SampleDraft, SampleType, WritingSample};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed Firestore value. Exactly one field is set on the wire; the
/// variants this store never writes are still accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
}

impl FieldValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Text rendering of the value; numbers and booleans are stringified.
    pub fn as_text(&self) -> Option<String> {
        if let Some(s) = &self.string_value {
            return Some(s.clone());
        }
        if let Some(ts) = &self.timestamp_value {
            return Some(ts.clone());
        }
        if let Some(i) = &self.integer_value {
            return Some(i.clone());
        }
        if let Some(d) = self.double_value {
            return Some(d.to_string());
        }
        self.boolean_value.map(|b| b.to_string())
    }
}

pub type Fields = HashMap<String, FieldValue>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(FieldValue::as_text)
    }

    pub fn into_sample(self) -> WritingSample {
        WritingSample {
            id: self.id().to_string(),
            content: self.text("content").unwrap_or_default(),
            context: self.text("context").unwrap_or_default(),
            sample_type: self.text("type").as_deref().and_then(SampleType::parse),
            category: self.text("category"),
            created_at: self.text("created_at"),
            updated_at: self.text("updated_at"),
        }
    }

    pub fn into_identity(self) -> IdentityCard {
        IdentityCard {
            name: self.text("name"),
            occupation: self.text("occupation"),
            location: self.text("location"),
            bio: self.text("bio"),
        }
        .normalized()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// One element of the `:runQuery` response stream. Elements without a
/// document only carry read metadata.
#[derive(Debug, Deserialize)]
pub struct RunQueryItem {
    #[serde(default)]
    pub document: Option<Document>,
}

/// Fields written for a sample. Optional attributes are left out so a masked
/// update clears them.
pub fn draft_fields(draft: &SampleDraft) -> Fields {
    let mut fields = Fields::new();
    fields.insert("content".into(), FieldValue::string(draft.content.trim()));
    fields.insert("context".into(), FieldValue::string(draft.context.trim()));
    if let Some(category) = draft.category.as_deref().map(str::trim)
        && !category.is_empty()
    {
        fields.insert("category".into(), FieldValue::string(category));
    }
    if let Some(sample_type) = draft.sample_type {
        fields.insert("type".into(), FieldValue::string(sample_type.as_str()));
    }
    fields
}

pub fn identity_fields(card: &IdentityCard) -> Fields {
    [
        ("name", card.name()),
        ("occupation", card.occupation()),
        ("location", card.location()),
        ("bio", card.bio()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key.to_string(), FieldValue::string(v))))
    .collect()
}
