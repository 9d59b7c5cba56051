use crate::persona::Mode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const IDENTITY_COLLECTION: &str = "identity";
pub const IDENTITY_DOCUMENT: &str = "main";

/// Register a stored sample was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SampleType {
    Professional,
    Casual,
}

impl SampleType {
    pub fn as_str(self) -> &'static str {
        match self {
            SampleType::Professional => "professional",
            SampleType::Casual => "casual",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<Mode>().ok().map(Self::from)
    }
}

impl From<Mode> for SampleType {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Professional => SampleType::Professional,
            Mode::Casual => SampleType::Casual,
        }
    }
}

/// Named sample collections in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// Curated samples managed from the admin surface.
    #[serde(rename = "knowledge_chunks")]
    KnowledgeChunks,
    /// Free-form transcript fragments.
    #[serde(rename = "RAW")]
    Raw,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::KnowledgeChunks, Collection::Raw];

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::KnowledgeChunks => "knowledge_chunks",
            Collection::Raw => "RAW",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "knowledge_chunks" | "knowledge" => Ok(Collection::KnowledgeChunks),
            "RAW" | "raw" => Ok(Collection::Raw),
            other => Err(format!(
                "unknown collection {other:?}; expected \"knowledge_chunks\" or \"RAW\""
            )),
        }
    }
}

/// A stored text fragment used to ground or stylize replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingSample {
    pub id: String,
    pub content: String,
    pub context: String,
    /// Absent on transcript fragments that were never classified.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub sample_type: Option<SampleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl WritingSample {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        context: impl Into<String>,
        sample_type: Option<SampleType>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            context: context.into(),
            sample_type,
            category: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Fields an administrator supplies when creating or editing a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDraft {
    pub content: String,
    pub context: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub sample_type: Option<SampleType>,
}

/// Small authoritative record about the simulated person. Every field is
/// optional and a missing record is an empty card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl IdentityCard {
    pub fn name(&self) -> Option<&str> {
        present(self.name.as_ref())
    }

    pub fn occupation(&self) -> Option<&str> {
        present(self.occupation.as_ref())
    }

    pub fn location(&self) -> Option<&str> {
        present(self.location.as_ref())
    }

    pub fn bio(&self) -> Option<&str> {
        present(self.bio.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.name().is_none()
            && self.occupation().is_none()
            && self.location().is_none()
            && self.bio().is_none()
    }

    /// Trim every field and drop the blank ones.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name().map(ToOwned::to_owned),
            occupation: self.occupation().map(ToOwned::to_owned),
            location: self.location().map(ToOwned::to_owned),
            bio: self.bio().map(ToOwned::to_owned),
        }
    }
}

/// RFC 3339 timestamp used for `created_at` / `updated_at`.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
