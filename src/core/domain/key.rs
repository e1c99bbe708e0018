//! Key record type.
//!
//! The merged view of one KMS key: its listed attributes plus its tags.

use serde::{Deserialize, Serialize};

use crate::core::types::KeyId;

/// Lifecycle state of a key, decoded from the provider's numeric codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyState {
    PendingActivation,
    Enabled,
    Disabled,
    PendingDeletion,
    PendingImport,
    Unknown(String),
}

impl KeyState {
    /// Provider code for this state.
    pub fn code(&self) -> &str {
        match self {
            Self::PendingActivation => "1",
            Self::Enabled => "2",
            Self::Disabled => "3",
            Self::PendingDeletion => "4",
            Self::PendingImport => "5",
            Self::Unknown(code) => code,
        }
    }
}

impl From<&str> for KeyState {
    fn from(code: &str) -> Self {
        match code {
            "1" => Self::PendingActivation,
            "2" => Self::Enabled,
            "3" => Self::Disabled,
            "4" => Self::PendingDeletion,
            "5" => Self::PendingImport,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for KeyState {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<KeyState> for String {
    fn from(state: KeyState) -> Self {
        state.code().to_string()
    }
}

impl std::fmt::Display for KeyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingActivation => write!(f, "pending-activation"),
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
            Self::PendingDeletion => write!(f, "pending-deletion"),
            Self::PendingImport => write!(f, "pending-import"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// A resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Key attributes as returned by the list-keys call.
///
/// Everything the merge does not rely on is optional so a sparse response
/// still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeyDetail {
    pub key_id: KeyId,
    #[serde(default)]
    pub domain_id: String,
    #[serde(default)]
    pub key_alias: Option<String>,
    #[serde(default)]
    pub key_description: Option<String>,
    #[serde(default)]
    pub key_spec: String,
    #[serde(default)]
    pub key_usage: Option<String>,
    #[serde(default)]
    pub key_state: String,
    #[serde(default)]
    pub default_key_flag: String,
    #[serde(default)]
    pub keystore_id: String,
    #[serde(default)]
    pub key_rotation_enabled: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
}

/// One enumerated key with its tags attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRecord {
    /// Normalized identity, always equal to `key_id`.
    pub id: KeyId,
    pub key_id: KeyId,
    pub key_spec: String,
    pub key_state: KeyState,
    pub default_key_flag: String,
    pub keystore_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_rotation_enabled: Option<String>,
    pub domain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    pub tags: Vec<Tag>,
}

impl KeyRecord {
    /// Merge a listed key with its tags.
    pub fn from_detail(detail: KeyDetail, tags: Vec<Tag>) -> Self {
        Self {
            id: detail.key_id.clone(),
            key_id: detail.key_id,
            key_spec: detail.key_spec,
            key_state: KeyState::from(detail.key_state),
            default_key_flag: detail.default_key_flag,
            keystore_id: detail.keystore_id,
            key_rotation_enabled: detail.key_rotation_enabled,
            domain_id: detail.domain_id,
            key_alias: detail.key_alias,
            key_description: detail.key_description,
            key_usage: detail.key_usage,
            origin: detail.origin,
            creation_date: detail.creation_date,
            tags,
        }
    }
}

impl std::fmt::Display for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key_id)
    }
}
