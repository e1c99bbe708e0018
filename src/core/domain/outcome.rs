//! Action outcome type.
//!
//! What happened when an action was applied to one key.

use serde::Serialize;

use crate::error::ProviderError;

/// Why an action did not touch a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The key's attributes rule the action out.
    Ineligible(String),
    /// The provider says the key is already in the requested state, or the
    /// key does not support the operation.
    AlreadyApplied(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ineligible(why) => write!(f, "ineligible: {}", why),
            Self::AlreadyApplied(msg) => write!(f, "already applied or unsupported: {}", msg),
        }
    }
}

/// Result of applying one action to one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    Done,
    Skipped(SkipReason),
    Failed(String),
}

impl Outcome {
    pub fn ineligible(why: impl Into<String>) -> Self {
        Self::Skipped(SkipReason::Ineligible(why.into()))
    }

    pub fn failed(cause: &ProviderError) -> Self {
        Self::Failed(cause.to_string())
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done => write!(f, "done"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Failed(cause) => write!(f, "failed: {}", cause),
        }
    }
}
