//! Remediation actions.
//!
//! Per-key actions share one shape: check the record, make at most one
//! provider call, report an [`Outcome`]. Create-key-with-alias works on the
//! account rather than on a key and lives in [`alias`].

pub mod alias;
pub mod rotation;
pub mod state;

pub use alias::{AliasImport, CreatedAlias};

use crate::core::domain::{KeyRecord, KeyState, Outcome};
use crate::core::provider::KmsClient;
use crate::error::Result;

/// What one action did to one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub outcome: Outcome,
    /// State the provider reported after the call; only enable/disable key
    /// return one.
    pub key_state: Option<KeyState>,
}

impl From<Outcome> for Applied {
    fn from(outcome: Outcome) -> Self {
        Self {
            outcome,
            key_state: None,
        }
    }
}

/// A per-key remediation verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EnableKeyRotation,
    DisableKeyRotation,
    EnableKey,
    DisableKey,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnableKeyRotation => "enable_key_rotation",
            Self::DisableKeyRotation => "disable_key_rotation",
            Self::EnableKey => "enable_key",
            Self::DisableKey => "disable_key",
        }
    }

    /// Apply this action to one key.
    ///
    /// # Errors
    ///
    /// Whatever the underlying action propagates; enabling rotation never
    /// fails here.
    pub fn apply<C: KmsClient + ?Sized>(
        &self,
        client: &C,
        record: &KeyRecord,
    ) -> Result<Applied> {
        let response = match self {
            Self::EnableKeyRotation => {
                return rotation::enable_key_rotation(client, record).map(Applied::from)
            }
            Self::DisableKeyRotation => {
                return rotation::disable_key_rotation(client, record).map(Applied::from)
            }
            Self::EnableKey => state::enable_key(client, record)?,
            Self::DisableKey => state::disable_key(client, record)?,
        };
        Ok(Applied {
            outcome: Outcome::Done,
            key_state: Some(KeyState::from(response.key_info.key_state)),
        })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
