//! Remediation run.
//!
//! Enumerate, filter, apply one action to every selected key. An error on
//! one key is recorded as a failure and the run moves on to the next key.

use serde::Serialize;
use tracing::{error, info};

use crate::core::actions::Action;
use crate::core::domain::{KeyRecord, KeyState, Outcome};
use crate::core::enumerate;
use crate::core::filter::{self, Filter};
use crate::core::provider::KmsClient;
use crate::core::types::KeyId;
use crate::error::Result;

/// What happened to one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    pub key_id: KeyId,
    pub outcome: Outcome,
    /// Key state the provider returned, for enable/disable key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_state: Option<KeyState>,
}

/// Outcome of a run across all selected keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub action: String,
    pub matched: usize,
    pub results: Vec<KeyReport>,
}

impl RunReport {
    pub fn done(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_done()).count()
    }

    pub fn skipped(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failed()).count()
    }
}

/// Enumerate keys, narrow to `ids` when given, keep those every filter
/// accepts.
///
/// # Errors
///
/// Returns the error of the key listing.
pub fn select<C: KmsClient + ?Sized>(
    client: &C,
    ids: &[String],
    filters: &[Filter],
) -> Result<Vec<KeyRecord>> {
    let records = if ids.is_empty() {
        enumerate::list_keys(client)?
    } else {
        enumerate::get_keys(client, ids)?
    };
    Ok(filter::apply(filters, records))
}

/// Apply `action` to every selected key.
///
/// # Errors
///
/// Only enumeration errors abort the run.
pub fn run<C: KmsClient + ?Sized>(
    client: &C,
    action: Action,
    ids: &[String],
    filters: &[Filter],
) -> Result<RunReport> {
    let selected = select(client, ids, filters)?;
    info!(action = %action, matched = selected.len(), "running action");

    let results = selected
        .iter()
        .map(|record| {
            let applied = action.apply(client, record).unwrap_or_else(|e| {
                error!(action = %action, key_id = %record.key_id, error = %e, "action failed");
                Outcome::Failed(e.to_string()).into()
            });
            KeyReport {
                key_id: record.key_id.clone(),
                outcome: applied.outcome,
                key_state: applied.key_state,
            }
        })
        .collect();

    Ok(RunReport {
        action: action.name().to_string(),
        matched: selected.len(),
        results,
    })
}
