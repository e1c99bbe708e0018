//! Key rotation actions.
//!
//! Enabling is forgiving: a 400 means the key already rotates or cannot,
//! and any other failure is reported without aborting. Disabling returns
//! every provider error to the caller.

use tracing::{error, info};

use crate::core::constants::{
    DEFAULT_KEYSTORE_ID, NON_DEFAULT_KEY_FLAG, NON_ROTATABLE_KEY_SPECS, ROTATABLE_KEY_SPECS,
};
use crate::core::domain::{KeyRecord, KeyState, Outcome, SkipReason};
use crate::core::provider::{KmsClient, OperateKeyRequest};
use crate::error::{Error, Result};

fn check_common(record: &KeyRecord) -> std::result::Result<(), String> {
    if record.default_key_flag != NON_DEFAULT_KEY_FLAG {
        return Err("default or shared key".to_string());
    }
    if record.keystore_id != DEFAULT_KEYSTORE_ID {
        return Err(format!("key lives in keystore {}", record.keystore_id));
    }
    Ok(())
}

/// Why rotation cannot be enabled on `record`, if it cannot.
pub fn enable_ineligibility(record: &KeyRecord) -> Option<String> {
    if let Err(why) = check_common(record) {
        return Some(why);
    }
    if !ROTATABLE_KEY_SPECS.contains(&record.key_spec.as_str()) {
        return Some(format!("key spec {} does not rotate", record.key_spec));
    }
    if record.key_state != KeyState::Enabled {
        return Some(format!("key is {}", record.key_state));
    }
    None
}

/// Why rotation cannot be disabled on `record`, if it cannot.
pub fn disable_ineligibility(record: &KeyRecord) -> Option<String> {
    if let Err(why) = check_common(record) {
        return Some(why);
    }
    if NON_ROTATABLE_KEY_SPECS.contains(&record.key_spec.as_str()) {
        return Some(format!("key spec {} does not rotate", record.key_spec));
    }
    if !matches!(
        record.key_state,
        KeyState::Enabled | KeyState::Disabled | KeyState::PendingDeletion
    ) {
        return Some(format!("key is {}", record.key_state));
    }
    None
}

/// Enable rotation on a non-default AES_256/SM4 key in the default keystore.
///
/// Never returns `Err`: provider failures come back as `Skipped` (HTTP 400)
/// or `Failed`.
pub fn enable_key_rotation<C: KmsClient + ?Sized>(
    client: &C,
    record: &KeyRecord,
) -> Result<Outcome> {
    let key_id = record.key_id.as_str();

    if let Some(why) = enable_ineligibility(record) {
        info!(key_id, reason = %why, "skip enable_key_rotation");
        return Ok(Outcome::ineligible(why));
    }

    match client.enable_key_rotation(&OperateKeyRequest::new(key_id)) {
        Ok(()) => {
            info!(key_id, "enable_key_rotation succeeded");
            Ok(Outcome::Done)
        }
        Err(Error::Provider(e)) if e.is_bad_request() => {
            info!(
                key_id,
                msg = %e.error_msg,
                "key rotation already enabled or not supported"
            );
            Ok(Outcome::Skipped(SkipReason::AlreadyApplied(e.error_msg)))
        }
        Err(Error::Provider(e)) => {
            error!(key_id, error = %e, "enable_key_rotation failed");
            Ok(Outcome::failed(&e))
        }
        Err(e) => {
            error!(key_id, error = %e, "enable_key_rotation failed");
            Ok(Outcome::Failed(e.to_string()))
        }
    }
}

/// Disable rotation on a rotatable key in the default keystore.
///
/// # Errors
///
/// Returns any provider error unchanged.
pub fn disable_key_rotation<C: KmsClient + ?Sized>(
    client: &C,
    record: &KeyRecord,
) -> Result<Outcome> {
    let key_id = record.key_id.as_str();

    if let Some(why) = disable_ineligibility(record) {
        info!(key_id, reason = %why, "skip disable_key_rotation");
        return Ok(Outcome::ineligible(why));
    }

    client.disable_key_rotation(&OperateKeyRequest::new(key_id))?;
    info!(key_id, "disable_key_rotation succeeded");
    Ok(Outcome::Done)
}
