//! Enable and disable key actions.
//!
//! Unconditional: no eligibility check, one call, errors propagate.

use tracing::info;

use crate::core::domain::KeyRecord;
use crate::core::provider::{KmsClient, OperateKeyRequest, OperateKeyResponse};
use crate::error::Result;

/// Enable a key.
pub fn enable_key<C: KmsClient + ?Sized>(
    client: &C,
    record: &KeyRecord,
) -> Result<OperateKeyResponse> {
    let response = client.enable_key(&OperateKeyRequest::new(record.key_id.as_str()))?;
    info!(key_id = %record.key_id, state = %response.key_info.key_state, "enable_key succeeded");
    Ok(response)
}

/// Disable a key.
pub fn disable_key<C: KmsClient + ?Sized>(
    client: &C,
    record: &KeyRecord,
) -> Result<OperateKeyResponse> {
    let response = client.disable_key(&OperateKeyRequest::new(record.key_id.as_str()))?;
    info!(key_id = %record.key_id, state = %response.key_info.key_state, "disable_key succeeded");
    Ok(response)
}
