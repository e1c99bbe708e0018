//! Provider API seam.
//!
//! Abstracts the KMS and object storage calls behind traits so the
//! enumeration and action logic never sees a transport.
//!
//! ## Implementations
//!
//! - **huawei**: Feature-gated (`huawei`, on by default). Blocking HTTP
//!   clients signed with AK/SK.
//! - Tests provide in-memory recorders.
//!
//! ## Adding a New Transport
//!
//! 1. Implement `KmsClient` (and `ObjectStore` if manifests are needed)
//! 2. Map non-2xx responses to `ProviderError` with the HTTP status kept
//! 3. Feature-gate if it pulls in new dependencies

use serde::{Deserialize, Serialize};

use crate::core::domain::{KeyDetail, Tag};
use crate::core::obs::ObsLocation;
use crate::core::types::{KeyId, ResourceId};
use crate::error::Result;

#[cfg(feature = "huawei")]
pub mod huawei;

#[cfg(feature = "huawei")]
mod signer;

#[cfg(test)]
pub(crate) mod mock;

/// Fresh idempotency token for a key operation: 128 random bits as
/// 32 lowercase hex characters.
pub fn sequence() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Body of the tags-by-resource query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListByTagsRequest {
    pub action: String,
    pub offset: String,
    pub limit: String,
}

/// One resource in a tags-by-resource page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaggedResource {
    pub resource_id: ResourceId,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A tags-by-resource page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListByTagsResponse {
    #[serde(default)]
    pub resources: Vec<TaggedResource>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Body of the list-keys call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListKeysRequest {
    pub key_spec: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListKeysResponse {
    #[serde(default)]
    pub key_details: Vec<KeyDetail>,
}

/// Body shared by rotation and enable/disable calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperateKeyRequest {
    pub key_id: KeyId,
    pub sequence: String,
}

impl OperateKeyRequest {
    pub fn new(key_id: impl Into<KeyId>) -> Self {
        Self {
            key_id: key_id.into(),
            sequence: sequence(),
        }
    }
}

/// Key info returned by enable/disable key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStateInfo {
    pub key_id: KeyId,
    #[serde(default)]
    pub key_state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperateKeyResponse {
    #[serde(default)]
    pub key_info: KeyStateInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateKeyRequest {
    pub key_alias: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedKeyInfo {
    pub key_id: KeyId,
    #[serde(default)]
    pub domain_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateKeyResponse {
    pub key_info: CreatedKeyInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAliasRequest {
    pub key_id: KeyId,
    /// Full alias including the `alias/` prefix.
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasEntry {
    pub alias: String,
    #[serde(default)]
    pub key_id: Option<KeyId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AliasGroup {
    #[serde(default)]
    pub aliases: Vec<AliasEntry>,
}

/// The list-aliases response wraps its entries in a list of groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListAliasesResponse {
    #[serde(default)]
    pub body: Vec<AliasGroup>,
}

impl ListAliasesResponse {
    /// Every alias across all groups, as returned (prefix included).
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.body
            .iter()
            .flat_map(|group| group.aliases.iter())
            .map(|entry| entry.alias.as_str())
    }
}

/// KMS operations the enumerator and actions need.
///
/// Implemented by the Huawei Cloud HTTP client and by test recorders.
/// Every failure the provider reports comes back as
/// `Error::Provider` with the HTTP status kept.
pub trait KmsClient {
    fn list_kms_by_tags(&self, request: &ListByTagsRequest) -> Result<ListByTagsResponse>;
    fn list_keys(&self, request: &ListKeysRequest) -> Result<ListKeysResponse>;
    fn enable_key_rotation(&self, request: &OperateKeyRequest) -> Result<()>;
    fn disable_key_rotation(&self, request: &OperateKeyRequest) -> Result<()>;
    fn enable_key(&self, request: &OperateKeyRequest) -> Result<OperateKeyResponse>;
    fn disable_key(&self, request: &OperateKeyRequest) -> Result<OperateKeyResponse>;
    fn create_key(&self, request: &CreateKeyRequest) -> Result<CreateKeyResponse>;
    fn list_aliases(&self) -> Result<ListAliasesResponse>;
    fn create_alias(&self, request: &CreateAliasRequest) -> Result<()>;
}

/// Raw answer to an object fetch.
///
/// A non-2xx status is not an `Err`: the caller decides what a refused
/// fetch means. `Err` is reserved for requests that never completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

/// Object storage reads.
pub trait ObjectStore {
    /// Fetch the object at `location`, loading the body in memory.
    ///
    /// The request is addressed to, and signed for, the location's own
    /// region.
    fn get_object(&self, location: &ObsLocation) -> Result<ObjectResponse>;
}
