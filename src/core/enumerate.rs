//! Key enumeration.
//!
//! Collects tags page by page, lists every key, and merges the two into
//! [`KeyRecord`]s. Tag collection is best effort; key listing is not.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::core::constants::{LIST_ALL_KEY_SPECS, TAG_PAGE_LIMIT, TAG_QUERY_ACTION};
use crate::core::domain::{KeyRecord, Tag};
use crate::core::provider::{KmsClient, ListByTagsRequest, ListKeysRequest};
use crate::core::types::ResourceId;
use crate::error::Result;

/// Collect tags for every tagged resource.
///
/// A failed page ends collection and keeps what was gathered. Paging stops
/// once `total_count` is absent or zero, or once the offset reaches the
/// number of resources in the page just read.
pub fn collect_tags<C: KmsClient + ?Sized>(client: &C) -> HashMap<ResourceId, Vec<Tag>> {
    let mut tags = HashMap::new();
    let mut offset = 0usize;
    let limit = TAG_PAGE_LIMIT;

    loop {
        let request = ListByTagsRequest {
            action: TAG_QUERY_ACTION.to_string(),
            offset: offset.to_string(),
            limit: limit.to_string(),
        };

        let page = match client.list_kms_by_tags(&request) {
            Ok(page) => page,
            Err(e) => {
                error!(offset, error = %e, "failed to query kms tags");
                break;
            }
        };

        debug!(offset, resources = page.resources.len(), "tag page");
        let page_len = page.resources.len();
        for resource in page.resources {
            tags.insert(resource.resource_id, resource.tags);
        }

        offset += limit;

        // TODO: compare against total_count once the provider's paging
        // contract for this endpoint is confirmed; as written this never
        // reads past a page holding `limit` resources or fewer.
        if page.total_count.unwrap_or(0) == 0 || offset >= page_len {
            break;
        }
    }

    tags
}

/// Enumerate every key with its tags, in provider order.
///
/// # Errors
///
/// Returns the provider error if the key listing fails.
pub fn list_keys<C: KmsClient + ?Sized>(client: &C) -> Result<Vec<KeyRecord>> {
    let mut tags = collect_tags(client);

    let request = ListKeysRequest {
        key_spec: LIST_ALL_KEY_SPECS.to_string(),
    };
    let response = client.list_keys(&request).map_err(|e| {
        error!(error = %e, "failed to list kms keys");
        e
    })?;

    let records: Vec<KeyRecord> = response
        .key_details
        .into_iter()
        .map(|detail| {
            let key_tags = tags.remove(&detail.key_id).unwrap_or_default();
            KeyRecord::from_detail(detail, key_tags)
        })
        .collect();

    debug!(keys = records.len(), "keys enumerated");
    Ok(records)
}

/// Enumerate keys and keep only those whose id is in `ids`.
pub fn get_keys<C: KmsClient + ?Sized>(client: &C, ids: &[String]) -> Result<Vec<KeyRecord>> {
    Ok(list_keys(client)?
        .into_iter()
        .filter(|record| ids.iter().any(|id| *id == record.key_id))
        .collect())
}
