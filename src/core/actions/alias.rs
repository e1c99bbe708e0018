//! Create-key-with-alias action.
//!
//! Desired aliases come from a static list and, optionally, an OBS
//! manifest. Every alias not already present gets a fresh key and an
//! `alias/<name>` pointing at it. The first failure aborts the batch.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::core::config::AliasImportConfig;
use crate::core::constants::ALIAS_PREFIX;
use crate::core::obs::{Manifest, ObsLocation};
use crate::core::provider::{CreateAliasRequest, CreateKeyRequest, KmsClient, ObjectStore};
use crate::core::types::{AliasName, KeyId};
use crate::error::{ObsError, Result};

/// A key+alias pair the action created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedAlias {
    pub alias: AliasName,
    pub key_id: KeyId,
}

/// Inputs of one create-key-with-alias run.
#[derive(Debug, Clone)]
pub struct AliasImport {
    pub key_aliases: Vec<AliasName>,
    pub obs_url: Option<String>,
    /// Pause after each created pair
    pub pace: Duration,
}

impl AliasImport {
    pub fn new(key_aliases: Vec<AliasName>, obs_url: Option<String>) -> Self {
        Self {
            key_aliases,
            obs_url: obs_url.filter(|url| !url.is_empty()),
            pace: Duration::ZERO,
        }
    }

    pub fn from_config(config: &AliasImportConfig) -> Self {
        Self::new(config.key_aliases.clone(), config.obs_url.clone()).with_pace(config.pace())
    }

    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Create every missing alias.
    ///
    /// With no static aliases and no manifest URL nothing is called and
    /// the result is empty.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed manifest URL, a refused or failed
    /// manifest fetch, or any failure listing aliases or creating a key or
    /// alias. Pairs created before the failure stay created.
    pub fn run<C, O>(&self, client: &C, obs: &O) -> Result<Vec<CreatedAlias>>
    where
        C: KmsClient + ?Sized,
        O: ObjectStore + ?Sized,
    {
        if self.key_aliases.is_empty() && self.obs_url.is_none() {
            error!("key_aliases or obs_url is required");
            return Ok(Vec::new());
        }

        let mut desired: BTreeSet<AliasName> = self.key_aliases.iter().cloned().collect();
        if let Some(url) = &self.obs_url {
            let manifest = fetch_manifest(obs, url)?;
            desired.extend(manifest.obs_key_aliases);
        }

        let existing = existing_aliases(client)?;
        debug!(desired = desired.len(), existing = existing.len(), "alias diff");

        let mut created = Vec::new();
        for alias in desired.iter().filter(|a| !existing.contains(a.as_str())) {
            created.push(create_pair(client, alias)?);
            if !self.pace.is_zero() {
                std::thread::sleep(self.pace);
            }
        }
        Ok(created)
    }
}

/// Fetch and parse the manifest at `url`.
///
/// # Errors
///
/// `ObsError::MalformedUrl`, `ObsError::FetchFailed` for a status of 300 or
/// more, the client's error when the request fails, or
/// `ObsError::Manifest` for an unreadable body.
pub fn fetch_manifest<O: ObjectStore + ?Sized>(obs: &O, url: &str) -> Result<Manifest> {
    let location = ObsLocation::parse(url)?;
    debug!(location = %location, region = location.region(), "fetching manifest");

    let response = obs
        .get_object(&location)
        .map_err(|e| {
            match e.as_provider() {
                Some(p) => error!(
                    status = ?p.status,
                    request_id = ?p.request_id,
                    error_code = ?p.error_code,
                    error_msg = %p.error_msg,
                    "get obs object failed"
                ),
                None => error!(error = %e, "get obs object failed"),
            }
            e
        })?;

    if response.status >= 300 {
        let code = response.error_code.unwrap_or_default();
        let message = response.error_message.unwrap_or_default();
        error!(status = response.status, code = %code, message = %message, "get obs object failed");
        return Err(ObsError::FetchFailed {
            status: response.status,
            code,
            message,
        }
        .into());
    }

    Manifest::parse(&response.body)
}

/// Live alias names with the `alias/` prefix removed.
fn existing_aliases<C: KmsClient + ?Sized>(client: &C) -> Result<HashSet<AliasName>> {
    let response = client.list_aliases()?;
    Ok(response
        .aliases()
        .map(|alias| alias.replace(ALIAS_PREFIX, ""))
        .collect())
}

fn create_pair<C: KmsClient + ?Sized>(client: &C, alias: &str) -> Result<CreatedAlias> {
    let key_name = Utc::now().timestamp().to_string();
    let key = client.create_key(&CreateKeyRequest {
        key_alias: key_name.clone(),
    })?;
    let key_id = key.key_info.key_id;

    client.create_alias(&CreateAliasRequest {
        key_id: key_id.clone(),
        alias: format!("{}{}", ALIAS_PREFIX, alias),
    })?;

    info!(alias, key_id = %key_id, key_name = %key_name, "created key with alias");
    Ok(CreatedAlias {
        alias: alias.to_string(),
        key_id,
    })
}
