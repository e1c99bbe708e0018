//! Object storage manifest location and contents.
//!
//! A manifest URL looks like `https://<bucket>.obs.<region>.<domain>/<path>`.
//! The bucket ends at the last `.obs` in the host, so bucket names that
//! themselves contain `.obs` still split correctly.

use serde::Deserialize;

use crate::core::constants::{OBS_MARKER, OBS_SCHEME};
use crate::core::types::AliasName;
use crate::error::{ObsError, Result};

/// Where a manifest object lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObsLocation {
    bucket: String,
    server: String,
    object_key: String,
}

impl ObsLocation {
    /// Split a manifest URL into bucket, server and object key.
    ///
    /// # Errors
    ///
    /// Returns `ObsError::MalformedUrl` when the scheme is not `https://`,
    /// the host has no `.obs` marker, either side of the marker is empty, or
    /// there is no non-empty object path after the host.
    pub fn parse(url: &str) -> Result<Self> {
        let malformed = |reason| ObsError::MalformedUrl {
            url: url.to_string(),
            reason,
        };

        let rest = url
            .strip_prefix(OBS_SCHEME)
            .ok_or_else(|| malformed("expected an https:// url"))?;
        let host_end = rest.find('/').unwrap_or(rest.len());
        let marker = rest[..host_end]
            .rfind(OBS_MARKER)
            .ok_or_else(|| malformed("no .obs endpoint in host"))?;

        let bucket = &rest[..marker];
        if bucket.is_empty() {
            return Err(malformed("empty bucket name").into());
        }

        let (endpoint, object_key) = rest[marker..]
            .split_once('/')
            .ok_or_else(|| malformed("no object path after host"))?;
        if object_key.is_empty() {
            return Err(malformed("empty object path").into());
        }

        let endpoint = endpoint.trim_start_matches('.');
        let server = endpoint
            .strip_prefix("obs.")
            .or_else(|| endpoint.strip_prefix("obs"))
            .unwrap_or(endpoint);
        if server.is_empty() {
            return Err(malformed("empty region host").into());
        }

        Ok(Self {
            bucket: bucket.to_string(),
            server: server.to_string(),
            object_key: object_key.to_string(),
        })
    }

    /// Bucket name (`bucket1` in `https://bucket1.obs.region1.example.com/...`).
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Region host after `.obs.` (`region1.example.com`).
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Object key (`path/to/kms.txt`).
    pub fn object_key(&self) -> &str {
        &self.object_key
    }

    /// Region the bucket lives in: the first label of the server
    /// (`sa-brazil-1` in `sa-brazil-1.myhuaweicloud.com`). Requests are
    /// signed for this region whatever the configured one is.
    pub fn region(&self) -> &str {
        self.server.split('.').next().unwrap_or(&self.server)
    }

    /// Endpoint host the object is served from (`obs.region1.example.com`).
    pub fn endpoint(&self) -> String {
        format!("obs.{}", self.server)
    }
}

impl std::fmt::Display for ObsLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obs://{}/{}", self.bucket, self.object_key)
    }
}

/// Manifest document listing extra aliases to provision.
///
/// `obs_key_aliases` is required: a manifest without it is rejected rather
/// than read as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub obs_key_aliases: Vec<AliasName>,
}

impl Manifest {
    /// Parse a manifest body.
    ///
    /// # Errors
    ///
    /// Returns `ObsError::Manifest` if the body is not the expected JSON.
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| ObsError::Manifest(e).into())
    }
}
