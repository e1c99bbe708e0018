//! AK/SK request signing for the KMS API gateway (`SDK-HMAC-SHA256`).
//!
//! Pure functions of their inputs; the caller supplies the clock. OBS reads
//! go through the S3 SDK, which signs its own requests.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::core::config::Credentials;

type HmacSha256 = Hmac<Sha256>;

pub const SDK_ALGORITHM: &str = "SDK-HMAC-SHA256";
pub const SDK_DATE_HEADER: &str = "X-Sdk-Date";

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn uri_encode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Encode a path segment by segment, keeping the slashes.
fn encode_path(path: &str) -> String {
    path.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
}

/// Header names (lowercase) and values to sign, sorted by name.
fn canonical_headers(headers: &[(&str, &str)]) -> (String, String) {
    let mut sorted: Vec<(String, &str)> = headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim()))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let canonical = sorted
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect::<String>();
    let signed = sorted
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");
    (canonical, signed)
}

/// Timestamp in the basic ISO 8601 form of `X-Sdk-Date`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Canonical request for the `SDK-HMAC-SHA256` scheme.
///
/// The URI always ends with `/`; the query string is empty for every call
/// this crate makes.
pub fn sdk_canonical_request(
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> (String, String) {
    let mut uri = encode_path(path);
    if !uri.ends_with('/') {
        uri.push('/');
    }
    let (canonical, signed) = canonical_headers(headers);
    let request = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        method,
        uri,
        canonical,
        signed,
        sha256_hex(body)
    );
    (request, signed)
}

/// `Authorization` header value for a KMS request.
///
/// `headers` must already contain `Host` and `X-Sdk-Date`.
pub fn sign_sdk(
    credentials: &Credentials,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: &[u8],
    sdk_date: &str,
) -> String {
    let (request, signed) = sdk_canonical_request(method, path, headers, body);
    let string_to_sign = format!(
        "{}\n{}\n{}",
        SDK_ALGORITHM,
        sdk_date,
        sha256_hex(request.as_bytes())
    );
    let signature = hex::encode(hmac_sha256(
        credentials.secret_key.as_bytes(),
        string_to_sign.as_bytes(),
    ));
    format!(
        "{} Access={}, SignedHeaders={}, Signature={}",
        SDK_ALGORITHM, credentials.access_key, signed, signature
    )
}
