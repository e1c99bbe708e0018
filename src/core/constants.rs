//! Constants used throughout keyward.
//!
//! Centralizes provider magic strings and default values.

use std::time::Duration;

/// Configuration file name (keyward.toml).
pub const CONFIG_FILE: &str = "keyward.toml";

/// Page size for the tags-by-resource query.
pub const TAG_PAGE_LIMIT: usize = 1000;

/// `key_spec` value that lists every key regardless of algorithm.
pub const LIST_ALL_KEY_SPECS: &str = "ALL";

/// Action name the tags-by-resource query expects.
pub const TAG_QUERY_ACTION: &str = "filter";

/// Prefix the provider puts on every alias name.
pub const ALIAS_PREFIX: &str = "alias/";

/// Marker separating the bucket from the OBS endpoint in a manifest URL.
pub const OBS_MARKER: &str = ".obs";

/// Scheme manifest URLs must use.
pub const OBS_SCHEME: &str = "https://";

/// Flag value of a key that is neither default nor shared.
pub const NON_DEFAULT_KEY_FLAG: &str = "0";

/// Keystore id of the default (shared) keystore.
pub const DEFAULT_KEYSTORE_ID: &str = "0";

/// Key specs that support enabling rotation.
pub const ROTATABLE_KEY_SPECS: &[&str] = &["AES_256", "SM4"];

/// Key specs rotation can never be toggled on.
pub const NON_ROTATABLE_KEY_SPECS: &[&str] = &[
    "RSA_2048",
    "RSA_3072",
    "RSA_4096",
    "EC_P256",
    "EC_P384",
    "SM2",
    "ML_DSA_44",
    "ML_DSA_65",
    "ML_DSA_87",
];

/// Pause between consecutive key+alias creations.
pub const DEFAULT_CREATE_PACE: Duration = Duration::from_secs(1);

/// Default domain suffix for service endpoints.
pub const DEFAULT_DOMAIN: &str = "myhuaweicloud.com";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable names.
pub mod env {
    pub const ACCESS_KEY_ID: &str = "HUAWEI_ACCESS_KEY_ID";
    pub const SECRET_ACCESS_KEY: &str = "HUAWEI_SECRET_ACCESS_KEY";
    pub const DEFAULT_REGION: &str = "HUAWEI_DEFAULT_REGION";
    pub const PROJECT_ID: &str = "HUAWEI_PROJECT_ID";
    pub const LOG: &str = "KEYWARD_LOG";
}
