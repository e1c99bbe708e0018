//! Canned provider responses.

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

use super::Test;

/// A list-keys entry.
pub fn key(id: &str, spec: &str, state: &str) -> Value {
    json!({
        "key_id": id,
        "domain_id": "dom-1",
        "key_alias": format!("alias/{}", id),
        "key_spec": spec,
        "key_state": state,
        "default_key_flag": "0",
        "keystore_id": "0",
        "key_rotation_enabled": "false"
    })
}

/// A list-keys entry for a default (service-managed) key.
pub fn default_key(id: &str) -> Value {
    let mut value = key(id, "AES_256", "2");
    value["default_key_flag"] = json!("1");
    value
}

impl Test {
    /// Serve one tags page holding `resources`.
    pub fn mock_tags(&self, resources: Value) -> Mock<'_> {
        let total = resources.as_array().map(Vec::len).unwrap_or(0);
        self.server.mock(|when, then| {
            when.method(POST)
                .path(Test::kms_path("resource_instances/action"))
                .json_body_partial(r#"{"action":"filter","offset":"0","limit":"1000"}"#);
            then.status(200)
                .json_body(json!({ "resources": resources, "total_count": total }));
        })
    }

    /// Serve the key listing.
    pub fn mock_keys(&self, keys: Vec<Value>) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST)
                .path(Test::kms_path("list-keys"))
                .json_body_partial(r#"{"key_spec":"ALL"}"#);
            then.status(200).json_body(json!({ "key_details": keys }));
        })
    }

    /// Serve no tags and the given keys.
    pub fn mock_inventory(&self, keys: Vec<Value>) {
        self.mock_tags(json!([]));
        self.mock_keys(keys);
    }

    /// Answer `operation` on `key_id` with `status` and `body`.
    pub fn mock_key_op(&self, operation: &str, key_id: &str, status: u16, body: Value) -> Mock<'_> {
        let partial = json!({ "key_id": key_id }).to_string();
        self.server.mock(|when, then| {
            when.method(POST)
                .path(Test::kms_path(operation))
                .json_body_partial(partial);
            then.status(status)
                .header("X-Request-Id", "req-test")
                .json_body(body);
        })
    }

    /// Serve the alias listing as a bare array of groups.
    pub fn mock_aliases(&self, aliases: &[&str]) -> Mock<'_> {
        let entries: Vec<Value> = aliases
            .iter()
            .map(|a| json!({ "alias": format!("alias/{}", a), "key_id": format!("key-{}", a) }))
            .collect();
        self.server.mock(|when, then| {
            when.method(GET).path(Test::kms_path("aliases"));
            then.status(200).json_body(json!([{ "aliases": entries }]));
        })
    }

    /// Accept any create-key call.
    pub fn mock_create_key(&self, key_id: &str) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST).path(Test::kms_path("create-key"));
            then.status(200)
                .json_body(json!({ "key_info": { "key_id": key_id, "domain_id": "dom-1" } }));
        })
    }

    /// Accept creation of `alias/<alias>`.
    pub fn mock_create_alias(&self, alias: &str) -> Mock<'_> {
        let partial = json!({ "alias": format!("alias/{}", alias) }).to_string();
        self.server.mock(|when, then| {
            when.method(POST)
                .path(Test::kms_path("aliases"))
                .json_body_partial(partial);
            then.status(200).json_body(json!({}));
        })
    }

    /// Serve an OBS object at path-style `/<bucket>/<key>`.
    pub fn mock_object(&self, bucket: &str, object_key: &str, status: u16, body: &str) -> Mock<'_> {
        let path = format!("/{}/{}", bucket, object_key);
        self.server.mock(|when, then| {
            when.method(GET).path(path).header_exists("authorization");
            then.status(status).body(body);
        })
    }
}
