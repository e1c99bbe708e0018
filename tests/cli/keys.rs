//! Tests for `keyward enable-key` and `keyward disable-key`.

use serde_json::json;

use crate::support::*;

#[test]
fn test_disable_key_by_id() {
    let t = Test::new();
    t.mock_inventory(vec![key("k1", "AES_256", "2"), key("k2", "AES_256", "2")]);
    let k1 = t.mock_key_op(
        "disable-key",
        "k1",
        200,
        json!({ "key_info": { "key_id": "k1", "key_state": "3" } }),
    );

    let output = t.run_json(&["disable-key", "--id", "k1"]);
    assert_success(&output);
    k1.assert_hits(1);

    let report = stdout_json(&output);
    assert_eq!(report["matched"], 1);
    assert_eq!(report["results"][0]["key_id"], "k1");
    assert_eq!(report["results"][0]["outcome"]["status"], "done");
    assert_eq!(report["results"][0]["key_state"], "3");
}

#[test]
fn test_enable_key_ignores_eligibility() {
    let t = Test::new();
    // Default keys are still enabled: state actions have no eligibility check.
    t.mock_inventory(vec![default_key("k1")]);
    let k1 = t.mock_key_op(
        "enable-key",
        "k1",
        200,
        json!({ "key_info": { "key_id": "k1", "key_state": "2" } }),
    );

    let output = t.run(&["enable-key"]);
    assert_success(&output);
    k1.assert_hits(1);
    assert_stdout_contains(&output, "enable_key k1 (enabled)");
}

#[test]
fn test_enable_key_failure_is_reported() {
    let t = Test::new();
    t.mock_inventory(vec![key("k1", "AES_256", "4")]);
    t.mock_key_op(
        "enable-key",
        "k1",
        400,
        json!({ "error": { "error_code": "KMS.0207", "error_msg": "key pending deletion" } }),
    );

    let output = t.run(&["enable-key"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "key pending deletion");
    assert_stderr_contains(&output, "1 of 1 keys failed");
}

#[test]
fn test_all_keys_disable_filter() {
    let t = Test::new();
    t.mock_inventory(vec![key("k1", "AES_256", "2"), key("k2", "SM4", "3")]);
    let k1 = t.mock_key_op(
        "disable-key",
        "k1",
        200,
        json!({ "key_info": { "key_id": "k1", "key_state": "3" } }),
    );

    let output = t.run_json(&["disable-key", "--all-keys-disable", "key_state=2"]);
    assert_success(&output);
    k1.assert_hits(1);
    assert_eq!(stdout_json(&output)["matched"], 1);
}
