//! Tests for `keyward enable-rotation` and `keyward disable-rotation`.

use serde_json::json;

use crate::support::*;

#[test]
fn test_enable_rotation_acts_only_on_eligible_keys() {
    let t = Test::new();
    t.mock_inventory(vec![
        key("k1", "AES_256", "2"),
        key("k2", "RSA_2048", "2"),
        default_key("k3"),
    ]);
    let k1 = t.mock_key_op("enable-key-rotation", "k1", 200, json!({}));

    let output = t.run_json(&["enable-rotation"]);
    assert_success(&output);
    k1.assert_hits(1);

    let report = stdout_json(&output);
    assert_eq!(report["action"], "enable_key_rotation");
    assert_eq!(report["matched"], 3);
    assert_eq!(report["results"][0]["outcome"]["status"], "done");
    assert_eq!(report["results"][1]["outcome"]["status"], "skipped");
    assert_eq!(
        report["results"][2]["outcome"]["detail"]["ineligible"],
        "default or shared key"
    );
}

#[test]
fn test_enable_rotation_bad_request_is_skip() {
    let t = Test::new();
    t.mock_inventory(vec![key("k1", "SM4", "2")]);
    t.mock_key_op(
        "enable-key-rotation",
        "k1",
        400,
        json!({ "error": { "error_code": "KMS.0205", "error_msg": "rotation already enabled" } }),
    );

    let output = t.run(&["enable-rotation"]);
    assert_success(&output);
    assert_stdout_contains(&output, "skipped");
    assert_stdout_contains(&output, "rotation already enabled");
}

#[test]
fn test_enable_rotation_server_error_fails_run() {
    let t = Test::new();
    t.mock_inventory(vec![key("k1", "AES_256", "2"), key("k2", "AES_256", "2")]);
    t.mock_key_op("enable-key-rotation", "k1", 500, json!({ "error_msg": "unavailable" }));
    let k2 = t.mock_key_op("enable-key-rotation", "k2", 200, json!({}));

    let output = t.run(&["enable-rotation"]);
    assert_failure(&output);
    k2.assert_hits(1);
    assert_stderr_contains(&output, "enable_key_rotation: 1 of 2 keys failed");
}

#[test]
fn test_disable_rotation_skips_pending_import() {
    let t = Test::new();
    t.mock_inventory(vec![key("k1", "AES_256", "5"), key("k2", "AES_256", "3")]);
    let k2 = t.mock_key_op("disable-key-rotation", "k2", 200, json!({}));

    let output = t.run_json(&["disable-rotation"]);
    assert_success(&output);
    k2.assert_hits(1);

    let report = stdout_json(&output);
    assert_eq!(report["results"][0]["outcome"]["status"], "skipped");
    assert_eq!(report["results"][1]["outcome"]["status"], "done");
}

#[test]
fn test_disable_rotation_bad_request_is_failure() {
    let t = Test::new();
    t.mock_inventory(vec![key("k1", "AES_256", "2")]);
    t.mock_key_op(
        "disable-key-rotation",
        "k1",
        400,
        json!({ "error": { "error_code": "KMS.0206", "error_msg": "rotation not enabled" } }),
    );

    let output = t.run(&["disable-rotation"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "rotation not enabled");
}
