//! Tests for `keyward create-key-with-alias`.

use crate::support::*;

const MANIFEST_URL: &str =
    "https://governance.obs.sa-brazil-1.myhuaweicloud.com/kms/aliases.json";

#[test]
fn test_creates_only_missing_aliases() {
    let t = Test::new();
    t.mock_aliases(&["a", "b"]);
    let create_key = t.mock_create_key("new-c");
    let alias_c = t.mock_create_alias("c");

    let output = t.run_json(&["create-key-with-alias", "--alias", "a", "--alias", "c"]);
    assert_success(&output);

    create_key.assert_hits(1);
    alias_c.assert_hits(1);
    let value = stdout_json(&output);
    assert_eq!(value["count"], 1);
    assert_eq!(value["created"][0]["alias"], "c");
    assert_eq!(value["created"][0]["key_id"], "new-c");
}

#[test]
fn test_aliases_from_config() {
    let t = Test::new();
    t.write_config("[alias_import]\nkey_aliases = [\"app\"]\npace_ms = 0\n");
    t.mock_aliases(&[]);
    t.mock_create_key("new-app");
    let alias = t.mock_create_alias("app");

    let output = t.run(&["create-key-with-alias"]);
    assert_success(&output);
    alias.assert_hits(1);
    assert_stdout_contains(&output, "alias/app");
}

#[test]
fn test_nothing_requested_makes_no_calls() {
    let t = Test::new();
    let list = t.mock_aliases(&[]);

    let output = t.run(&["create-key-with-alias"]);
    assert_success(&output);
    list.assert_hits(0);
    assert_stdout_contains(&output, "no aliases to create");
}

#[test]
fn test_manifest_aliases_are_merged() {
    let t = Test::new();
    t.mock_object("governance", "kms/aliases.json", 200, r#"{"obs_key_aliases":["m1","a"]}"#);
    t.mock_aliases(&["a"]);
    let create_key = t.mock_create_key("new-1");
    let m1 = t.mock_create_alias("m1");
    let s1 = t.mock_create_alias("s1");

    let output = t.run_json(&[
        "create-key-with-alias",
        "--alias",
        "s1",
        "--obs-url",
        MANIFEST_URL,
        "--pace-ms",
        "0",
    ]);
    assert_success(&output);

    create_key.assert_hits(2);
    m1.assert_hits(1);
    s1.assert_hits(1);
    assert_eq!(stdout_json(&output)["count"], 2);
}

#[test]
fn test_refused_manifest_fails() {
    let t = Test::new();
    t.mock_object("governance", "kms/aliases.json", 403, "");
    let list = t.mock_aliases(&[]);

    let output = t.run(&["create-key-with-alias", "--obs-url", MANIFEST_URL]);
    assert_failure(&output);
    list.assert_hits(0);
    assert_stderr_contains(&output, "get obs object failed: 403");
}

#[test]
fn test_malformed_manifest_url_fails() {
    let t = Test::new();

    let output = t.run(&[
        "create-key-with-alias",
        "--obs-url",
        "https://governance.example.com/aliases.json",
    ]);
    assert_failure(&output);
}
