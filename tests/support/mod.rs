//! Test support utilities for keyward integration tests.
//!
//! Every test gets its own mock Huawei Cloud endpoint and a temp dir
//! holding a `keyward.toml` that points both KMS and OBS at it.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use httpmock::MockServer;
use tempfile::TempDir;

pub const PROJECT: &str = "proj-1";
pub const REGION: &str = "sa-brazil-1";

/// Test environment: a mock endpoint and an isolated config dir.
///
/// Child processes get the config path through `KEYWARD_CONFIG` and run
/// in `dir`, so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
    pub server: MockServer,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let server = MockServer::start();
        let t = Self { dir, server };
        t.write_config("");
        t
    }

    /// Rewrite `keyward.toml`, appending `extra` after the `[cloud]` table.
    pub fn write_config(&self, extra: &str) {
        let config = format!(
            "[cloud]\n\
             region = \"{}\"\n\
             project_id = \"{}\"\n\
             kms_endpoint = \"{}\"\n\
             obs_endpoint = \"{}\"\n\
             timeout_secs = 5\n\n{}",
            REGION,
            PROJECT,
            self.server.base_url(),
            self.server.base_url(),
            extra
        );
        std::fs::write(self.config_path(), config).expect("failed to write config");
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("keyward.toml")
    }

    /// Path of a KMS operation on the mock endpoint.
    pub fn kms_path(operation: &str) -> String {
        format!("/v1.0/{}/kms/{}", PROJECT, operation)
    }
}
