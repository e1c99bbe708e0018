//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A keyward command wired to this environment.
    ///
    /// Credentials are set, inherited cloud and log settings are cleared and
    /// color is off so output can be matched literally.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keyward").expect("failed to find keyward binary");
        cmd.current_dir(self.dir.path());
        cmd.env("KEYWARD_CONFIG", self.config_path());
        cmd.env("HUAWEI_ACCESS_KEY_ID", "AK-TEST");
        cmd.env("HUAWEI_SECRET_ACCESS_KEY", "SK-TEST");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("HUAWEI_DEFAULT_REGION");
        cmd.env_remove("HUAWEI_PROJECT_ID");
        cmd.env_remove("KEYWARD_LOG");
        cmd
    }

    /// Run keyward with `args`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run keyward")
    }

    /// Run keyward with `args` plus `--json`.
    pub fn run_json(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .arg("--json")
            .output()
            .expect("failed to run keyward")
    }
}
