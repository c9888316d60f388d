//! Test environment for isolated modelrepo runs.
//!
//! Every `TestEnv` owns a temp working directory and a separate temp config
//! home, so the user's own `~/.config/modelrepo` never leaks into a test.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::MODEL_BYTES;

/// Result of running a modelrepo CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid JSON line {line:?}: {e}"))
            })
            .collect()
    }
}

pub struct TestEnv {
    pub work_dir: TempDir,
    pub config_home: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
            config_home: TempDir::new().expect("Failed to create config home"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_modelrepo")),
        }
    }

    /// A fresh environment with `modelrepo init` already run
    pub fn initialized() -> Self {
        let env = Self::new();
        let result = env.run(&["init"]);
        assert!(result.success, "init failed: {}", result.combined_output());
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    /// Default repository root (`.modelrepo` under the work dir)
    pub fn repo_root(&self) -> PathBuf {
        self.path(".modelrepo")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.work_dir.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("MODELREPO_PATH")
            .env_remove("MODELREPO_BASE_STORAGE")
            .env_remove("MODELREPO_VERBOSITY")
            .env_remove("RUST_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute modelrepo");
        output_to_result(output)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Deploy `model.bin` under `identity`, asserting success
    pub fn deploy(&self, identity: &str, extra: &[&str]) -> TestResult {
        let model = self.write_file("model.bin", MODEL_BYTES);
        let model = model.to_str().expect("utf-8 temp path");
        let mut args = vec!["deploy", identity, "--artifact", model];
        args.extend_from_slice(extra);
        let result = self.run(&args);
        assert!(
            result.success,
            "deploy of {identity} failed: {}",
            result.combined_output()
        );
        result
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
