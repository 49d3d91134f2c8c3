//! Shared fixture for the CLI integration tests.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    data_dir: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".catalog");

        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn page_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.html")
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalog");
        cmd.env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg("plain");
        cmd
    }

    pub fn json_command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalog");
        cmd.env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg("json");
        cmd
    }

    /// `catalog init --page <fixture>`
    pub fn init(&self) -> anyhow::Result<()> {
        let output = self
            .command()
            .arg("init")
            .arg("--page")
            .arg(Self::page_path())
            .output()?;

        if !output.status.success() {
            anyhow::bail!("init failed: {}", String::from_utf8_lossy(&output.stderr));
        }
        Ok(())
    }

    pub fn json(&self, args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let output = self.json_command().args(args).output()?;
        if !output.status.success() {
            anyhow::bail!(
                "{:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
