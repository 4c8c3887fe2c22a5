//! Shared testing utilities for promptdeck CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated workspace, state directory and home.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    state_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let state_dir = root.path().join("state");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir, state_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Workspace directory whose form state the CLI uses.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Build a command for the compiled binary bound to the test workspace.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("promptdeck").expect("Failed to locate promptdeck binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.home())
            .env("PROMPTDECK_STATE_DIR", &self.state_dir)
            .env_remove("PROMPTDECK_CONFIG")
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("XDG_DATA_HOME")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a configuration file under the temp root and return its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.root.path().join("config.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Create a file relative to the temp root.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Persisted snapshot files in the state directory.
    pub fn state_files(&self) -> Vec<PathBuf> {
        match fs::read_dir(&self.state_dir) {
            Ok(entries) => entries.flatten().map(|entry| entry.path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.cli().args(args).assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("stdout is not UTF-8")
    }
}
