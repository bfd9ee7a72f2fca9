//! Shared testing harness for `costdraft` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_PAYLOAD: &str = r#"{
  "project_info_payload": [
    {"question": "What is the Project Type?", "answer": "Rear extension"},
    {"question": "What is the gross internal area?", "answer": 42},
    {"question": "Describe site-specific conditions", "answer": "Sloped garden"}
  ],
  "cost_info_payload": [
    {
      "name": "Roof",
      "generic": [{"title": "Tiles", "isChecked": true, "rate": 50}],
      "specific": [{"title": "Flashing", "isChecked": false}]
    }
  ]
}"#;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Directory used as the working directory for every invocation.
    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `costdraft` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("costdraft").expect("Failed to locate costdraft binary");
        cmd.current_dir(self.work_dir()).env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the work directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write the sample survey payload.
    pub fn write_payload(&self) -> PathBuf {
        self.write("payload.json", SAMPLE_PAYLOAD)
    }
}
