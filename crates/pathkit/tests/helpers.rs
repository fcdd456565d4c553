//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pathkit::path::to_slash_path;
use pathkit::test_utils::TestRuntime;
use tempfile::TempDir;

/// A temporary project directory plus a counting runtime rooted at it.
pub struct Project {
    temp: TempDir,
    pub runtime: Arc<TestRuntime>,
}

impl Project {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));
        Self { temp, runtime }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Root in slash form, as it appears in rewritten paths.
    pub fn slash_root(&self) -> String {
        to_slash_path(self.temp.path()).unwrap()
    }

    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.temp.path().join(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.temp.path().join(rel).exists()
    }
}
