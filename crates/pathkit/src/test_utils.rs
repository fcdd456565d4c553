//! Helpers for exercising the rewriter against a scratch directory.

use crate::NativeRuntime;
use crate::runtime::{EntryKind, Runtime, RuntimeResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Disk-backed runtime pinned to a working directory. It tallies file reads
/// and writes so a test can tell whether a run touched any content.
#[derive(Debug)]
pub struct TestRuntime {
    disk: NativeRuntime,
    cwd: PathBuf,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl TestRuntime {
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            disk: NativeRuntime::new(),
            cwd,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Runtime for TestRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.disk.read_file(path).await
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.disk.write_file(path, content).await
    }

    async fn entry_kind(&self, path: &Path) -> RuntimeResult<EntryKind> {
        self.disk.entry_kind(path).await
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        self.disk.read_dir(path).await
    }

    fn is_file(&self, path: &Path) -> bool {
        self.disk.is_file(path)
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
