//! File system abstraction for the tree rewriter.
//!
//! Walking a source tree, reading and writing its files and probing
//! candidate paths for missing extensions all go through a [`Runtime`], so a
//! rewrite run can be driven against anything that can answer these calls.
//!
//! [`NativeRuntime`](crate::NativeRuntime) is backed by the real disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("no such file or directory: {0}")]
    FileNotFound(PathBuf),

    #[error("{op} {path}: {message}")]
    Io {
        op: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("{0} does not contain UTF-8 text")]
    InvalidUtf8(PathBuf),

    /// The blocking task backing a call panicked or was cancelled.
    #[error("file system task aborted: {0}")]
    Aborted(String),
}

impl RuntimeError {
    /// Builds the error for a failed `op` on `path`, keeping "not found"
    /// distinguishable from every other failure.
    pub fn from_io(op: &'static str, path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.to_path_buf())
        } else {
            Self::Io {
                op,
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }
}

/// What a directory entry turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, fifos and the like. The walker ignores them.
    Other,
}

#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Replaces the whole content of `path`.
    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()>;

    /// Follows symlinks.
    async fn entry_kind(&self, path: &Path) -> RuntimeResult<EntryKind>;

    /// Entry names of `path` in the order the platform lists them. Names that
    /// are not UTF-8 are left out.
    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// Synchronous probe used while trying extension candidates.
    fn is_file(&self, path: &Path) -> bool;

    /// Anchor for relative base directories.
    fn cwd(&self) -> RuntimeResult<PathBuf>;

    async fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path).await?;
        String::from_utf8(bytes).map_err(|_| RuntimeError::InvalidUtf8(path.to_path_buf()))
    }
}
