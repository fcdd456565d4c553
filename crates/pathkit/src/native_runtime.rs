//! [`Runtime`] over the local disk.
//!
//! Every call hops onto tokio's blocking pool, so the rewriter can keep a
//! directory's worth of files in flight without parking executor threads.

// NativeRuntime is the one place allowed to call std::fs
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::runtime::{EntryKind, Runtime, RuntimeError, RuntimeResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

async fn blocking<T, F>(op: F) -> RuntimeResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RuntimeResult<T> + Send + 'static,
{
    task::spawn_blocking(op)
        .await
        .map_err(|join| RuntimeError::Aborted(join.to_string()))?
}

fn list_names(dir: &Path) -> RuntimeResult<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| RuntimeError::from_io("list", dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| RuntimeError::from_io("list", dir, e))?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = path.to_path_buf();
        blocking(move || std::fs::read(&path).map_err(|e| RuntimeError::from_io("read", &path, e)))
            .await
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let (path, content) = (path.to_path_buf(), content.to_vec());
        blocking(move || {
            std::fs::write(&path, content).map_err(|e| RuntimeError::from_io("write", &path, e))
        })
        .await
    }

    async fn entry_kind(&self, path: &Path) -> RuntimeResult<EntryKind> {
        let path = path.to_path_buf();
        blocking(move || {
            let file_type = std::fs::metadata(&path)
                .map_err(|e| RuntimeError::from_io("stat", &path, e))?
                .file_type();
            Ok(if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            })
        })
        .await
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let path = path.to_path_buf();
        blocking(move || list_names(&path)).await
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir().map_err(|e| RuntimeError::from_io("resolve", Path::new("."), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_then_reads_text() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("index.ts");
        let runtime = NativeRuntime::new();

        runtime
            .write_file(&file, b"import { a } from './a';")
            .await
            .unwrap();
        assert_eq!(
            runtime.read_to_string(&file).await.unwrap(),
            "import { a } from './a';"
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = NativeRuntime::new()
            .read_file(&temp.path().join("missing.ts"))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn binary_content_is_not_text() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("binary.js");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        let err = NativeRuntime::new().read_to_string(&file).await.unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidUtf8(_)));
    }

    #[tokio::test]
    async fn classifies_entries() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.ts");
        fs::write(&file, b"export {};").unwrap();
        let runtime = NativeRuntime::new();

        assert_eq!(runtime.entry_kind(&file).await.unwrap(), EntryKind::File);
        assert_eq!(runtime.entry_kind(temp.path()).await.unwrap(), EntryKind::Dir);
        assert!(matches!(
            runtime.entry_kind(&temp.path().join("nope")).await,
            Err(RuntimeError::FileNotFound(_))
        ));
        assert!(runtime.is_file(&file));
        assert!(!runtime.is_file(temp.path()));
    }

    #[tokio::test]
    async fn lists_entry_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.ts"), b"").unwrap();
        fs::create_dir(temp.path().join("lib")).unwrap();

        let mut names = NativeRuntime::new().read_dir(temp.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["b.ts", "lib"]);
    }
}
