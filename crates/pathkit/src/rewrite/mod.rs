//! Rewriting import/export paths across a directory tree.
//!
//! [`run`] walks the base directory depth first, processing the matching
//! files of each directory concurrently (bounded by
//! [`RewriteOptions::concurrency`]) before descending into its
//! subdirectories one at a time. Results come back in listing order.
//!
//! Configuration is checked before any file is read: a run that cannot
//! succeed fails with [`Error::Config`] and leaves the tree untouched.
//! Failures while processing a single file are reported in that file's
//! [`FileChangeResult`] and do not stop the run.

mod edits;
mod plan;
mod result;

pub use edits::{Applied, Edit, EditList, OffsetMapping};
pub use result::{FileChangeResult, PathChange, RunSummary};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::classify::PathType;
use crate::convert::{ConversionContext, ConversionMatrix, ExtensionFilter, FileContext, LibraryEntry};
use crate::error::{ConfigError, Error, Result};
use crate::path::to_slash_path;
use crate::runtime::{EntryKind, Runtime, RuntimeError, RuntimeResult};

/// Extensions rewritten when none are configured.
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs", ".mts", ".cts", ".vue", ".svelte", ".astro",
];

pub const DEFAULT_CONCURRENCY: usize = 5;

const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Options for one rewrite run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriteOptions {
    /// Root of the tree; relative paths are taken from the runtime's
    /// working directory.
    pub base_dir: PathBuf,
    pub from_type: PathType,
    pub to_type: PathType,
    /// Alias standing for `base_dir`, e.g. `@/`.
    pub alias_prefix: Option<String>,
    /// Extra aliases; relative targets are anchored at `base_dir`.
    pub aliases: IndexMap<String, String>,
    pub libs: IndexMap<String, LibraryEntry>,
    pub current_lib_name: Option<String>,
    /// URL → local path, relative to `base_dir` or absolute.
    pub url_map: IndexMap<String, String>,
    /// Leading segments removed from converted paths.
    pub strip: Vec<String>,
    pub ext_filter: ExtensionFilter,
    pub target_extension: Option<String>,
    pub file_extensions: Vec<String>,
    pub concurrency: usize,
    #[serde(alias = "distJsrDryRun")]
    pub dry_run: bool,
    pub generate_source_map: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            from_type: PathType::Relative,
            to_type: PathType::Alias,
            alias_prefix: None,
            aliases: IndexMap::new(),
            libs: IndexMap::new(),
            current_lib_name: None,
            url_map: IndexMap::new(),
            strip: Vec::new(),
            ext_filter: ExtensionFilter::Any,
            target_extension: None,
            file_extensions: DEFAULT_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            concurrency: DEFAULT_CONCURRENCY,
            dry_run: false,
            generate_source_map: false,
        }
    }
}

impl RewriteOptions {
    pub fn new(base_dir: impl Into<PathBuf>, from_type: PathType, to_type: PathType) -> Self {
        Self {
            base_dir: base_dir.into(),
            from_type,
            to_type,
            ..Self::default()
        }
    }

    /// Build the shared conversion context. `base_dir` must be absolute.
    pub fn context(&self) -> Result<ConversionContext> {
        let base_dir = to_slash_path(&self.base_dir)?;
        let mut builder = ConversionContext::builder(base_dir)
            .alias_prefix(self.alias_prefix.clone())
            .libs(self.libs.clone())
            .current_lib(self.current_lib_name.clone())
            .url_map(self.url_map.clone())
            .strip_segments(self.strip.iter().cloned())
            .extension_filter(self.ext_filter.clone())
            .target_extension(self.target_extension.clone());
        for (alias, target) in &self.aliases {
            builder = builder.alias(alias.clone(), target.clone());
        }
        Ok(builder.build()?)
    }

    fn matches_extension(&self, name: &str) -> bool {
        self.file_extensions.iter().any(|ext| {
            let ext = ext.trim_start_matches('.');
            !ext.is_empty()
                && name
                    .strip_suffix(ext)
                    .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
        })
    }
}

/// Rewrite every matching file under `options.base_dir` with the standard
/// conversion matrix.
pub async fn run(options: RewriteOptions, runtime: Arc<dyn Runtime>) -> Result<Vec<FileChangeResult>> {
    run_with_matrix(options, ConversionMatrix::standard(), runtime).await
}

/// [`run`] with a caller-supplied conversion matrix.
pub async fn run_with_matrix(
    mut options: RewriteOptions,
    matrix: ConversionMatrix,
    runtime: Arc<dyn Runtime>,
) -> Result<Vec<FileChangeResult>> {
    if options.base_dir.is_relative() {
        let cwd = runtime.cwd().map_err(|source| Error::FileIo {
            path: options.base_dir.clone(),
            source,
        })?;
        options.base_dir = cwd.join(&options.base_dir);
    }
    if options.concurrency == 0 {
        return Err(ConfigError::InvalidValue {
            field: "concurrency",
            reason: "must be at least 1".to_string(),
        }
        .into());
    }

    let (from, to) = (options.from_type, options.to_type);
    let ctx = options.context()?;
    ctx.validate_for(from, to)?;
    if !matrix.supports(from, to) {
        // Not fatal: every matching path is left as written.
        let unsupported = Error::UnsupportedConversion { from, to };
        warn!(error = %unsupported, "paths will not be converted");
    }

    let root = PathBuf::from(ctx.base_dir());
    check_base_dir(&root, runtime.as_ref()).await?;

    info!(base_dir = %ctx.base_dir(), %from, %to, dry_run = options.dry_run, "rewriting paths");
    let rewriter = Arc::new(Rewriter {
        ctx,
        matrix,
        options,
        runtime,
    });
    let results = rewriter.walk(root).await?;

    let summary = RunSummary::from_results(&results);
    info!(
        processed = summary.processed,
        modified = summary.modified,
        errored = summary.errored,
        "rewrite finished"
    );
    Ok(results)
}

async fn check_base_dir(dir: &Path, runtime: &dyn Runtime) -> Result<()> {
    match runtime.entry_kind(dir).await {
        Ok(EntryKind::Dir) => Ok(()),
        Ok(_) => Err(ConfigError::BaseDirNotDirectory(dir.to_path_buf()).into()),
        Err(RuntimeError::FileNotFound(_)) => Err(ConfigError::BaseDirNotFound(dir.to_path_buf()).into()),
        Err(source) => Err(Error::FileIo {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

#[derive(Debug, Default)]
struct Listing {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

#[derive(Debug)]
struct Rewriter {
    ctx: ConversionContext,
    matrix: ConversionMatrix,
    options: RewriteOptions,
    runtime: Arc<dyn Runtime>,
}

impl Rewriter {
    async fn walk(self: &Arc<Self>, root: PathBuf) -> Result<Vec<FileChangeResult>> {
        let mut results = Vec::new();
        let mut pending = vec![root.clone()];

        while let Some(dir) = pending.pop() {
            let listing = match self.list(&dir).await {
                Ok(listing) => listing,
                Err(source) if dir == root => return Err(Error::FileIo { path: dir, source }),
                Err(err) => {
                    warn!(dir = %dir.display(), error = %err, "cannot list directory");
                    results.push(FileChangeResult::failed(lossy(&dir), err.to_string()));
                    continue;
                }
            };
            results.extend(self.process_files(listing.files).await);
            // Reversed so the first subdirectory is visited next.
            pending.extend(listing.dirs.into_iter().rev());
        }
        Ok(results)
    }

    async fn list(&self, dir: &Path) -> RuntimeResult<Listing> {
        let mut names = self.runtime.read_dir(dir).await?;
        names.sort();

        let mut listing = Listing::default();
        for name in names {
            if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_str()) {
                continue;
            }
            let path = dir.join(&name);
            let kind = match self.runtime.entry_kind(&path).await {
                Ok(kind) => kind,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            match kind {
                EntryKind::Dir => listing.dirs.push(path),
                EntryKind::File if self.options.matches_extension(&name) => listing.files.push(path),
                _ => {}
            }
        }
        Ok(listing)
    }

    async fn process_files(self: &Arc<Self>, files: Vec<PathBuf>) -> Vec<FileChangeResult> {
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));
        let mut join_set = JoinSet::new();

        for (index, path) in files.iter().cloned().enumerate() {
            // The semaphore is never closed, so this only waits.
            let permit = Arc::clone(&semaphore).acquire_owned().await.ok();
            let rewriter = Arc::clone(self);
            join_set.spawn(async move {
                let _permit = permit;
                (index, rewriter.process_file(path).await)
            });
        }

        let mut slots: Vec<Option<FileChangeResult>> = vec![None; files.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(err) => warn!(error = %err, "file task failed"),
            }
        }

        files
            .iter()
            .zip(slots)
            .map(|(path, slot)| {
                slot.unwrap_or_else(|| FileChangeResult::failed(lossy(path), "file task did not complete"))
            })
            .collect()
    }

    async fn process_file(&self, path: PathBuf) -> FileChangeResult {
        let file_path = match to_slash_path(&path) {
            Ok(p) => p,
            Err(err) => return FileChangeResult::failed(lossy(&path), err.to_string()),
        };
        debug!(file = %file_path, "processing");

        let source = match self.runtime.read_to_string(&path).await {
            Ok(source) => source,
            Err(err) => {
                warn!(file = %file_path, error = %err, "cannot read file");
                return FileChangeResult::failed(file_path, err.to_string());
            }
        };

        let plan = {
            let fc = FileContext::new(&self.ctx, &file_path, self.runtime.as_ref());
            plan::plan(
                &source,
                self.options.from_type,
                self.options.to_type,
                &self.matrix,
                &fc,
            )
        };
        if plan.edits.is_empty() {
            return FileChangeResult::unchanged(file_path);
        }

        let applied = plan.edits.apply(&source);
        if applied.code == source {
            return FileChangeResult::unchanged(file_path);
        }
        if self.options.dry_run {
            return FileChangeResult::updated(file_path, plan.changes, true);
        }

        if let Err(err) = self.runtime.write_file(&path, applied.code.as_bytes()).await {
            warn!(file = %file_path, error = %err, "cannot write file");
            return FileChangeResult::failed(file_path, err.to_string());
        }

        let mut result = FileChangeResult::updated(file_path, plan.changes, false);
        if self.options.generate_source_map {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let map = applied.source_map(&source, name).to_json_string();
            let map_path = source_map_path(&path);
            if let Err(err) = self.runtime.write_file(&map_path, map.as_bytes()).await {
                warn!(file = %result.file_path, error = %err, "cannot write source map");
                result.message = format!("{} (source map not written: {err})", result.message);
            }
        }
        debug!(file = %result.file_path, changes = result.changes.len(), "rewritten");
        result
    }
}

fn source_map_path(path: &Path) -> PathBuf {
    let mut map: OsString = path.as_os_str().to_owned();
    map.push(".map");
    PathBuf::from(map)
}

fn lossy(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
