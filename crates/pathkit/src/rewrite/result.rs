use serde::{Deserialize, Serialize};

/// One rewritten path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathChange {
    pub from: String,
    pub to: String,
}

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChangeResult {
    pub file_path: String,
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub changes: Vec<PathChange>,
}

impl FileChangeResult {
    pub(crate) fn unchanged(file_path: String) -> Self {
        Self {
            file_path,
            success: true,
            message: "No changes".to_string(),
            changes: Vec::new(),
        }
    }

    pub(crate) fn updated(file_path: String, changes: Vec<PathChange>, dry_run: bool) -> Self {
        let verb = if dry_run { "Would update" } else { "Updated" };
        let noun = if changes.len() == 1 { "path" } else { "paths" };
        Self {
            message: format!("{verb} {} {noun}", changes.len()),
            file_path,
            success: true,
            changes,
        }
    }

    pub(crate) fn failed(file_path: String, message: impl Into<String>) -> Self {
        Self {
            file_path,
            success: false,
            message: message.into(),
            changes: Vec::new(),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.success && !self.changes.is_empty()
    }
}

/// Totals over the results of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub processed: usize,
    pub modified: usize,
    pub errored: usize,
}

impl RunSummary {
    pub fn from_results(results: &[FileChangeResult]) -> Self {
        Self {
            processed: results.len(),
            modified: results.iter().filter(|r| r.is_modified()).count(),
            errored: results.iter().filter(|r| !r.success).count(),
        }
    }
}
