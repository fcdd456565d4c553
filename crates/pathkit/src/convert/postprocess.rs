//! Segment stripping and extension adjustment of converted paths.

use super::context::FileContext;
use super::hub::{dot_relative, probe_file, to_absolute};
use crate::classify::{PathType, is_relative};
use crate::path::{
    dirname, extname, is_absolute, join, normalize, normalize_windows_path, relative_with_cwd,
};

const SCRIPT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts"];
const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

/// Apply the configured post-processing to a path that changed.
pub fn post_process(
    from: PathType,
    to: PathType,
    original: &str,
    converted: String,
    fc: &FileContext<'_>,
) -> String {
    let stripped = strip_segments(from, original, converted, fc);
    adjust_extension(to, stripped, fc.ctx.target_extension())
}

/// Remove the first matching strip pattern from the front of `path`,
/// keeping a leading `/`. Stripping the whole path is not a match.
fn strip_leading(path: &str, patterns: &[String]) -> Option<String> {
    let (root, body) = match path.strip_prefix('/') {
        Some(body) => ("/", body),
        None => ("", path),
    };
    patterns
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .find_map(|p| {
            body.strip_prefix(p)
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|rest| !rest.is_empty())
                .map(|rest| format!("{root}{rest}"))
        })
}

/// Length of the leading run of `./` and `../` segments.
fn dot_run_len(path: &str) -> usize {
    let mut len = 0;
    loop {
        let rest = &path[len..];
        if rest.starts_with("./") {
            len += 2;
        } else if rest.starts_with("../") {
            len += 3;
        } else {
            return len;
        }
    }
}

fn strip_segments(
    from: PathType,
    original: &str,
    converted: String,
    fc: &FileContext<'_>,
) -> String {
    let ctx = fc.ctx;
    let patterns = ctx.strip_segments();
    if patterns.is_empty() {
        return converted;
    }

    if from == PathType::Alias && is_relative(&converted) {
        // Both endpoints may have moved; strip each relative to the base
        // directory and recompute the path between them.
        let Some(target) = to_absolute(PathType::Alias, original, fc) else {
            return converted;
        };
        let base = ctx.base_dir();
        let relocate = |abs: &str| {
            let rel = relative_with_cwd(base, base, abs);
            match strip_leading(&rel, patterns) {
                Some(stripped) => join([base, stripped.as_str()]),
                None => abs.to_string(),
            }
        };
        let importer = relocate(fc.source_file);
        let target = relocate(&target);
        return dot_relative(&dirname(&importer), &target);
    }

    let lead = dot_run_len(&converted);
    let Some(stripped) = strip_leading(&converted[lead..], patterns) else {
        return converted;
    };
    let candidate = format!("{}{}", &converted[..lead], stripped);

    let kept = resolve_local(&candidate, fc).and_then(|abs| probe_file(fc.runtime, &abs));
    if kept.is_none() {
        tracing::debug!(
            path = %converted,
            stripped = %candidate,
            "strip would change the resolved target; keeping exact path"
        );
        return converted;
    }
    candidate
}

/// Absolute location a stripped candidate points at, when it is a local
/// path this context can resolve.
fn resolve_local(candidate: &str, fc: &FileContext<'_>) -> Option<String> {
    let ctx = fc.ctx;
    if is_relative(candidate) {
        return Some(ctx.anchor(&join([fc.importer_dir().as_str(), candidate])));
    }
    if is_absolute(candidate) {
        return Some(normalize(candidate));
    }
    let resolved = ctx.aliases().resolve(candidate);
    (resolved != normalize_windows_path(candidate)).then(|| ctx.anchor(&resolved))
}

/// Swap a script extension for `target_ext` on local paths.
pub fn adjust_extension(to: PathType, path: String, target_ext: Option<&str>) -> String {
    let Some(target_ext) = target_ext else {
        return path;
    };
    if matches!(to, PathType::Bare | PathType::Module) {
        return path;
    }
    if DECLARATION_SUFFIXES.iter().any(|s| path.ends_with(s)) {
        return path;
    }
    let ext = extname(&path);
    if ext.is_empty() || ext == target_ext || !SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
        return path;
    }
    format!("{}{}", &path[..path.len() - ext.len()], target_ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_first_matching_pattern() {
        let patterns = vec!["src".to_string(), "dist/".to_string()];
        assert_eq!(strip_leading("src/utils/a", &patterns).as_deref(), Some("utils/a"));
        assert_eq!(strip_leading("/dist/a", &patterns).as_deref(), Some("/a"));
        assert_eq!(strip_leading("srcx/a", &patterns), None);
        assert_eq!(strip_leading("src", &patterns), None);
    }

    #[test]
    fn measures_dot_runs() {
        assert_eq!(dot_run_len("./a"), 2);
        assert_eq!(dot_run_len("../../a"), 6);
        assert_eq!(dot_run_len("./../a"), 5);
        assert_eq!(dot_run_len("a/b"), 0);
    }

    #[test]
    fn adjusts_script_extensions() {
        let ext = Some(".js");
        assert_eq!(adjust_extension(PathType::Relative, "./a.ts".into(), ext), "./a.js");
        assert_eq!(adjust_extension(PathType::Alias, "@/a.tsx".into(), ext), "@/a.js");
        assert_eq!(adjust_extension(PathType::Relative, "./a".into(), ext), "./a");
        assert_eq!(adjust_extension(PathType::Relative, "./a.css".into(), ext), "./a.css");
        assert_eq!(adjust_extension(PathType::Relative, "./a.d.ts".into(), ext), "./a.d.ts");
        assert_eq!(adjust_extension(PathType::Bare, "pkg/a.ts".into(), ext), "pkg/a.ts");
        assert_eq!(adjust_extension(PathType::Relative, "./a.ts".into(), None), "./a.ts");
    }
}
