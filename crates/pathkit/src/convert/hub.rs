//! Conversions through absolute paths.
//!
//! Every source type is lifted to the absolute path of its target, then
//! lowered to the destination type. This keeps the number of primitive
//! operations linear in the number of path types.

use std::path::Path;

use super::context::{ConversionContext, FileContext};
use crate::classify::{PathType, is_relative, is_url};
use crate::path::{
    dirname, extname, is_absolute, join, normalize, normalize_windows_path, relative_with_cwd,
};
use crate::runtime::Runtime;

/// Candidate suffixes tried when resolving a concrete file.
pub const PROBE_EXTENSIONS: &[&str] = &["", ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".json"];

/// First existing file for `abs`: the path itself, then with each probe
/// extension, then `index.*` inside it.
pub fn probe_file(runtime: &dyn Runtime, abs: &str) -> Option<String> {
    let direct = PROBE_EXTENSIONS
        .iter()
        .map(|ext| format!("{abs}{ext}"))
        .find(|candidate| runtime.is_file(Path::new(candidate)));
    direct.or_else(|| {
        PROBE_EXTENSIONS[1..]
            .iter()
            .map(|ext| join([abs, &format!("index{ext}")]))
            .find(|candidate| runtime.is_file(Path::new(candidate)))
    })
}

/// `to` relative to `from_dir`, always starting with `./` or `../`.
pub fn dot_relative(from_dir: &str, to: &str) -> String {
    let rel = relative_with_cwd(from_dir, from_dir, to);
    if rel.is_empty() {
        ".".to_string()
    } else if rel == ".." || rel.starts_with("../") || is_absolute(&rel) {
        rel
    } else {
        format!("./{rel}")
    }
}

fn strip_extension(path: &str) -> &str {
    let ext = extname(path);
    &path[..path.len() - ext.len()]
}

/// Same target, ignoring a script extension on either side.
fn same_target(a: &str, b: &str) -> bool {
    a == b || strip_extension(a) == strip_extension(b)
}

fn url_local(ctx: &ConversionContext, path: &str) -> Option<String> {
    ctx.url_map().get(path).map(|local| ctx.anchor(local))
}

/// Absolute path of the target `path` refers to, read as `from`.
///
/// `None` when `path` is not of that type or cannot be resolved with the
/// current configuration.
pub fn to_absolute(from: PathType, path: &str, fc: &FileContext<'_>) -> Option<String> {
    let ctx = fc.ctx;
    match from {
        PathType::Relative => {
            is_relative(path).then(|| ctx.anchor(&join([fc.importer_dir().as_str(), path])))
        }
        PathType::Absolute => is_absolute(path).then(|| normalize(path)),
        PathType::Alias => {
            let resolved = ctx.aliases().resolve(path);
            (resolved != normalize_windows_path(path)).then(|| ctx.anchor(&resolved))
        }
        PathType::Module => {
            if is_url(path) {
                return url_local(ctx, path);
            }
            let name = ctx.classifier().library_for(path)?;
            let entry = ctx.libs().get(name)?;
            let main = ctx.anchor(&entry.main_file);
            let sub = path[name.len()..].trim_start_matches('/');
            if sub.is_empty() {
                Some(main)
            } else {
                let target = join([dirname(&main).as_str(), sub]);
                Some(probe_file(fc.runtime, &target).unwrap_or(target))
            }
        }
        PathType::Bare => url_local(ctx, path),
        PathType::Dynamic => {
            let real = ctx.classifier().classify(path).path_type;
            (real != PathType::Dynamic)
                .then(|| to_absolute(real, path, fc))
                .flatten()
        }
    }
}

/// Express the absolute path `abs` as a `to` path from the importing file.
pub fn from_absolute(to: PathType, abs: &str, fc: &FileContext<'_>) -> Option<String> {
    let ctx = fc.ctx;
    match to {
        PathType::Relative => Some(dot_relative(&fc.importer_dir(), abs)),
        PathType::Absolute => Some(abs.to_string()),
        PathType::Alias => {
            let candidates = ctx.aliases().reverse_resolve(abs);
            let preferred = ctx.alias_prefix().and_then(|prefix| {
                let bare = prefix.trim_end_matches('/');
                candidates
                    .iter()
                    .find(|c| c.starts_with(prefix) || c.as_str() == bare)
                    // The alias root itself is written with the full prefix.
                    .map(|c| if c == bare { prefix.to_string() } else { c.clone() })
            });
            preferred.or_else(|| candidates.into_iter().next())
        }
        PathType::Module => module_for(ctx, abs),
        PathType::Bare => ctx
            .url_map()
            .iter()
            .find(|(_, local)| same_target(&ctx.anchor(local), abs))
            .map(|(url, _)| url.clone()),
        PathType::Dynamic => None,
    }
}

/// Workspace library specifier for `abs`: the library name for its entry
/// file or root, `name/sub` for files below the root.
fn module_for(ctx: &ConversionContext, abs: &str) -> Option<String> {
    let mut best: Option<(usize, String)> = None;
    for (name, entry) in ctx.libs() {
        if Some(name.as_str()) == ctx.current_lib() {
            continue;
        }
        let main = ctx.anchor(&entry.main_file);
        let root = dirname(&main);
        if same_target(abs, &main) || abs == root {
            return Some(name.clone());
        }
        let Some(rest) = abs.strip_prefix(root.as_str()).and_then(|r| r.strip_prefix('/')) else {
            continue;
        };
        if best.as_ref().is_none_or(|(len, _)| root.len() > *len) {
            best = Some((root.len(), format!("{name}/{rest}")));
        }
    }
    best.map(|(_, spec)| spec)
}

/// Lift with `from`, lower with `to`.
pub fn via_hub(from: PathType, to: PathType, path: &str, fc: &FileContext<'_>) -> Option<String> {
    let abs = to_absolute(from, path, fc)?;
    from_absolute(to, &abs, fc)
}

/// Path used by an `await import()` replacing a static import of `path`.
///
/// URL imports resolve to their mapped local file; anything else keeps its
/// path.
pub fn to_dynamic(from: PathType, path: &str, fc: &FileContext<'_>) -> Option<String> {
    let url_sourced = matches!(from, PathType::Bare | PathType::Module) || is_url(path);
    if !url_sourced {
        return None;
    }
    let local = url_local(fc.ctx, path)?;
    Some(dot_relative(&fc.importer_dir(), &local))
}
