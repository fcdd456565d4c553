//! Forward-slash path algebra.
//!
//! Every function here is pure string manipulation: no file system access and
//! no implicit process state. Operations that need a working directory
//! (`resolve`, `relative`) take it explicitly, either as an argument or via a
//! [`PathContext`].
//!
//! Windows-style input is accepted everywhere. Backslashes become forward
//! slashes and leading drive letters are upper-cased before any other
//! processing, so `C:\foo\..\bar` and `c:/bar` normalize to the same value.

mod platform;

pub use platform::Platform;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the path algebra.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Input could not be interpreted as a UTF-8 path string.
    #[error("invalid input type: path {0:?} is not valid UTF-8")]
    InvalidInputType(PathBuf),

    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(String),
}

/// Working-directory context for operations that resolve relative input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    cwd: String,
}

impl PathContext {
    /// Create a context anchored at `cwd`.
    pub fn new(cwd: impl AsRef<str>) -> Self {
        Self {
            cwd: normalize_windows_path(cwd.as_ref()),
        }
    }

    /// Capture the process working directory once.
    pub fn from_env() -> Result<Self, PathError> {
        let cwd = std::env::current_dir().map_err(|e| PathError::WorkingDirectory(e.to_string()))?;
        Ok(Self::new(to_slash_path(&cwd)?))
    }

    /// The working directory in slash form.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn resolve<I, S>(&self, segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        resolve_with_cwd(&self.cwd, segments)
    }

    pub fn relative(&self, from: &str, to: &str) -> String {
        relative_with_cwd(&self.cwd, from, to)
    }
}

/// Convert an OS path into a slash path string.
///
/// Non-UTF-8 paths are rejected rather than lossily converted.
pub fn to_slash_path(path: &Path) -> Result<String, PathError> {
    path.to_str()
        .map(normalize_windows_path)
        .ok_or_else(|| PathError::InvalidInputType(path.to_path_buf()))
}

/// Normalize an OS string, rejecting non-UTF-8 input.
pub fn normalize_os(path: &OsStr) -> Result<String, PathError> {
    path.to_str()
        .map(normalize)
        .ok_or_else(|| PathError::InvalidInputType(PathBuf::from(path)))
}

/// Replace backslashes with forward slashes and upper-case a leading drive
/// letter.
pub fn normalize_windows_path(input: &str) -> String {
    let mut out = input.replace('\\', "/");
    let bytes = out.as_bytes();
    let has_drive = bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/');
    if has_drive {
        out[..1].make_ascii_uppercase();
    }
    out
}

fn is_drive_only(path: &str) -> bool {
    let b = path.as_bytes();
    b.len() == 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

fn is_sep(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

/// Whether `path` is rooted: `/x`, a UNC `//server` prefix, or `C:/`.
pub fn is_absolute(path: &str) -> bool {
    let b = path.as_bytes();
    match b {
        [first, rest @ ..] if is_sep(*first) => match rest {
            [] => true,
            [second, tail @ ..] if is_sep(*second) => tail.first() != Some(&b'.'),
            _ => true,
        },
        [drive, b':', sep, ..] => drive.is_ascii_alphabetic() && is_sep(*sep),
        _ => false,
    }
}

/// Collapse `.` and `..` segments and duplicate separators.
///
/// Leading and trailing separators are not part of the output. When
/// `allow_above_root` is set, `..` segments that cannot be collapsed are kept.
pub fn normalize_string(path: &str, allow_above_root: bool) -> String {
    let bytes = path.as_bytes();
    let mut res = String::with_capacity(path.len());
    let mut last_segment_length = 0usize;
    let mut last_slash: isize = -1;
    let mut dots: i32 = 0;
    let mut ch: Option<u8> = None;

    let mut index = 0usize;
    while index <= bytes.len() {
        let current = if index < bytes.len() {
            bytes[index]
        } else if ch == Some(b'/') {
            break;
        } else {
            b'/'
        };
        ch = Some(current);

        if current == b'/' {
            if last_slash == index as isize - 1 || dots == 1 {
                // empty or `.` segment
            } else if dots == 2 {
                let ends_with_dotdot = res.len() >= 2
                    && last_segment_length == 2
                    && res.ends_with("..");
                if !ends_with_dotdot {
                    if res.len() > 2 {
                        match res.rfind('/') {
                            None => {
                                res.clear();
                                last_segment_length = 0;
                            }
                            Some(cut) => {
                                res.truncate(cut);
                                last_segment_length = match res.rfind('/') {
                                    Some(prev) => res.len() - 1 - prev,
                                    None => res.len(),
                                };
                            }
                        }
                        last_slash = index as isize;
                        dots = 0;
                        index += 1;
                        continue;
                    } else if !res.is_empty() {
                        res.clear();
                        last_segment_length = 0;
                        last_slash = index as isize;
                        dots = 0;
                        index += 1;
                        continue;
                    }
                }
                if allow_above_root {
                    res.push_str(if res.is_empty() { ".." } else { "/.." });
                    last_segment_length = 2;
                }
            } else {
                let start = (last_slash + 1) as usize;
                if !res.is_empty() {
                    res.push('/');
                }
                res.push_str(&path[start..index]);
                last_segment_length = index - start;
            }
            last_slash = index as isize;
            dots = 0;
        } else if current == b'.' && dots != -1 {
            dots += 1;
        } else {
            dots = -1;
        }
        index += 1;
    }

    res
}

/// Normalize a path into canonical slash form.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let path = normalize_windows_path(path);
    let is_unc = path.starts_with("//");
    let is_path_absolute = is_absolute(&path);
    let trailing_separator = path.ends_with('/');

    let mut out = normalize_string(&path, !is_path_absolute);
    if out.is_empty() {
        if is_path_absolute {
            return "/".to_string();
        }
        return if trailing_separator { "./" } else { "." }.to_string();
    }
    if trailing_separator {
        out.push('/');
    }
    if is_drive_only(&out) {
        out = normalize_windows_path(&out);
        out.push('/');
    }

    if is_unc {
        if !is_path_absolute {
            return format!("//./{out}");
        }
        return format!("//{out}");
    }

    if is_path_absolute && !is_absolute(&out) {
        format!("/{out}")
    } else {
        out
    }
}

/// Join segments with a single separator at each seam, then normalize.
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for segment in segments {
        let seg = segment.as_ref();
        if seg.is_empty() {
            continue;
        }
        if path.is_empty() {
            path.push_str(seg);
            continue;
        }
        let path_trailing = path.ends_with('/');
        let seg_leading = seg.starts_with('/');
        if path_trailing && seg_leading {
            path.push_str(&seg[1..]);
        } else if path_trailing || seg_leading {
            path.push_str(seg);
        } else {
            path.push('/');
            path.push_str(seg);
        }
    }
    normalize(&path)
}

/// Resolve segments right to left, falling back to `cwd`.
pub fn resolve_with_cwd<I, S>(cwd: &str, segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let segments: Vec<String> = segments
        .into_iter()
        .map(|s| normalize_windows_path(s.as_ref()))
        .collect();
    let cwd = normalize_windows_path(cwd);

    let mut resolved = String::new();
    let mut resolved_absolute = false;

    for segment in segments.iter().rev().chain(std::iter::once(&cwd)) {
        if resolved_absolute {
            break;
        }
        if segment.is_empty() {
            continue;
        }
        resolved = format!("{segment}/{resolved}");
        resolved_absolute = is_absolute(segment);
    }

    let normalized = normalize_string(&resolved, !resolved_absolute);
    if resolved_absolute && !is_absolute(&normalized) {
        return format!("/{normalized}");
    }
    if normalized.is_empty() {
        ".".to_string()
    } else {
        normalized
    }
}

fn strip_root_folder(path: String) -> String {
    // `/` -> ``, `/C:` -> `C:`
    let rest = &path[1.min(path.len())..];
    if path == "/" {
        String::new()
    } else if path.starts_with('/') && is_drive_only(rest) {
        rest.to_string()
    } else {
        path
    }
}

/// Relative path from `from` to `to`, both resolved against `cwd` first.
pub fn relative_with_cwd(cwd: &str, from: &str, to: &str) -> String {
    let from = strip_root_folder(resolve_with_cwd(cwd, [from]));
    let to = strip_root_folder(resolve_with_cwd(cwd, [to]));
    let from_parts: Vec<&str> = from.split('/').collect();
    let to_parts: Vec<&str> = to.split('/').collect();

    let drive_of = |s: &str| s.as_bytes().get(1) == Some(&b':');
    if drive_of(to_parts[0]) && drive_of(from_parts[0]) && from_parts[0] != to_parts[0] {
        return to;
    }

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat_n("..", from_parts.len() - common);
    ups.chain(to_parts[common..].iter().copied())
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent directory of `path`.
pub fn dirname(path: &str) -> String {
    let normalized = normalize_windows_path(path);
    let trimmed = normalized.strip_suffix('/').unwrap_or(&normalized);
    let mut segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
    segments.pop();
    if segments.len() == 1 && is_drive_only(&segments[0]) {
        segments[0].push('/');
    }
    let joined = segments.join("/");
    if !joined.is_empty() {
        joined
    } else if is_absolute(path) {
        "/".to_string()
    } else {
        ".".to_string()
    }
}

/// Last non-empty segment of `path`, minus `ext` when it matches the tail.
pub fn basename(path: &str, ext: Option<&str>) -> String {
    let normalized = normalize_windows_path(path);
    let last = normalized
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or_default();
    match ext {
        Some(ext) if !ext.is_empty() && last.ends_with(ext) => {
            last[..last.len() - ext.len()].to_string()
        }
        _ => last.to_string(),
    }
}

/// Extension of the last segment, including the leading dot.
///
/// Returns `""` for `.`, `..` and names whose only dot is the first byte.
pub fn extname(path: &str) -> String {
    let normalized = normalize_windows_path(path);
    let last = normalized.rsplit('/').next().unwrap_or_default();
    if last == "." || last == ".." {
        return String::new();
    }
    match last.rfind('.') {
        Some(0) | None => String::new(),
        Some(dot) => last[dot..].to_string(),
    }
}

/// Decomposed path, as produced by [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPath {
    pub root: String,
    pub dir: String,
    pub base: String,
    pub ext: String,
    pub name: String,
}

pub fn parse(path: &str) -> ParsedPath {
    let bytes = path.as_bytes();
    let root = match bytes {
        [first, ..] if is_sep(*first) => "/".to_string(),
        [drive, b':', sep, ..] if drive.is_ascii_alphabetic() && is_sep(*sep) => {
            format!("{}:/", *drive as char)
        }
        _ => String::new(),
    };
    let base = basename(path, None);
    let ext = extname(&base);
    let name = base[..base.len() - ext.len()].to_string();
    ParsedPath {
        root,
        dir: dirname(path),
        base,
        ext,
        name,
    }
}

/// Recompose a path from its parts. `base` wins over `name` + `ext`.
pub fn format(parts: &ParsedPath) -> String {
    let ext = if parts.ext.is_empty() || parts.ext.starts_with('.') {
        parts.ext.clone()
    } else {
        format!(".{}", parts.ext)
    };
    let base = if parts.base.is_empty() {
        format!("{}{}", parts.name, ext)
    } else {
        parts.base.clone()
    };
    let segments: Vec<&str> = [parts.root.as_str(), parts.dir.as_str(), base.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    if parts.root.is_empty() {
        normalize_windows_path(&segments.join("/"))
    } else {
        normalize_windows_path(&resolve_with_cwd(&parts.root, segments))
    }
}

/// Number of non-empty segments in `path`.
pub fn segment_count(path: &str) -> usize {
    path.split(['/', '\\']).filter(|s| !s.is_empty()).count()
}
