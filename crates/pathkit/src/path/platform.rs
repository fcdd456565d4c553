use serde::{Deserialize, Serialize};

use super::{
    ParsedPath, PathContext, basename, dirname, extname, format, is_absolute, join, normalize,
    parse,
};

/// Platform flavor of the path algebra.
///
/// Both variants share one implementation of the algebra; they differ only in
/// the reported separator, the search-path delimiter and the namespaced form
/// of absolute paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Posix,
    Win32,
}

impl Platform {
    /// Path segment separator.
    pub const fn sep(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Win32 => '\\',
        }
    }

    /// Delimiter between entries of a search path such as `PATH`.
    pub const fn delimiter(self) -> char {
        match self {
            Self::Posix => ':',
            Self::Win32 => ';',
        }
    }

    /// Namespaced form of `path`.
    ///
    /// Posix returns the path unchanged. Win32 maps absolute drive paths to
    /// `\\?\C:\...` and UNC paths to `\\?\UNC\server\share\...`; anything
    /// else is returned as given.
    pub fn to_namespaced_path(self, path: &str) -> String {
        match self {
            Self::Posix => path.to_string(),
            Self::Win32 => {
                if path.is_empty() || !is_absolute(path) {
                    return path.to_string();
                }
                let resolved = normalize(path);
                let bytes = resolved.as_bytes();
                if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
                    return format!(r"\\?\{}", resolved.replace('/', "\\"));
                }
                match resolved.strip_prefix("//") {
                    Some(unc) if !unc.starts_with('.') && !unc.starts_with('?') => {
                        format!(r"\\?\UNC\{}", unc.replace('/', "\\"))
                    }
                    _ => path.to_string(),
                }
            }
        }
    }

    pub fn normalize(self, path: &str) -> String {
        normalize(path)
    }

    pub fn join<I, S>(self, segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        join(segments)
    }

    pub fn resolve<I, S>(self, ctx: &PathContext, segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ctx.resolve(segments)
    }

    pub fn relative(self, ctx: &PathContext, from: &str, to: &str) -> String {
        ctx.relative(from, to)
    }

    pub fn is_absolute(self, path: &str) -> bool {
        is_absolute(path)
    }

    pub fn dirname(self, path: &str) -> String {
        dirname(path)
    }

    pub fn basename(self, path: &str, ext: Option<&str>) -> String {
        basename(path, ext)
    }

    pub fn extname(self, path: &str) -> String {
        extname(path)
    }

    pub fn parse(self, path: &str) -> ParsedPath {
        parse(path)
    }

    pub fn format(self, parts: &ParsedPath) -> String {
        format(parts)
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posix" => Ok(Self::Posix),
            "win32" | "windows" => Ok(Self::Win32),
            other => Err(format!("unknown platform '{other}' (expected posix or win32)")),
        }
    }
}
