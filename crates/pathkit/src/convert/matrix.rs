use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use super::context::FileContext;
use super::hub::{to_dynamic, via_hub};
use super::postprocess::post_process;
use crate::classify::PathType;

/// A conversion function for one `(from, to)` pair.
///
/// Returns the new path, or `None` when the conversion does not apply to
/// `path`.
pub type ConvertFn = Arc<dyn Fn(&str, &FileContext<'_>) -> Option<String> + Send + Sync>;

fn convert_fn<F>(f: F) -> ConvertFn
where
    F: Fn(&str, &FileContext<'_>) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Outcome of converting one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Not applicable, or the result equals the input.
    Unchanged,
    Converted(String),
    /// No function registered for the pair.
    Unsupported,
}

impl Conversion {
    pub fn changed(self) -> Option<String> {
        match self {
            Self::Converted(path) => Some(path),
            Self::Unchanged | Self::Unsupported => None,
        }
    }
}

/// Table of conversion functions keyed by `(from, to)`.
#[derive(Clone)]
pub struct ConversionMatrix {
    table: FxHashMap<(PathType, PathType), ConvertFn>,
}

impl fmt::Debug for ConversionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.table.keys().collect();
        pairs.sort();
        f.debug_struct("ConversionMatrix")
            .field("pairs", &pairs)
            .finish()
    }
}

impl Default for ConversionMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConversionMatrix {
    /// A matrix with no registered conversions.
    pub fn empty() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    /// Every ordered pair of path types.
    pub fn standard() -> Self {
        let mut matrix = Self::empty();
        for from in PathType::ALL {
            for to in PathType::ALL {
                let f = match (from, to) {
                    // Aliases are re-resolved so a changed base directory or
                    // alias table is picked up.
                    (PathType::Alias, PathType::Alias) => {
                        convert_fn(|path, fc| via_hub(PathType::Alias, PathType::Alias, path, fc))
                    }
                    _ if from == to => convert_fn(|_, _| None),
                    (_, PathType::Dynamic) => convert_fn(move |path, fc| to_dynamic(from, path, fc)),
                    (PathType::Alias, PathType::Relative) => convert_fn(|path, fc| {
                        if !fc.ctx.extension_filter().accepts(path) {
                            return None;
                        }
                        via_hub(PathType::Alias, PathType::Relative, path, fc)
                    }),
                    _ => convert_fn(move |path, fc| via_hub(from, to, path, fc)),
                };
                matrix.table.insert((from, to), f);
            }
        }
        matrix
    }

    /// Register or replace the function for a pair.
    pub fn register<F>(&mut self, from: PathType, to: PathType, f: F)
    where
        F: Fn(&str, &FileContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.table.insert((from, to), convert_fn(f));
    }

    pub fn supports(&self, from: PathType, to: PathType) -> bool {
        self.table.contains_key(&(from, to))
    }

    /// Convert `path`, then apply strip and extension post-processing if it
    /// changed.
    pub fn convert(
        &self,
        from: PathType,
        to: PathType,
        path: &str,
        fc: &FileContext<'_>,
    ) -> Conversion {
        let Some(f) = self.table.get(&(from, to)) else {
            warn!(%from, %to, path, "no conversion registered; leaving path unchanged");
            return Conversion::Unsupported;
        };
        match f(path, fc) {
            Some(converted) if converted != path => {
                let processed = post_process(from, to, path, converted, fc);
                if processed == path {
                    Conversion::Unchanged
                } else {
                    Conversion::Converted(processed)
                }
            }
            _ => Conversion::Unchanged,
        }
    }
}
