//! Path conversion between path types.
//!
//! A [`ConversionMatrix`] maps each `(from, to)` pair of [`PathType`]s to a
//! conversion function. The standard matrix routes every pair through the
//! absolute path of the target, then strips configured segments and
//! adjusts extensions on paths that changed.
//!
//! [`PathType`]: crate::PathType

mod context;
mod hub;
mod matrix;
mod postprocess;

pub use context::{
    ConversionContext, ConversionContextBuilder, ExtensionFilter, FileContext, LibraryEntry,
};
pub use hub::{PROBE_EXTENSIONS, dot_relative, probe_file};
pub use matrix::{Conversion, ConversionMatrix, ConvertFn};
pub use postprocess::adjust_extension;

#[cfg(test)]
mod tests;
