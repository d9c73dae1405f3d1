#![warn(missing_docs)]
//! bindbench FFI - Binding Discovery
//!
//! Supplies the two callables under test:
//! - **Callable-A** ([`StaticBinding`]): `bindbench-native` linked into the
//!   harness, called directly (feature `static-binding`, on by default)
//! - **Callable-B** ([`DynamicBinding`]): the same routine built as a
//!   `cdylib`, located on disk by [`LibraryLocator`] and called through
//!   `libloading`-resolved function pointers
//!
//! Both paths release every native buffer through the paired `free_string`.

mod buffer;
mod dynamic;
mod locator;
mod provider;
#[cfg(feature = "static-binding")]
mod static_binding;

use std::path::PathBuf;
use thiserror::Error;

pub use buffer::{FreeFn, ProcessFn};
pub use dynamic::{DynamicBinding, FREE_SYMBOL, PROCESS_SYMBOL};
pub use locator::{LIBRARY_STEM, LibraryLocator};
pub use provider::{NativeProvider, static_binding};
#[cfg(feature = "static-binding")]
pub use static_binding::StaticBinding;

/// Errors from locating or loading the shared library
#[derive(Debug, Error)]
pub enum LoadError {
    /// No candidate file exists
    #[error("shared library not found; searched: {}", display_paths(.searched))]
    NotFound {
        /// Candidate paths that were tried
        searched: Vec<PathBuf>,
    },

    /// The file exists but could not be loaded
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        /// Library path
        path: PathBuf,
        /// Loader error
        #[source]
        source: libloading::Error,
    },

    /// The library lacks a required export
    #[error("symbol `{symbol}` missing from {}: {source}", .path.display())]
    MissingSymbol {
        /// Symbol name
        symbol: &'static str,
        /// Library path
        path: PathBuf,
        /// Loader error
        #[source]
        source: libloading::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
