//! Callable-B: the native routine loaded at run time.
//!
//! The shared library is opened with `libloading`, `process_string` and
//! `free_string` are resolved by name, and every call goes through the
//! resolved function pointers: encode to a C string, call, decode the
//! returned bytes, release the native buffer.

use crate::LoadError;
use crate::buffer::{FreeFn, ProcessFn, call_native};
use bindbench_core::{BindingError, StringBinding};
use libloading::Library;
use std::path::{Path, PathBuf};

/// Exported name of the processing routine
pub const PROCESS_SYMBOL: &str = "process_string";
/// Exported name of the paired deallocator
pub const FREE_SYMBOL: &str = "free_string";

/// Binding to a dynamically-loaded copy of the native routine
pub struct DynamicBinding {
    name: String,
    path: Option<PathBuf>,
    process: ProcessFn,
    free: FreeFn,
    // Keeps the symbols above mapped; must outlive every call.
    _library: Option<Library>,
}

impl DynamicBinding {
    /// Name used in reports
    pub const NAME: &'static str = "dynamic";

    /// Load the shared library at `path` and resolve both entry points.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        // SAFETY: loading runs the library's initialisers. The locator only
        // hands us files named after the bindbench native library.
        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let process = resolve::<ProcessFn>(&library, PROCESS_SYMBOL, path)?;
        let free = resolve::<FreeFn>(&library, FREE_SYMBOL, path)?;

        tracing::debug!(path = %path.display(), "resolved native symbols");

        Ok(Self {
            name: Self::NAME.to_string(),
            path: Some(path.to_path_buf()),
            process,
            free,
            _library: Some(library),
        })
    }

    /// Build a binding from already-resolved entry points.
    ///
    /// # Safety
    ///
    /// `process` and `free` must honour the `process_string` / `free_string`
    /// contract, share an allocator, and stay valid for the binding's lifetime.
    pub unsafe fn from_symbols(name: impl Into<String>, process: ProcessFn, free: FreeFn) -> Self {
        Self {
            name: name.into(),
            path: None,
            process,
            free,
            _library: None,
        }
    }

    /// Path the library was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn resolve<T: Copy>(library: &Library, symbol: &'static str, path: &Path) -> Result<T, LoadError> {
    // SAFETY: T is the C signature documented for this symbol; the copied
    // function pointer is only used while `library` stays loaded.
    unsafe { library.get::<T>(symbol.as_bytes()) }
        .map(|sym| *sym)
        .map_err(|source| LoadError::MissingSymbol {
            symbol,
            path: path.to_path_buf(),
            source,
        })
}

impl StringBinding for DynamicBinding {
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn call(&self, input: &str) -> Result<String, BindingError> {
        // SAFETY: the entry points were resolved as a pair from one library
        // (or supplied under from_symbols' contract) and are still loaded.
        unsafe { call_native(self.process, self.free, input) }
    }
}

impl std::fmt::Debug for DynamicBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBinding")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}
