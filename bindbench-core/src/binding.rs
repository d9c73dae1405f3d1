//! Callable-Under-Test
//!
//! A binding is one path from the harness into the native string routine.
//! The harness only cares that it maps a string to a string; what happens
//! in between (direct call, `dlsym`'d pointer, mock) is the binding's business.

use std::ffi::NulError;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors a binding can raise during a single invocation
#[derive(Debug, Error)]
pub enum BindingError {
    /// Input could not be encoded as a NUL-terminated C string
    #[error("input cannot be passed as a C string: {0}")]
    Encode(#[from] NulError),

    /// Native output was not valid UTF-8
    #[error("native output is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    /// The binding panicked
    #[error("panicked: {0}")]
    Panicked(String),

    /// Any other binding-specific failure
    #[error("{0}")]
    Native(String),
}

/// A capability of signature `string -> string`, identified by name
pub trait StringBinding {
    /// Display name used in reports (e.g. "static", "dynamic")
    fn name(&self) -> &str;

    /// Invoke the native routine once
    fn call(&self, input: &str) -> Result<String, BindingError>;
}

impl<T: StringBinding + ?Sized> StringBinding for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn call(&self, input: &str) -> Result<String, BindingError> {
        (**self).call(input)
    }
}

/// Binding backed by a closure
///
/// Handy for mocks and for benchmarking pure-Rust routines next to the
/// native ones.
pub struct FnBinding<F> {
    name: String,
    f: F,
}

impl<F> FnBinding<F>
where
    F: Fn(&str) -> Result<String, BindingError>,
{
    /// Wrap `f` under `name`
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> StringBinding for FnBinding<F>
where
    F: Fn(&str) -> Result<String, BindingError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn call(&self, input: &str) -> Result<String, BindingError> {
        (self.f)(input)
    }
}

impl<F> std::fmt::Debug for FnBinding<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnBinding").field("name", &self.name).finish()
    }
}
