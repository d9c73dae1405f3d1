//! Callable-A: the native routine linked into the harness binary.
//!
//! Calls go straight to `bindbench_native::process_string` through a
//! direct, link-time resolved call site.

use crate::buffer::{NativeBuffer, decode, encode};
use bindbench_core::{BindingError, StringBinding};

/// Statically-bound binding to the native routine
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBinding;

impl StaticBinding {
    /// Name used in reports
    pub const NAME: &'static str = "static";
}

impl StringBinding for StaticBinding {
    fn name(&self) -> &str {
        Self::NAME
    }

    #[inline]
    fn call(&self, input: &str) -> Result<String, BindingError> {
        let c_input = encode(input)?;
        // SAFETY: c_input is NUL-terminated and outlives the call; the result
        // is released by the paired free_string of the same crate.
        let raw = unsafe { bindbench_native::process_string(c_input.as_ptr()) };
        decode(unsafe { NativeBuffer::from_raw(raw, bindbench_native::free_string) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_round_trip() {
        let binding = StaticBinding;
        assert_eq!(binding.name(), "static");
        assert_eq!(binding.call("Hello, World!").unwrap(), "Hello, World!");
        assert_eq!(binding.call("").unwrap(), "");
    }

    #[test]
    fn test_static_rejects_interior_nul() {
        let err = StaticBinding.call("bad\0input").unwrap_err();
        assert!(matches!(err, BindingError::Encode(_)));
    }

    #[test]
    fn test_static_under_trial_runner() {
        let set = bindbench_core::run_trials(&StaticBinding, &"A".repeat(100), 50, 3).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.summarize().min >= 0.0);
    }
}
