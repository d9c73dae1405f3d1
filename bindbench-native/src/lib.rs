//! Reference native string routine
//!
//! Two C-ABI entry points, the same contract a C library would expose:
//!
//! ```c
//! char* process_string(const char* input);  // caller frees
//! void  free_string(char* str);
//! ```
//!
//! `process_string` returns a freshly allocated copy of its input. The
//! harness treats it as a black box; only the cost of reaching it matters.

use std::ffi::{CStr, CString, c_char};
use std::ptr;

/// Process a NUL-terminated string and return a newly allocated result.
///
/// Returns null when `input` is null. The result must be released with
/// [`free_string`].
///
/// # Safety
///
/// `input` must be null or point to a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn process_string(input: *const c_char) -> *mut c_char {
    if input.is_null() {
        return ptr::null_mut();
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let input = unsafe { CStr::from_ptr(input) };
    CString::from(input).into_raw()
}

/// Release a string returned by [`process_string`]. Null is ignored.
///
/// # Safety
///
/// `s` must be null or a pointer obtained from [`process_string`] of this
/// same library that has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    // SAFETY: `s` came from CString::into_raw in process_string.
    drop(unsafe { CString::from_raw(s) });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_input() {
        let input = CString::new("Hello, World!").unwrap();
        unsafe {
            let out = process_string(input.as_ptr());
            assert!(!out.is_null());
            assert_ne!(out as *const c_char, input.as_ptr());
            assert_eq!(CStr::from_ptr(out).to_str().unwrap(), "Hello, World!");
            free_string(out);
        }
    }

    #[test]
    fn test_null_in_null_out() {
        unsafe {
            assert!(process_string(ptr::null()).is_null());
            free_string(ptr::null_mut());
        }
    }

    #[test]
    fn test_long_input() {
        let payload = "C".repeat(10_000);
        let input = CString::new(payload.clone()).unwrap();
        unsafe {
            let out = process_string(input.as_ptr());
            assert_eq!(CStr::from_ptr(out).to_bytes().len(), 10_000);
            free_string(out);
        }
    }
}
