//! Native buffer ownership
//!
//! The native routine hands back a heap buffer the caller must release with
//! the paired `free_string`. [`NativeBuffer`] owns such a pointer and
//! releases it in `Drop`, so every exit path (including a failed UTF-8
//! decode) gives the buffer back exactly once.

use bindbench_core::BindingError;
use std::ffi::{CStr, CString, c_char};
use std::ptr::NonNull;

/// `char* process_string(const char*)`
pub type ProcessFn = unsafe extern "C" fn(*const c_char) -> *mut c_char;

/// `void free_string(char*)`
pub type FreeFn = unsafe extern "C" fn(*mut c_char);

/// A NUL-terminated buffer owned by the native side's allocator
pub(crate) struct NativeBuffer {
    ptr: NonNull<c_char>,
    free: FreeFn,
}

impl NativeBuffer {
    /// Take ownership of `ptr`. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live NUL-terminated buffer that `free`
    /// releases, and nothing else may release it.
    pub(crate) unsafe fn from_raw(ptr: *mut c_char, free: FreeFn) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, free })
    }

    /// Borrow the contents as UTF-8
    pub(crate) fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        // SAFETY: from_raw's contract guarantees a live NUL-terminated buffer
        // for as long as self exists.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }.to_str()
    }
}

impl Drop for NativeBuffer {
    fn drop(&mut self) {
        // SAFETY: we own the buffer and release it exactly once.
        unsafe { (self.free)(self.ptr.as_ptr()) }
    }
}

/// Encode `input` as a C string, rejecting interior NULs before any native call.
#[inline]
pub(crate) fn encode(input: &str) -> Result<CString, BindingError> {
    Ok(CString::new(input)?)
}

/// Decode a native result into an owned `String`, releasing the buffer.
///
/// A null result decodes to the empty string.
#[inline]
pub(crate) fn decode(buffer: Option<NativeBuffer>) -> Result<String, BindingError> {
    match buffer {
        Some(buffer) => Ok(buffer.to_str()?.to_owned()),
        None => Ok(String::new()),
    }
}

/// Full round trip through a pair of native entry points.
///
/// # Safety
///
/// `process` and `free` must honour the `process_string` / `free_string`
/// contract and belong to the same allocator.
#[inline]
pub(crate) unsafe fn call_native(
    process: ProcessFn,
    free: FreeFn,
    input: &str,
) -> Result<String, BindingError> {
    let c_input = encode(input)?;
    // SAFETY: c_input is a valid NUL-terminated string for the whole call.
    let raw = unsafe { process(c_input.as_ptr()) };
    // SAFETY: raw comes from `process`, which pairs with `free`.
    decode(unsafe { NativeBuffer::from_raw(raw, free) })
}
