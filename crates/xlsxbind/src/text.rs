//! Owned C strings handed across the engine boundary

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Duplicate `text` into an owned C string.
///
/// Text after an interior NUL is dropped, which is what the engine would
/// read from the same bytes anyway.
pub(crate) fn c_string(text: &str) -> CString {
    let end = text.find('\0').unwrap_or(text.len());
    CString::new(&text[..end]).unwrap_or_default()
}

/// Borrow an optional owned string as a nullable pointer.
pub(crate) fn as_ptr_or_null(text: &Option<CString>) -> *const c_char {
    text.as_ref().map_or(ptr::null(), |text| text.as_ptr())
}
