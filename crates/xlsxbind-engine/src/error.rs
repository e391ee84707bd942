//! Engine status codes

use std::os::raw::{c_char, c_int};

// Success
pub const XLSX_OK: c_int = 0;

// General errors
pub const XLSX_ERROR_NULL_PARAMETER_IGNORED: c_int = -1;
pub const XLSX_ERROR_INVALID_HANDLE: c_int = -2;
pub const XLSX_ERROR_INTERNAL: c_int = -3;

// I/O errors
pub const XLSX_ERROR_CREATING_XLSX_FILE: c_int = -10;
pub const XLSX_ERROR_CREATING_TMPFILE: c_int = -11;

// Validation errors
pub const XLSX_ERROR_PARAMETER_VALIDATION: c_int = -20;
pub const XLSX_ERROR_255_STRING_LENGTH_EXCEEDED: c_int = -21;

// Sheet name errors
pub const XLSX_ERROR_SHEETNAME_LENGTH_EXCEEDED: c_int = -30;
pub const XLSX_ERROR_INVALID_SHEETNAME_CHARACTER: c_int = -31;
pub const XLSX_ERROR_SHEETNAME_START_END_APOSTROPHE: c_int = -32;
pub const XLSX_ERROR_SHEETNAME_ALREADY_USED: c_int = -33;
pub const XLSX_ERROR_SHEETNAME_EMPTY: c_int = -34;

/// Get the static message for a status code
///
/// The returned pointer is NUL-terminated and valid for the life of the process.
#[no_mangle]
pub extern "C" fn xlsx_error_message(code: c_int) -> *const c_char {
    let msg: &'static [u8] = match code {
        XLSX_OK => b"No error\0",
        XLSX_ERROR_NULL_PARAMETER_IGNORED => b"NULL function parameter ignored\0",
        XLSX_ERROR_INVALID_HANDLE => b"Invalid or closed workbook handle\0",
        XLSX_ERROR_INTERNAL => b"Internal engine error\0",
        XLSX_ERROR_CREATING_XLSX_FILE => b"Error creating output xlsx file\0",
        XLSX_ERROR_CREATING_TMPFILE => b"Error creating temporary file in tmpdir\0",
        XLSX_ERROR_PARAMETER_VALIDATION => b"Function parameter validation error\0",
        XLSX_ERROR_255_STRING_LENGTH_EXCEEDED => b"String exceeds Excel's limit of 255 characters\0",
        XLSX_ERROR_SHEETNAME_LENGTH_EXCEEDED => b"Worksheet name exceeds Excel's limit of 31 characters\0",
        XLSX_ERROR_INVALID_SHEETNAME_CHARACTER => {
            b"Worksheet name cannot contain invalid characters: '[ ] : * ? / \\'\0"
        }
        XLSX_ERROR_SHEETNAME_START_END_APOSTROPHE => {
            b"Worksheet name cannot start or end with an apostrophe\0"
        }
        XLSX_ERROR_SHEETNAME_ALREADY_USED => b"Worksheet name is already in use\0",
        XLSX_ERROR_SHEETNAME_EMPTY => b"Worksheet name cannot be empty\0",
        _ => b"Unknown error\0",
    };

    msg.as_ptr() as *const c_char
}
