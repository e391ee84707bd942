//! Error types for xlsxbind

use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_int;

use thiserror::Error;
use xlsxbind_engine::{xlsx_error_message, XLSX_OK};

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// A non-zero status code reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineError {
    code: c_int,
}

impl EngineError {
    pub(crate) fn new(code: c_int) -> Self {
        Self { code }
    }

    /// Turn a status code into `Ok(())` or the matching error.
    pub(crate) fn check(code: c_int) -> std::result::Result<(), EngineError> {
        if code == XLSX_OK {
            Ok(())
        } else {
            Err(Self::new(code))
        }
    }

    /// The raw engine status code
    pub fn code(&self) -> c_int {
        self.code
    }

    /// The engine's description of this status
    pub fn message(&self) -> &'static str {
        // Static, NUL-terminated table owned by the engine.
        let message = unsafe { CStr::from_ptr(xlsx_error_message(self.code)) };
        message.to_str().unwrap_or("Unknown error")
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code)
    }
}

impl std::error::Error for EngineError {}

/// Value type of a custom document property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomPropertyKind {
    String,
    Number,
    Integer,
    Boolean,
}

impl fmt::Display for CustomPropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CustomPropertyKind::String => "string",
            CustomPropertyKind::Number => "number",
            CustomPropertyKind::Integer => "integer",
            CustomPropertyKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Checked failures reported by workbook operations
///
/// Each variant names the operation that failed. Contract violations such as
/// using a closed workbook are not represented here; they panic.
#[derive(Debug, Error)]
pub enum Error {
    /// `set_properties` was rejected
    #[error("failed to set document properties: {0}")]
    SetProperties(#[source] EngineError),

    /// A `set_custom_property` call was rejected
    #[error("failed to set {kind} custom property '{name}': {source}")]
    SetCustomProperty {
        name: String,
        kind: CustomPropertyKind,
        #[source]
        source: EngineError,
    },

    /// A worksheet could not be added
    #[error("failed to add worksheet '{name}': {source}")]
    AddWorksheet {
        name: String,
        #[source]
        source: EngineError,
    },

    /// A defined name was rejected
    #[error("failed to define name '{name}': {source}")]
    DefineName {
        name: String,
        #[source]
        source: EngineError,
    },

    /// Finalizing the workbook failed; the workbook is closed regardless
    #[error("failed to close workbook '{destination}': {source}")]
    Close {
        destination: String,
        #[source]
        source: EngineError,
    },
}

impl Error {
    /// The underlying engine status
    pub fn engine_error(&self) -> EngineError {
        match self {
            Error::SetProperties(source)
            | Error::SetCustomProperty { source, .. }
            | Error::AddWorksheet { source, .. }
            | Error::DefineName { source, .. }
            | Error::Close { source, .. } => *source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlsxbind_engine::{XLSX_ERROR_255_STRING_LENGTH_EXCEEDED, XLSX_ERROR_INVALID_HANDLE};

    #[test]
    fn test_check() {
        assert!(EngineError::check(XLSX_OK).is_ok());
        let err = EngineError::check(XLSX_ERROR_INVALID_HANDLE).unwrap_err();
        assert_eq!(err.code(), XLSX_ERROR_INVALID_HANDLE);
    }

    #[test]
    fn test_error_names_operation() {
        let err = Error::SetCustomProperty {
            name: "Rate".into(),
            kind: CustomPropertyKind::Number,
            source: EngineError::new(XLSX_ERROR_255_STRING_LENGTH_EXCEEDED),
        };
        let text = err.to_string();
        assert!(text.starts_with("failed to set number custom property 'Rate'"));
        assert!(text.contains("255"));
        assert_eq!(err.engine_error().code(), XLSX_ERROR_255_STRING_LENGTH_EXCEEDED);
    }
}
