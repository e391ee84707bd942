//! Workbook creation options

use std::ffi::CString;
use std::path::Path;

use xlsxbind_engine::XlsxWorkbookOptions;

use crate::text::{as_ptr_or_null, c_string};

/// Options consumed by [`Workbook::new`](crate::Workbook::new)
///
/// `Options` owns its temporary-directory path. It is not `Clone`: exactly one
/// value owns each path, and it is released once when the value is dropped or
/// consumed by a workbook.
#[derive(Debug, Default)]
pub struct Options {
    constant_memory: bool,
    tmpdir: Option<CString>,
}

impl Options {
    /// Options with only the bounded-memory flag set as given
    pub fn new(constant_memory: bool) -> Self {
        Self {
            constant_memory,
            tmpdir: None,
        }
    }

    /// Options with a temporary directory and unbounded memory
    pub fn with_tmpdir<P: AsRef<Path>>(tmpdir: P) -> Self {
        Self::with_constant_memory_and_tmpdir(false, tmpdir)
    }

    /// Options with both the bounded-memory flag and a temporary directory
    pub fn with_constant_memory_and_tmpdir<P: AsRef<Path>>(constant_memory: bool, tmpdir: P) -> Self {
        Self {
            constant_memory,
            tmpdir: Some(c_string(&tmpdir.as_ref().to_string_lossy())),
        }
    }

    /// Whether worksheets are written in bounded-memory mode
    pub fn constant_memory(&self) -> bool {
        self.constant_memory
    }

    /// Directory for temporary files, if one was given
    pub fn tmpdir(&self) -> Option<&Path> {
        self.tmpdir
            .as_deref()
            .and_then(|dir| dir.to_str().ok())
            .map(Path::new)
    }

    /// Borrow these options as the engine's record.
    ///
    /// The record points into `self` and must not outlive it.
    pub(crate) fn as_raw(&self) -> XlsxWorkbookOptions {
        XlsxWorkbookOptions {
            constant_memory: u8::from(self.constant_memory),
            tmpdir: as_ptr_or_null(&self.tmpdir),
        }
    }
}
