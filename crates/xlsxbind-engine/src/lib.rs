//! # xlsxbind-engine
//!
//! Handle-based C ABI for writing XLSX workbooks.
//!
//! Workbooks are identified by opaque [`Handle`]s; worksheets, formats and
//! charts by [`ObjectId`]s scoped to their workbook. Every entry point
//! returns a status code or a null sentinel instead of panicking, and file
//! production is delegated to `rust_xlsxwriter` when the workbook is closed.
//!
//! The handle table is per thread. A handle is only meaningful on the thread
//! that opened it, and handles are never reused once closed.

mod error;
mod handles;
mod record;
mod types;
mod workbook;

pub use error::*;
pub use handles::{Handle, ObjectId, HANDLE_NULL, OBJECT_NONE};
pub use record::{MAX_PROPERTY_LEN, MAX_SHEET_NAME_LEN};
pub use types::*;
pub use workbook::*;
