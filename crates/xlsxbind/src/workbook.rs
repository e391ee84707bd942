//! Workbook - the owning wrapper around an engine handle

use std::marker::PhantomData;
use std::mem;
use std::path::Path;

use xlsxbind_engine::*;

use crate::chart::{Chart, ChartType};
use crate::custom_property::CustomPropertyValue;
use crate::error::{EngineError, Error, Result};
use crate::format::Format;
use crate::options::Options;
use crate::properties::Properties;
use crate::text::c_string;
use crate::worksheet::Worksheet;

const CLOSED: &str = "workbook is already closed";

/// An open workbook
///
/// A `Workbook` is the only owner of its engine handle. It is either open or
/// closed; once closed it stays closed. The destination file is produced when
/// the workbook is closed, explicitly with [`Workbook::close`] or implicitly
/// when it is dropped.
///
/// Worksheets, formats and charts are returned as views that borrow the
/// workbook, so it cannot be closed, taken from or dropped while any view is
/// alive.
///
/// Calling a feature operation on a closed workbook is a contract violation
/// and panics.
///
/// The engine's handle table is per thread, so a `Workbook` is neither `Send`
/// nor `Sync`.
#[derive(Debug)]
pub struct Workbook {
    handle: Handle,
    destination: String,
    _not_send: PhantomData<*const ()>,
}

impl Workbook {
    /// Open a workbook that will be written to `destination`.
    ///
    /// The options are consumed; the engine copies what it needs.
    ///
    /// # Panics
    ///
    /// Panics if `destination` is not valid UTF-8, or if the engine cannot
    /// open the workbook, for example when the temporary directory in
    /// `options` does not exist.
    pub fn new<P: AsRef<Path>>(destination: P, options: Options) -> Self {
        let destination = match destination.as_ref().to_str() {
            Some(destination) => destination.to_string(),
            None => panic!(
                "failed to open workbook '{}': destination is not valid UTF-8",
                destination.as_ref().display()
            ),
        };
        let c_destination = c_string(&destination);
        let raw_options = options.as_raw();

        // Both records borrow from locals that outlive the call.
        let handle = unsafe { xlsx_workbook_new_opt(c_destination.as_ptr(), &raw_options) };
        drop(options);

        if handle == HANDLE_NULL {
            panic!("failed to open workbook '{destination}'");
        }
        tracing::debug!(handle, destination = %destination, "workbook opened");

        Self {
            handle,
            destination,
            _not_send: PhantomData,
        }
    }

    /// The destination given at construction
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The engine handle, or `None` once closed
    pub fn handle(&self) -> Option<Handle> {
        (self.handle != HANDLE_NULL).then_some(self.handle)
    }

    /// Check if the workbook has been closed (or taken from)
    pub fn is_closed(&self) -> bool {
        self.handle == HANDLE_NULL
    }

    /// The live handle; panics when closed.
    #[track_caller]
    pub(crate) fn raw(&self) -> Handle {
        assert!(self.handle != HANDLE_NULL, "{CLOSED}");
        self.handle
    }

    /// Add a worksheet with the given name
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn add_worksheet(&self, name: &str) -> Result<Worksheet<'_>> {
        let handle = self.raw();
        let c_name = c_string(name);
        let add_error = |source| Error::AddWorksheet {
            name: name.to_string(),
            source,
        };

        let status = unsafe { xlsx_workbook_validate_sheet_name(handle, c_name.as_ptr()) };
        EngineError::check(status).map_err(add_error)?;

        let id = unsafe { xlsx_workbook_add_worksheet(handle, c_name.as_ptr()) };
        if id == OBJECT_NONE {
            return Err(add_error(EngineError::new(XLSX_ERROR_INTERNAL)));
        }
        tracing::debug!(handle, id, name, "worksheet added");
        Ok(Worksheet::new(self, id))
    }

    /// Add a cell format
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn add_format(&self) -> Format<'_> {
        let handle = self.raw();
        let id = xlsx_workbook_add_format(handle);
        assert!(id != OBJECT_NONE, "engine failed to create a format");
        tracing::debug!(handle, id, "format added");
        Format::new(self, id)
    }

    /// Add a chart of the given type
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn add_chart(&self, chart_type: ChartType) -> Chart<'_> {
        let handle = self.raw();
        let id = xlsx_workbook_add_chart(handle, chart_type.to_raw());
        assert!(id != OBJECT_NONE, "engine failed to create a {chart_type:?} chart");
        tracing::debug!(handle, id, ?chart_type, "chart added");
        Chart::new(self, id)
    }

    /// Find a worksheet by exact name
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn get_worksheet_by_name(&self, name: &str) -> Option<Worksheet<'_>> {
        let handle = self.raw();
        let c_name = c_string(name);
        let id = unsafe { xlsx_workbook_get_worksheet_by_name(handle, c_name.as_ptr()) };
        (id != OBJECT_NONE).then(|| Worksheet::new(self, id))
    }

    /// All worksheets, in the order they were added
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn worksheets(&self) -> Vec<Worksheet<'_>> {
        let handle = self.raw();
        (0..xlsx_workbook_worksheet_count(handle))
            .map(|index| xlsx_workbook_worksheet_at(handle, index))
            .filter(|&id| id != OBJECT_NONE)
            .map(|id| Worksheet::new(self, id))
            .collect()
    }

    /// Hand document metadata to the engine, which keeps its own copy.
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn set_properties(&self, properties: &Properties) -> Result<()> {
        let handle = self.raw();
        let raw = properties.as_raw();
        let status = unsafe { xlsx_workbook_set_properties(handle, &raw) };
        EngineError::check(status).map_err(Error::SetProperties)
    }

    /// Set a custom document property
    ///
    /// The value's type (`&str`, `String`, `f64`, `i32` or `bool`) selects the
    /// kind of property written.
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn set_custom_property<V: CustomPropertyValue>(&self, name: &str, value: V) -> Result<()> {
        let handle = self.raw();
        let c_name = c_string(name);
        let kind = value.kind();
        let status = value.apply(handle, &c_name);
        EngineError::check(status).map_err(|source| Error::SetCustomProperty {
            name: name.to_string(),
            kind,
            source,
        })
    }

    /// Define a workbook-scoped name, e.g. `"Rate"` for `"=Sheet1!$B$1"`
    ///
    /// # Panics
    ///
    /// Panics if the workbook is closed.
    #[track_caller]
    pub fn define_name(&self, name: &str, formula: &str) -> Result<()> {
        let handle = self.raw();
        let c_name = c_string(name);
        let c_formula = c_string(formula);
        let status = unsafe { xlsx_workbook_define_name(handle, c_name.as_ptr(), c_formula.as_ptr()) };
        EngineError::check(status).map_err(|source| Error::DefineName {
            name: name.to_string(),
            source,
        })
    }

    /// Write the destination and release the engine handle.
    ///
    /// Closing an already closed workbook does nothing and returns `Ok(())`.
    /// If writing fails the error is returned, but the workbook is closed all
    /// the same.
    pub fn close(&mut self) -> Result<()> {
        if self.handle == HANDLE_NULL {
            return Ok(());
        }
        let handle = mem::replace(&mut self.handle, HANDLE_NULL);

        let status = xlsx_workbook_close(handle);
        tracing::debug!(handle, status, destination = %self.destination, "workbook closed");
        EngineError::check(status).map_err(|source| Error::Close {
            destination: self.destination.clone(),
            source,
        })
    }

    /// Move the handle into a new `Workbook`, leaving this one closed.
    ///
    /// Dropping or closing the emptied workbook afterwards is a no-op.
    pub fn take(&mut self) -> Workbook {
        Workbook {
            handle: mem::replace(&mut self.handle, HANDLE_NULL),
            destination: self.destination.clone(),
            _not_send: PhantomData,
        }
    }
}

impl Drop for Workbook {
    fn drop(&mut self) {
        // Nowhere to return the error from here; callers who care use `close`.
        if let Err(e) = self.close() {
            tracing::error!("implicit close failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook(dir: &tempfile::TempDir, name: &str) -> Workbook {
        Workbook::new(dir.path().join(name), Options::default())
    }

    #[test]
    fn test_new_is_open() {
        let dir = tempfile::tempdir().unwrap();
        let wb = workbook(&dir, "open.xlsx");
        assert!(!wb.is_closed());
        assert!(wb.handle().is_some());
        assert!(wb.destination().ends_with("open.xlsx"));
    }

    #[test]
    fn test_close_nulls_handle() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbook(&dir, "close.xlsx");
        let handle = wb.handle().unwrap();

        wb.close().unwrap();
        assert!(wb.is_closed());
        assert_eq!(wb.handle(), None);
        assert!(!xlsx_workbook_is_live(handle));
    }

    #[test]
    fn test_take_transfers_handle() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = workbook(&dir, "take.xlsx");
        let handle = source.handle().unwrap();

        let mut target = source.take();
        assert!(source.is_closed());
        assert_eq!(target.handle(), Some(handle));

        source.close().unwrap();
        assert!(xlsx_workbook_is_live(handle));
        target.close().unwrap();
        assert!(!xlsx_workbook_is_live(handle));
    }

    #[test]
    #[should_panic(expected = "workbook is already closed")]
    fn test_raw_on_closed_panics() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbook(&dir, "raw.xlsx");
        wb.close().unwrap();
        wb.raw();
    }
}
