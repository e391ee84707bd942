//! Worksheet views

use std::ffi::CStr;

use xlsxbind_engine::{xlsx_worksheet_get_name, ObjectId};

use crate::workbook::Workbook;

/// A worksheet registered in a [`Workbook`]
///
/// A non-owning view. The borrow it holds keeps the workbook open for as long
/// as the view is alive.
#[derive(Debug, Clone, Copy)]
pub struct Worksheet<'wb> {
    workbook: &'wb Workbook,
    id: ObjectId,
}

impl<'wb> Worksheet<'wb> {
    pub(crate) fn new(workbook: &'wb Workbook, id: ObjectId) -> Self {
        Self { workbook, id }
    }

    /// Engine identifier of this worksheet (1-based registration order)
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The workbook that owns this worksheet
    pub fn workbook(&self) -> &'wb Workbook {
        self.workbook
    }

    /// The worksheet's name
    pub fn name(&self) -> String {
        let name = xlsx_worksheet_get_name(self.workbook.raw(), self.id);
        if name.is_null() {
            return String::new();
        }
        // Engine-owned and valid until the workbook closes, which our borrow prevents.
        unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned()
    }
}

impl PartialEq for Worksheet<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.workbook, other.workbook) && self.id == other.id
    }
}

impl Eq for Worksheet<'_> {}
