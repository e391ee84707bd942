//! Format views

use xlsxbind_engine::ObjectId;

use crate::workbook::Workbook;

/// A cell format registered in a [`Workbook`]
#[derive(Debug, Clone, Copy)]
pub struct Format<'wb> {
    workbook: &'wb Workbook,
    id: ObjectId,
}

impl<'wb> Format<'wb> {
    pub(crate) fn new(workbook: &'wb Workbook, id: ObjectId) -> Self {
        Self { workbook, id }
    }

    /// Engine identifier of this format within its workbook
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The workbook that owns this format
    pub fn workbook(&self) -> &'wb Workbook {
        self.workbook
    }
}
