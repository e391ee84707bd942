//! Handle management for open workbooks

use std::cell::RefCell;
use std::collections::HashMap;

use crate::record::WorkbookRecord;

/// Opaque workbook handle
pub type Handle = u64;

/// Null handle constant
pub const HANDLE_NULL: Handle = 0;

/// Identifier of a worksheet, format or chart inside one workbook.
///
/// Identifiers are 1-based and assigned in registration order.
pub type ObjectId = u32;

/// Null object constant ("not found" / "not created")
pub const OBJECT_NONE: ObjectId = 0;

/// Per-thread table of open workbooks
pub(crate) struct EngineContext {
    workbooks: HashMap<Handle, WorkbookRecord>,
    next_handle: Handle,
}

impl EngineContext {
    fn new() -> Self {
        Self {
            workbooks: HashMap::new(),
            next_handle: 1, // Start at 1, 0 is null
        }
    }

    /// Register a workbook. Handles are never reused.
    pub(crate) fn create_workbook(&mut self, record: WorkbookRecord) -> Handle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.workbooks.insert(handle, record);
        handle
    }

    pub(crate) fn get_workbook(&self, handle: Handle) -> Option<&WorkbookRecord> {
        self.workbooks.get(&handle)
    }

    pub(crate) fn get_workbook_mut(&mut self, handle: Handle) -> Option<&mut WorkbookRecord> {
        self.workbooks.get_mut(&handle)
    }

    /// Remove a workbook from the table, handing its record to the caller.
    pub(crate) fn destroy_workbook(&mut self, handle: Handle) -> Option<WorkbookRecord> {
        self.workbooks.remove(&handle)
    }

    pub(crate) fn is_live(&self, handle: Handle) -> bool {
        self.workbooks.contains_key(&handle)
    }
}

thread_local! {
    pub(crate) static CONTEXT: RefCell<EngineContext> = RefCell::new(EngineContext::new());
}

/// Run `$body` with the thread's engine context, or yield `$fallback` when
/// the context is unavailable (already borrowed, or torn down at thread exit).
macro_rules! with_context {
    ($fallback:expr, |mut $ctx:ident| $body:expr) => {
        $crate::handles::CONTEXT
            .try_with(|cell| match cell.try_borrow_mut() {
                Ok(mut $ctx) => $body,
                Err(_) => $fallback,
            })
            .unwrap_or($fallback)
    };
    ($fallback:expr, |$ctx:ident| $body:expr) => {
        $crate::handles::CONTEXT
            .try_with(|cell| match cell.try_borrow() {
                Ok($ctx) => $body,
                Err(_) => $fallback,
            })
            .unwrap_or($fallback)
    };
}

pub(crate) use with_context;
