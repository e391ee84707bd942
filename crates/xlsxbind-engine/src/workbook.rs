//! Workbook entry points

use std::os::raw::{c_char, c_int};
use std::path::PathBuf;
use std::ptr;

use crate::error::*;
use crate::handles::{with_context, Handle, ObjectId, HANDLE_NULL, OBJECT_NONE};
use crate::record::{CustomValue, Metadata, WorkbookRecord};
use crate::types::{read_str, XlsxDocProperties, XlsxWorkbookOptions};

/// Open a new workbook that will be written to `filename` on close.
///
/// The options record is read and copied; the caller keeps ownership of it
/// and of every string it points to. A null `options` selects the defaults.
/// Returns [`HANDLE_NULL`] if the workbook cannot be created.
///
/// # Safety
///
/// `filename` must be null or a valid NUL-terminated string. `options` must be
/// null or point to a valid record whose `tmpdir` is null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_new_opt(
    filename: *const c_char,
    options: *const XlsxWorkbookOptions,
) -> Handle {
    let Some(filename) = read_str(filename) else {
        tracing::warn!("xlsx_workbook_new_opt: null filename");
        return HANDLE_NULL;
    };
    let options = if options.is_null() {
        XlsxWorkbookOptions::default()
    } else {
        *options
    };
    let tmpdir = read_str(options.tmpdir).map(|dir| PathBuf::from(dir.into_owned()));

    let record = match WorkbookRecord::new(
        PathBuf::from(filename.into_owned()),
        options.constant_memory != 0,
        tmpdir,
    ) {
        Ok(record) => record,
        Err(code) => {
            tracing::warn!("xlsx_workbook_new_opt failed: code {code}");
            return HANDLE_NULL;
        }
    };

    let path = record.filename().clone();
    let handle = with_context!(HANDLE_NULL, |mut ctx| ctx.create_workbook(record));
    if handle != HANDLE_NULL {
        tracing::debug!(handle, path = %path.display(), "opened workbook");
    }
    handle
}

/// Finalize a workbook: write the destination and free the handle.
///
/// The handle is released whether or not writing succeeds.
#[no_mangle]
pub extern "C" fn xlsx_workbook_close(handle: Handle) -> c_int {
    let record = match with_context!(Err(XLSX_ERROR_INTERNAL), |mut ctx| {
        ctx.destroy_workbook(handle).ok_or(XLSX_ERROR_INVALID_HANDLE)
    }) {
        Ok(record) => record,
        Err(code) => return code,
    };

    let path = record.filename().clone();
    match record.finalize() {
        Ok(()) => {
            tracing::debug!(handle, path = %path.display(), "closed workbook");
            XLSX_OK
        }
        Err(code) => {
            tracing::warn!(handle, code, "closing workbook failed");
            code
        }
    }
}

/// Whether `handle` still refers to an open workbook on this thread
#[no_mangle]
pub extern "C" fn xlsx_workbook_is_live(handle: Handle) -> bool {
    with_context!(false, |ctx| ctx.is_live(handle))
}

/// Add a worksheet. A null name selects the next free `SheetN`.
///
/// Returns [`OBJECT_NONE`] for an unknown handle or a rejected name.
///
/// # Safety
///
/// `sheetname` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_add_worksheet(
    handle: Handle,
    sheetname: *const c_char,
) -> ObjectId {
    let requested = read_str(sheetname);
    with_context!(OBJECT_NONE, |mut ctx| {
        match ctx.get_workbook_mut(handle) {
            Some(record) => match record.add_worksheet(requested.as_deref()) {
                Ok(id) => id,
                Err(code) => {
                    tracing::warn!(handle, code, "add_worksheet rejected");
                    OBJECT_NONE
                }
            },
            None => OBJECT_NONE,
        }
    })
}

/// Check whether `sheetname` would be accepted by [`xlsx_workbook_add_worksheet`].
///
/// # Safety
///
/// `sheetname` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_validate_sheet_name(
    handle: Handle,
    sheetname: *const c_char,
) -> c_int {
    let Some(name) = read_str(sheetname) else {
        return XLSX_ERROR_NULL_PARAMETER_IGNORED;
    };
    with_context!(XLSX_ERROR_INTERNAL, |ctx| {
        match ctx.get_workbook(handle) {
            Some(record) => record.validate_sheet_name(&name).err().unwrap_or(XLSX_OK),
            None => XLSX_ERROR_INVALID_HANDLE,
        }
    })
}

/// Add a cell format
#[no_mangle]
pub extern "C" fn xlsx_workbook_add_format(handle: Handle) -> ObjectId {
    with_context!(OBJECT_NONE, |mut ctx| {
        ctx.get_workbook_mut(handle)
            .map_or(OBJECT_NONE, |record| record.add_format())
    })
}

/// Add a chart of the given `XLSX_CHART_*` type
#[no_mangle]
pub extern "C" fn xlsx_workbook_add_chart(handle: Handle, chart_type: u8) -> ObjectId {
    with_context!(OBJECT_NONE, |mut ctx| {
        match ctx.get_workbook_mut(handle) {
            Some(record) => record.add_chart(chart_type).unwrap_or_else(|code| {
                tracing::warn!(handle, chart_type, code, "add_chart rejected");
                OBJECT_NONE
            }),
            None => OBJECT_NONE,
        }
    })
}

/// Look up a worksheet by exact name
///
/// # Safety
///
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_get_worksheet_by_name(
    handle: Handle,
    name: *const c_char,
) -> ObjectId {
    let Some(name) = read_str(name) else {
        return OBJECT_NONE;
    };
    with_context!(OBJECT_NONE, |ctx| {
        ctx.get_workbook(handle)
            .and_then(|record| record.worksheet_by_name(&name))
            .unwrap_or(OBJECT_NONE)
    })
}

/// Number of registered worksheets (0 for an unknown handle)
#[no_mangle]
pub extern "C" fn xlsx_workbook_worksheet_count(handle: Handle) -> u32 {
    with_context!(0, |ctx| {
        ctx.get_workbook(handle)
            .map_or(0, |record| record.worksheet_count())
    })
}

/// Worksheet at a 0-based registration index
#[no_mangle]
pub extern "C" fn xlsx_workbook_worksheet_at(handle: Handle, index: u32) -> ObjectId {
    let count = xlsx_workbook_worksheet_count(handle);
    if index < count {
        index + 1
    } else {
        OBJECT_NONE
    }
}

/// Name of a worksheet
///
/// The pointer stays valid until the workbook is closed. Returns null for an
/// unknown handle or worksheet.
#[no_mangle]
pub extern "C" fn xlsx_worksheet_get_name(handle: Handle, worksheet: ObjectId) -> *const c_char {
    with_context!(ptr::null(), |ctx| {
        ctx.get_workbook(handle)
            .and_then(|record| record.worksheet_name(worksheet))
            .map_or(ptr::null(), |name| name.as_ptr())
    })
}

/// Chart type of a chart, or `XLSX_CHART_NONE`
#[no_mangle]
pub extern "C" fn xlsx_chart_get_type(handle: Handle, chart: ObjectId) -> u8 {
    with_context!(crate::types::XLSX_CHART_NONE, |ctx| {
        ctx.get_workbook(handle)
            .and_then(|record| record.chart_type(chart))
            .unwrap_or(crate::types::XLSX_CHART_NONE)
    })
}

/// Replace the document properties with a copy of `properties`.
///
/// # Safety
///
/// `properties` must be null or point to a valid record whose non-null
/// fields are NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_set_properties(
    handle: Handle,
    properties: *const XlsxDocProperties,
) -> c_int {
    if properties.is_null() {
        return XLSX_ERROR_NULL_PARAMETER_IGNORED;
    }
    let raw = &*properties;
    let copy = |field: *const c_char| read_str(field).map(|text| text.into_owned());
    let metadata = Metadata {
        title: copy(raw.title),
        author: copy(raw.author),
        manager: copy(raw.manager),
        company: copy(raw.company),
        category: copy(raw.category),
        keywords: copy(raw.keywords),
        comments: copy(raw.comments),
        status: copy(raw.status),
        hyperlink_base: copy(raw.hyperlink_base),
    };

    update(handle, "set_properties", |record| record.set_metadata(metadata))
}

/// Set a string custom property
///
/// # Safety
///
/// `name` and `value` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_set_custom_property_string(
    handle: Handle,
    name: *const c_char,
    value: *const c_char,
) -> c_int {
    let (Some(name), Some(value)) = (read_str(name), read_str(value)) else {
        return XLSX_ERROR_NULL_PARAMETER_IGNORED;
    };
    set_custom(handle, &name, CustomValue::Text(value.into_owned()))
}

/// Set a floating-point custom property
///
/// # Safety
///
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_set_custom_property_number(
    handle: Handle,
    name: *const c_char,
    value: f64,
) -> c_int {
    let Some(name) = read_str(name) else {
        return XLSX_ERROR_NULL_PARAMETER_IGNORED;
    };
    set_custom(handle, &name, CustomValue::Number(value))
}

/// Set an integer custom property
///
/// # Safety
///
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_set_custom_property_integer(
    handle: Handle,
    name: *const c_char,
    value: i32,
) -> c_int {
    let Some(name) = read_str(name) else {
        return XLSX_ERROR_NULL_PARAMETER_IGNORED;
    };
    set_custom(handle, &name, CustomValue::Integer(value))
}

/// Set a boolean custom property
///
/// # Safety
///
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_set_custom_property_boolean(
    handle: Handle,
    name: *const c_char,
    value: u8,
) -> c_int {
    let Some(name) = read_str(name) else {
        return XLSX_ERROR_NULL_PARAMETER_IGNORED;
    };
    set_custom(handle, &name, CustomValue::Boolean(value != 0))
}

/// Define a workbook-scoped name such as `Rate` = `=Sheet1!$B$1`
///
/// # Safety
///
/// `name` and `formula` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn xlsx_workbook_define_name(
    handle: Handle,
    name: *const c_char,
    formula: *const c_char,
) -> c_int {
    let (Some(name), Some(formula)) = (read_str(name), read_str(formula)) else {
        return XLSX_ERROR_NULL_PARAMETER_IGNORED;
    };
    update(handle, "define_name", |record| record.define_name(&name, &formula))
}

fn set_custom(handle: Handle, name: &str, value: CustomValue) -> c_int {
    update(handle, "set_custom_property", |record| {
        record.set_custom_property(name, value)
    })
}

/// Apply `op` to an open workbook and translate the outcome to a status code.
fn update<F>(handle: Handle, what: &str, op: F) -> c_int
where
    F: FnOnce(&mut WorkbookRecord) -> Result<(), c_int>,
{
    let code = with_context!(XLSX_ERROR_INTERNAL, |mut ctx| {
        match ctx.get_workbook_mut(handle) {
            Some(record) => op(record).err().unwrap_or(XLSX_OK),
            None => XLSX_ERROR_INVALID_HANDLE,
        }
    });
    if code != XLSX_OK {
        tracing::warn!(handle, code, "{what} failed");
    }
    code
}
