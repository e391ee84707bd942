//! Entry-point tests driving the engine through its C ABI

use std::ffi::{CStr, CString};
use std::ptr;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use xlsxbind_engine::*;

fn open(dir: &TempDir, name: &str) -> (Handle, std::path::PathBuf) {
    let path = dir.path().join(name);
    let c_path = CString::new(path.to_str().unwrap()).unwrap();
    let handle = unsafe { xlsx_workbook_new_opt(c_path.as_ptr(), ptr::null()) };
    assert_ne!(handle, HANDLE_NULL);
    (handle, path)
}

#[test]
fn test_open_close_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, path) = open(&dir, "out.xlsx");

    let name = CString::new("Sheet1").unwrap();
    let sheet = unsafe { xlsx_workbook_add_worksheet(handle, name.as_ptr()) };
    assert_eq!(sheet, 1);

    assert!(!path.exists());
    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);
    assert!(path.exists());
    assert!(!xlsx_workbook_is_live(handle));
}

#[test]
fn test_second_close_reports_invalid_handle() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, _) = open(&dir, "twice.xlsx");

    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);
    assert_eq!(xlsx_workbook_close(handle), XLSX_ERROR_INVALID_HANDLE);
}

#[test]
fn test_handles_are_not_reused() {
    let dir = tempfile::tempdir().unwrap();
    let (first, _) = open(&dir, "a.xlsx");
    assert_eq!(xlsx_workbook_close(first), XLSX_OK);

    let (second, _) = open(&dir, "b.xlsx");
    assert_ne!(first, second);
    assert!(!xlsx_workbook_is_live(first));
    assert!(xlsx_workbook_is_live(second));
    assert_eq!(xlsx_workbook_close(second), XLSX_OK);
}

#[test]
fn test_null_filename_fails_open() {
    let handle = unsafe { xlsx_workbook_new_opt(ptr::null(), ptr::null()) };
    assert_eq!(handle, HANDLE_NULL);
}

#[test]
fn test_constant_memory_with_tmpdir() {
    let dir = tempfile::tempdir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let path = dir.path().join("bounded.xlsx");
    let c_path = CString::new(path.to_str().unwrap()).unwrap();
    let c_tmp = CString::new(tmp.path().to_str().unwrap()).unwrap();
    let options = XlsxWorkbookOptions {
        constant_memory: 1,
        tmpdir: c_tmp.as_ptr(),
    };

    let handle = unsafe { xlsx_workbook_new_opt(c_path.as_ptr(), &options) };
    assert_ne!(handle, HANDLE_NULL);
    assert_ne!(unsafe { xlsx_workbook_add_worksheet(handle, ptr::null()) }, OBJECT_NONE);
    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);
    assert!(path.exists());
}

#[test]
fn test_missing_tmpdir_fails_open() {
    let c_path = CString::new("never.xlsx").unwrap();
    let c_tmp = CString::new("/no/such/tmpdir/for/xlsxbind").unwrap();
    let options = XlsxWorkbookOptions {
        constant_memory: 0,
        tmpdir: c_tmp.as_ptr(),
    };
    let handle = unsafe { xlsx_workbook_new_opt(c_path.as_ptr(), &options) };
    assert_eq!(handle, HANDLE_NULL);
}

#[test]
fn test_worksheet_enumeration_and_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, _) = open(&dir, "sheets.xlsx");

    for name in ["Data", "Summary"] {
        let c_name = CString::new(name).unwrap();
        assert_ne!(unsafe { xlsx_workbook_add_worksheet(handle, c_name.as_ptr()) }, OBJECT_NONE);
    }
    assert_eq!(xlsx_workbook_worksheet_count(handle), 2);
    assert_eq!(xlsx_workbook_worksheet_at(handle, 1), 2);
    assert_eq!(xlsx_workbook_worksheet_at(handle, 2), OBJECT_NONE);

    let name = unsafe { CStr::from_ptr(xlsx_worksheet_get_name(handle, 2)) };
    assert_eq!(name.to_str().unwrap(), "Summary");

    let wanted = CString::new("Data").unwrap();
    let missing = CString::new("Nope").unwrap();
    assert_eq!(unsafe { xlsx_workbook_get_worksheet_by_name(handle, wanted.as_ptr()) }, 1);
    assert_eq!(
        unsafe { xlsx_workbook_get_worksheet_by_name(handle, missing.as_ptr()) },
        OBJECT_NONE
    );

    let duplicate = CString::new("data").unwrap();
    assert_eq!(
        unsafe { xlsx_workbook_validate_sheet_name(handle, duplicate.as_ptr()) },
        XLSX_ERROR_SHEETNAME_ALREADY_USED
    );
    assert_eq!(
        unsafe { xlsx_workbook_add_worksheet(handle, duplicate.as_ptr()) },
        OBJECT_NONE
    );

    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);
    assert_eq!(xlsx_workbook_worksheet_count(handle), 0);
    assert!(xlsx_worksheet_get_name(handle, 1).is_null());
}

#[test]
fn test_properties_and_custom_properties() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, path) = open(&dir, "props.xlsx");

    let title = CString::new("Report").unwrap();
    let author = CString::new("A").unwrap();
    let properties = XlsxDocProperties {
        title: title.as_ptr(),
        author: author.as_ptr(),
        ..Default::default()
    };
    assert_eq!(unsafe { xlsx_workbook_set_properties(handle, &properties) }, XLSX_OK);
    assert_eq!(
        unsafe { xlsx_workbook_set_properties(handle, ptr::null()) },
        XLSX_ERROR_NULL_PARAMETER_IGNORED
    );

    let name = CString::new("Rate").unwrap();
    let text = CString::new("high").unwrap();
    unsafe {
        assert_eq!(xlsx_workbook_set_custom_property_number(handle, name.as_ptr(), 0.25), XLSX_OK);
        assert_eq!(xlsx_workbook_set_custom_property_integer(handle, name.as_ptr(), 7), XLSX_OK);
        assert_eq!(xlsx_workbook_set_custom_property_boolean(handle, name.as_ptr(), 1), XLSX_OK);
        assert_eq!(
            xlsx_workbook_set_custom_property_string(handle, name.as_ptr(), text.as_ptr()),
            XLSX_OK
        );
        assert_eq!(
            xlsx_workbook_set_custom_property_string(handle, name.as_ptr(), ptr::null()),
            XLSX_ERROR_NULL_PARAMETER_IGNORED
        );
    }

    let long_name = CString::new("n".repeat(MAX_PROPERTY_LEN + 1)).unwrap();
    assert_eq!(
        unsafe { xlsx_workbook_set_custom_property_number(handle, long_name.as_ptr(), 1.0) },
        XLSX_ERROR_255_STRING_LENGTH_EXCEEDED
    );

    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);
    assert!(path.exists());
}

#[test]
fn test_operations_on_closed_handle() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, _) = open(&dir, "closed.xlsx");
    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);

    let name = CString::new("Late").unwrap();
    unsafe {
        assert_eq!(xlsx_workbook_add_worksheet(handle, name.as_ptr()), OBJECT_NONE);
        assert_eq!(
            xlsx_workbook_set_custom_property_number(handle, name.as_ptr(), 1.5),
            XLSX_ERROR_INVALID_HANDLE
        );
    }
    assert_eq!(xlsx_workbook_add_format(handle), OBJECT_NONE);
    assert_eq!(xlsx_workbook_add_chart(handle, XLSX_CHART_LINE), OBJECT_NONE);
    assert_eq!(xlsx_chart_get_type(handle, 1), XLSX_CHART_NONE);
}

#[test]
fn test_charts_formats_and_names() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, _) = open(&dir, "objects.xlsx");

    assert_eq!(xlsx_workbook_add_format(handle), 1);
    let chart = xlsx_workbook_add_chart(handle, XLSX_CHART_SCATTER_SMOOTH);
    assert_eq!(xlsx_chart_get_type(handle, chart), XLSX_CHART_SCATTER_SMOOTH);
    assert_eq!(xlsx_workbook_add_chart(handle, 200), OBJECT_NONE);

    let sheet = CString::new("Sheet1").unwrap();
    let name = CString::new("Rate").unwrap();
    let formula = CString::new("=Sheet1!$B$1").unwrap();
    unsafe {
        xlsx_workbook_add_worksheet(handle, sheet.as_ptr());
        assert_eq!(xlsx_workbook_define_name(handle, name.as_ptr(), formula.as_ptr()), XLSX_OK);
        assert_eq!(
            xlsx_workbook_define_name(handle, ptr::null(), formula.as_ptr()),
            XLSX_ERROR_NULL_PARAMETER_IGNORED
        );
    }

    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);
}

#[test]
fn test_handles_are_thread_local() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, _) = open(&dir, "local.xlsx");

    let seen_elsewhere = std::thread::spawn(move || xlsx_workbook_is_live(handle))
        .join()
        .unwrap();
    assert!(!seen_elsewhere);
    assert_eq!(xlsx_workbook_close(handle), XLSX_OK);
}
