//! C-layout records passed across the engine boundary

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

/// Options read once by [`crate::xlsx_workbook_new_opt`].
///
/// The engine copies what it needs; the caller keeps ownership of `tmpdir`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XlsxWorkbookOptions {
    /// Non-zero selects bounded-memory worksheets.
    pub constant_memory: u8,
    /// Directory for temporary files, or null for the system default.
    pub tmpdir: *const c_char,
}

impl Default for XlsxWorkbookOptions {
    fn default() -> Self {
        Self {
            constant_memory: 0,
            tmpdir: ptr::null(),
        }
    }
}

/// Document metadata copied by [`crate::xlsx_workbook_set_properties`].
///
/// Every field is independently nullable; null fields are left unchanged.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XlsxDocProperties {
    pub title: *const c_char,
    pub author: *const c_char,
    pub manager: *const c_char,
    pub company: *const c_char,
    pub category: *const c_char,
    pub keywords: *const c_char,
    pub comments: *const c_char,
    pub status: *const c_char,
    pub hyperlink_base: *const c_char,
}

impl Default for XlsxDocProperties {
    fn default() -> Self {
        Self {
            title: ptr::null(),
            author: ptr::null(),
            manager: ptr::null(),
            company: ptr::null(),
            category: ptr::null(),
            keywords: ptr::null(),
            comments: ptr::null(),
            status: ptr::null(),
            hyperlink_base: ptr::null(),
        }
    }
}

// Chart type identifiers accepted by `xlsx_workbook_add_chart`.
pub const XLSX_CHART_NONE: u8 = 0;
pub const XLSX_CHART_AREA: u8 = 1;
pub const XLSX_CHART_AREA_STACKED: u8 = 2;
pub const XLSX_CHART_AREA_STACKED_PERCENT: u8 = 3;
pub const XLSX_CHART_BAR: u8 = 4;
pub const XLSX_CHART_BAR_STACKED: u8 = 5;
pub const XLSX_CHART_BAR_STACKED_PERCENT: u8 = 6;
pub const XLSX_CHART_COLUMN: u8 = 7;
pub const XLSX_CHART_COLUMN_STACKED: u8 = 8;
pub const XLSX_CHART_COLUMN_STACKED_PERCENT: u8 = 9;
pub const XLSX_CHART_DOUGHNUT: u8 = 10;
pub const XLSX_CHART_LINE: u8 = 11;
pub const XLSX_CHART_LINE_STACKED: u8 = 12;
pub const XLSX_CHART_LINE_STACKED_PERCENT: u8 = 13;
pub const XLSX_CHART_PIE: u8 = 14;
pub const XLSX_CHART_SCATTER: u8 = 15;
pub const XLSX_CHART_SCATTER_STRAIGHT: u8 = 16;
pub const XLSX_CHART_SCATTER_STRAIGHT_WITH_MARKERS: u8 = 17;
pub const XLSX_CHART_SCATTER_SMOOTH: u8 = 18;
pub const XLSX_CHART_SCATTER_SMOOTH_WITH_MARKERS: u8 = 19;
pub const XLSX_CHART_RADAR: u8 = 20;
pub const XLSX_CHART_RADAR_WITH_MARKERS: u8 = 21;
pub const XLSX_CHART_RADAR_FILLED: u8 = 22;

/// Map an engine chart identifier onto the writer's chart type.
pub(crate) fn chart_type_from_raw(chart_type: u8) -> Option<rust_xlsxwriter::ChartType> {
    use rust_xlsxwriter::ChartType;

    let mapped = match chart_type {
        XLSX_CHART_AREA => ChartType::Area,
        XLSX_CHART_AREA_STACKED => ChartType::AreaStacked,
        XLSX_CHART_AREA_STACKED_PERCENT => ChartType::AreaPercentStacked,
        XLSX_CHART_BAR => ChartType::Bar,
        XLSX_CHART_BAR_STACKED => ChartType::BarStacked,
        XLSX_CHART_BAR_STACKED_PERCENT => ChartType::BarPercentStacked,
        XLSX_CHART_COLUMN => ChartType::Column,
        XLSX_CHART_COLUMN_STACKED => ChartType::ColumnStacked,
        XLSX_CHART_COLUMN_STACKED_PERCENT => ChartType::ColumnPercentStacked,
        XLSX_CHART_DOUGHNUT => ChartType::Doughnut,
        XLSX_CHART_LINE => ChartType::Line,
        XLSX_CHART_LINE_STACKED => ChartType::LineStacked,
        XLSX_CHART_LINE_STACKED_PERCENT => ChartType::LinePercentStacked,
        XLSX_CHART_PIE => ChartType::Pie,
        XLSX_CHART_SCATTER => ChartType::Scatter,
        XLSX_CHART_SCATTER_STRAIGHT => ChartType::ScatterStraight,
        XLSX_CHART_SCATTER_STRAIGHT_WITH_MARKERS => ChartType::ScatterStraightWithMarkers,
        XLSX_CHART_SCATTER_SMOOTH => ChartType::ScatterSmooth,
        XLSX_CHART_SCATTER_SMOOTH_WITH_MARKERS => ChartType::ScatterSmoothWithMarkers,
        XLSX_CHART_RADAR => ChartType::Radar,
        XLSX_CHART_RADAR_WITH_MARKERS => ChartType::RadarWithMarkers,
        XLSX_CHART_RADAR_FILLED => ChartType::RadarFilled,
        _ => return None,
    };
    Some(mapped)
}

/// Borrow a C string argument as UTF-8.
///
/// Returns `None` for a null pointer. Invalid UTF-8 is replaced lossily.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the returned lifetime.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char) -> Option<std::borrow::Cow<'a, str>> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy())
}
