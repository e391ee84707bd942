//! Chart types and chart views

use xlsxbind_engine::*;

use crate::workbook::Workbook;

/// Chart types
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    // Area
    Area = XLSX_CHART_AREA,
    AreaStacked = XLSX_CHART_AREA_STACKED,
    AreaPercentStacked = XLSX_CHART_AREA_STACKED_PERCENT,

    // Bar
    Bar = XLSX_CHART_BAR,
    BarStacked = XLSX_CHART_BAR_STACKED,
    BarPercentStacked = XLSX_CHART_BAR_STACKED_PERCENT,

    // Column
    Column = XLSX_CHART_COLUMN,
    ColumnStacked = XLSX_CHART_COLUMN_STACKED,
    ColumnPercentStacked = XLSX_CHART_COLUMN_STACKED_PERCENT,

    // Pie
    Doughnut = XLSX_CHART_DOUGHNUT,
    Pie = XLSX_CHART_PIE,

    // Line
    Line = XLSX_CHART_LINE,
    LineStacked = XLSX_CHART_LINE_STACKED,
    LinePercentStacked = XLSX_CHART_LINE_STACKED_PERCENT,

    // Scatter
    Scatter = XLSX_CHART_SCATTER,
    ScatterStraight = XLSX_CHART_SCATTER_STRAIGHT,
    ScatterStraightWithMarkers = XLSX_CHART_SCATTER_STRAIGHT_WITH_MARKERS,
    ScatterSmooth = XLSX_CHART_SCATTER_SMOOTH,
    ScatterSmoothWithMarkers = XLSX_CHART_SCATTER_SMOOTH_WITH_MARKERS,

    // Radar
    Radar = XLSX_CHART_RADAR,
    RadarWithMarkers = XLSX_CHART_RADAR_WITH_MARKERS,
    RadarFilled = XLSX_CHART_RADAR_FILLED,
}

impl ChartType {
    /// All chart types, in engine order
    pub const ALL: [ChartType; 22] = [
        ChartType::Area,
        ChartType::AreaStacked,
        ChartType::AreaPercentStacked,
        ChartType::Bar,
        ChartType::BarStacked,
        ChartType::BarPercentStacked,
        ChartType::Column,
        ChartType::ColumnStacked,
        ChartType::ColumnPercentStacked,
        ChartType::Doughnut,
        ChartType::Line,
        ChartType::LineStacked,
        ChartType::LinePercentStacked,
        ChartType::Pie,
        ChartType::Scatter,
        ChartType::ScatterStraight,
        ChartType::ScatterStraightWithMarkers,
        ChartType::ScatterSmooth,
        ChartType::ScatterSmoothWithMarkers,
        ChartType::Radar,
        ChartType::RadarWithMarkers,
        ChartType::RadarFilled,
    ];

    /// The engine's identifier for this chart type
    pub fn to_raw(self) -> u8 {
        self as u8
    }

    /// Map an engine identifier back to a chart type
    pub fn from_raw(raw: u8) -> Option<ChartType> {
        Self::ALL.into_iter().find(|chart_type| chart_type.to_raw() == raw)
    }
}

/// A chart owned by a [`Workbook`]
///
/// This is a non-owning view; it cannot outlive the workbook's borrow and
/// never releases anything itself.
#[derive(Debug, Clone, Copy)]
pub struct Chart<'wb> {
    workbook: &'wb Workbook,
    id: ObjectId,
}

impl<'wb> Chart<'wb> {
    pub(crate) fn new(workbook: &'wb Workbook, id: ObjectId) -> Self {
        Self { workbook, id }
    }

    /// Engine identifier of this chart within its workbook
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The workbook that owns this chart
    pub fn workbook(&self) -> &'wb Workbook {
        self.workbook
    }

    /// The chart's type, as recorded by the engine
    pub fn chart_type(&self) -> ChartType {
        let raw = xlsx_chart_get_type(self.workbook.raw(), self.id);
        ChartType::from_raw(raw)
            .unwrap_or_else(|| panic!("engine reported unknown chart type {raw}"))
    }
}
