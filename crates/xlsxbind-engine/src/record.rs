//! Engine-side state behind one workbook handle

use std::ffi::{CStr, CString};
use std::os::raw::c_int;
use std::path::PathBuf;

use rust_xlsxwriter::{Chart, DocProperties, Format, Workbook};

use crate::error::*;
use crate::handles::ObjectId;
use crate::types::chart_type_from_raw;

/// Maximum length of a worksheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum length of a property string or custom property name
pub const MAX_PROPERTY_LEN: usize = 255;

const INVALID_SHEETNAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Standard document metadata, replaced wholesale by each `set_properties`.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub manager: Option<String>,
    pub company: Option<String>,
    pub category: Option<String>,
    pub keywords: Option<String>,
    pub comments: Option<String>,
    pub status: Option<String>,
    pub hyperlink_base: Option<String>,
}

impl Metadata {
    fn fields(&self) -> [&Option<String>; 9] {
        [
            &self.title,
            &self.author,
            &self.manager,
            &self.company,
            &self.category,
            &self.keywords,
            &self.comments,
            &self.status,
            &self.hyperlink_base,
        ]
    }
}

/// Value of a user-defined document property
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CustomValue {
    Text(String),
    Number(f64),
    Integer(i32),
    Boolean(bool),
}

/// Everything the engine holds for one open workbook
pub(crate) struct WorkbookRecord {
    filename: PathBuf,
    constant_memory: bool,
    workbook: Workbook,
    sheet_names: Vec<CString>,
    formats: Vec<Format>,
    charts: Vec<(u8, Chart)>,
    metadata: Option<Metadata>,
    custom_properties: Vec<(String, CustomValue)>,
}

impl WorkbookRecord {
    /// Create the record for a new destination.
    pub fn new(
        filename: PathBuf,
        constant_memory: bool,
        tmpdir: Option<PathBuf>,
    ) -> Result<Self, c_int> {
        let mut workbook = Workbook::new();

        if let Some(dir) = tmpdir {
            if !dir.is_dir() {
                tracing::warn!("tmpdir {} is not a directory", dir.display());
                return Err(XLSX_ERROR_CREATING_TMPFILE);
            }
            if let Err(e) = workbook.set_tempdir(&dir) {
                tracing::warn!("cannot use tmpdir {}: {e}", dir.display());
                return Err(XLSX_ERROR_CREATING_TMPFILE);
            }
        }

        Ok(Self {
            filename,
            constant_memory,
            workbook,
            sheet_names: Vec::new(),
            formats: Vec::new(),
            charts: Vec::new(),
            metadata: None,
            custom_properties: Vec::new(),
        })
    }

    pub fn filename(&self) -> &PathBuf {
        &self.filename
    }

    /// Add a worksheet, generating `SheetN` when no name is given.
    pub fn add_worksheet(&mut self, name: Option<&str>) -> Result<ObjectId, c_int> {
        let name = match name {
            Some(name) => name.to_string(),
            None => self.generate_sheet_name(),
        };
        self.validate_sheet_name(&name)?;
        let c_name = CString::new(name.as_str()).map_err(|_| XLSX_ERROR_INVALID_SHEETNAME_CHARACTER)?;

        let worksheet = if self.constant_memory {
            self.workbook.add_worksheet_with_constant_memory()
        } else {
            self.workbook.add_worksheet()
        };

        let rejected = worksheet.set_name(name.as_str()).err();
        if let Some(e) = rejected {
            // The sheet exists under its default name; keep ids aligned with it.
            tracing::warn!("worksheet name '{name}' rejected by writer: {e}");
            let fallback = CString::new(worksheet.name()).unwrap_or_default();
            self.sheet_names.push(fallback);
            return Err(XLSX_ERROR_PARAMETER_VALIDATION);
        }

        self.sheet_names.push(c_name);
        Ok(self.sheet_names.len() as ObjectId)
    }

    pub fn add_format(&mut self) -> ObjectId {
        self.formats.push(Format::new());
        self.formats.len() as ObjectId
    }

    pub fn add_chart(&mut self, chart_type: u8) -> Result<ObjectId, c_int> {
        let mapped = chart_type_from_raw(chart_type).ok_or(XLSX_ERROR_PARAMETER_VALIDATION)?;
        self.charts.push((chart_type, Chart::new(mapped)));
        Ok(self.charts.len() as ObjectId)
    }

    /// Find a worksheet by name. Matching is case-insensitive, like the
    /// duplicate check in `validate_sheet_name`.
    pub fn worksheet_by_name(&self, name: &str) -> Option<ObjectId> {
        let lower = name.to_lowercase();
        self.sheet_names
            .iter()
            .position(|n| n.to_string_lossy().to_lowercase() == lower)
            .map(|index| (index + 1) as ObjectId)
    }

    pub fn worksheet_count(&self) -> u32 {
        self.sheet_names.len() as u32
    }

    pub fn worksheet_name(&self, id: ObjectId) -> Option<&CStr> {
        let index = (id as usize).checked_sub(1)?;
        self.sheet_names.get(index).map(CString::as_c_str)
    }

    pub fn chart_type(&self, id: ObjectId) -> Option<u8> {
        let index = (id as usize).checked_sub(1)?;
        self.charts.get(index).map(|(chart_type, _)| *chart_type)
    }

    /// Replace the standard metadata. Nothing changes if any field is too long.
    pub fn set_metadata(&mut self, metadata: Metadata) -> Result<(), c_int> {
        let too_long = metadata
            .fields()
            .iter()
            .filter_map(|field| field.as_deref())
            .any(|text| text.chars().count() > MAX_PROPERTY_LEN);
        if too_long {
            return Err(XLSX_ERROR_255_STRING_LENGTH_EXCEEDED);
        }
        self.metadata = Some(metadata);
        Ok(())
    }

    /// Add or replace a custom property by name.
    pub fn set_custom_property(&mut self, name: &str, value: CustomValue) -> Result<(), c_int> {
        if name.chars().count() > MAX_PROPERTY_LEN {
            return Err(XLSX_ERROR_255_STRING_LENGTH_EXCEEDED);
        }
        if let CustomValue::Text(text) = &value {
            if text.chars().count() > MAX_PROPERTY_LEN {
                return Err(XLSX_ERROR_255_STRING_LENGTH_EXCEEDED);
            }
        }

        match self.custom_properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.custom_properties.push((name.to_string(), value)),
        }
        Ok(())
    }

    pub fn define_name(&mut self, name: &str, formula: &str) -> Result<(), c_int> {
        self.workbook.define_name(name, formula).map_err(|e| {
            tracing::warn!("define_name '{name}' rejected: {e}");
            XLSX_ERROR_PARAMETER_VALIDATION
        })?;
        Ok(())
    }

    /// Apply pending metadata and write the destination. Consumes the record.
    pub fn finalize(mut self) -> Result<(), c_int> {
        if self.metadata.is_some() || !self.custom_properties.is_empty() {
            let properties = self.doc_properties();
            self.workbook.set_properties(&properties);
        }

        self.workbook.save(&self.filename).map_err(|e| {
            tracing::warn!("failed to write {}: {e}", self.filename.display());
            XLSX_ERROR_CREATING_XLSX_FILE
        })
    }

    fn doc_properties(&self) -> DocProperties {
        let mut properties = DocProperties::new();

        if let Some(metadata) = &self.metadata {
            if let Some(title) = &metadata.title {
                properties = properties.set_title(title.as_str());
            }
            if let Some(author) = &metadata.author {
                properties = properties.set_author(author.as_str());
            }
            if let Some(manager) = &metadata.manager {
                properties = properties.set_manager(manager.as_str());
            }
            if let Some(company) = &metadata.company {
                properties = properties.set_company(company.as_str());
            }
            if let Some(category) = &metadata.category {
                properties = properties.set_category(category.as_str());
            }
            if let Some(keywords) = &metadata.keywords {
                properties = properties.set_keywords(keywords.as_str());
            }
            if let Some(comments) = &metadata.comments {
                properties = properties.set_comment(comments.as_str());
            }
            if let Some(status) = &metadata.status {
                properties = properties.set_status(status.as_str());
            }
            if let Some(base) = &metadata.hyperlink_base {
                properties = properties.set_hyperlink_base(base.as_str());
            }
        }

        for (name, value) in &self.custom_properties {
            properties = match value {
                CustomValue::Text(text) => properties.set_custom_property(name.as_str(), text.as_str()),
                CustomValue::Number(number) => properties.set_custom_property(name.as_str(), *number),
                CustomValue::Integer(integer) => properties.set_custom_property(name.as_str(), *integer),
                CustomValue::Boolean(boolean) => properties.set_custom_property(name.as_str(), *boolean),
            };
        }

        properties
    }

    /// Check a worksheet name against Excel's rules and the names in use.
    pub fn validate_sheet_name(&self, name: &str) -> Result<(), c_int> {
        if name.is_empty() {
            return Err(XLSX_ERROR_SHEETNAME_EMPTY);
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(XLSX_ERROR_SHEETNAME_LENGTH_EXCEEDED);
        }
        if name.contains(INVALID_SHEETNAME_CHARS) {
            return Err(XLSX_ERROR_INVALID_SHEETNAME_CHARACTER);
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(XLSX_ERROR_SHEETNAME_START_END_APOSTROPHE);
        }
        // Reserved by Excel
        if name.eq_ignore_ascii_case("history") {
            return Err(XLSX_ERROR_PARAMETER_VALIDATION);
        }

        // Duplicates are case-insensitive
        let lower = name.to_lowercase();
        let duplicate = self
            .sheet_names
            .iter()
            .any(|existing| existing.to_string_lossy().to_lowercase() == lower);
        if duplicate {
            return Err(XLSX_ERROR_SHEETNAME_ALREADY_USED);
        }

        Ok(())
    }

    fn generate_sheet_name(&self) -> String {
        let mut n = self.sheet_names.len() + 1;
        loop {
            let name = format!("Sheet{n}");
            if self.validate_sheet_name(&name).is_ok() {
                return name;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> WorkbookRecord {
        WorkbookRecord::new(PathBuf::from("unused.xlsx"), false, None).unwrap()
    }

    #[test]
    fn test_default_sheet_names() {
        let mut rec = record();
        assert_eq!(rec.add_worksheet(None), Ok(1));
        assert_eq!(rec.add_worksheet(Some("Sheet2x")), Ok(2));
        assert_eq!(rec.add_worksheet(None), Ok(3));
        assert_eq!(rec.worksheet_name(3).unwrap().to_str().unwrap(), "Sheet3");
    }

    #[test]
    fn test_generated_name_skips_taken() {
        let mut rec = record();
        rec.add_worksheet(Some("Sheet2")).unwrap();
        rec.add_worksheet(None).unwrap();
        assert_eq!(rec.worksheet_name(2).unwrap().to_str().unwrap(), "Sheet3");
    }

    #[test]
    fn test_invalid_sheet_names() {
        let mut rec = record();
        assert_eq!(rec.add_worksheet(Some("")), Err(XLSX_ERROR_SHEETNAME_EMPTY));
        assert_eq!(
            rec.add_worksheet(Some(&"A".repeat(MAX_SHEET_NAME_LEN + 1))),
            Err(XLSX_ERROR_SHEETNAME_LENGTH_EXCEEDED)
        );
        assert_eq!(
            rec.add_worksheet(Some("Sheet/1")),
            Err(XLSX_ERROR_INVALID_SHEETNAME_CHARACTER)
        );
        assert_eq!(
            rec.add_worksheet(Some("'Quoted")),
            Err(XLSX_ERROR_SHEETNAME_START_END_APOSTROPHE)
        );
        assert_eq!(rec.worksheet_count(), 0);
    }

    #[test]
    fn test_duplicate_sheet_name() {
        let mut rec = record();
        rec.add_worksheet(Some("Data")).unwrap();
        assert_eq!(rec.add_worksheet(Some("DATA")), Err(XLSX_ERROR_SHEETNAME_ALREADY_USED));
        assert_eq!(rec.worksheet_count(), 1);
    }

    #[test]
    fn test_worksheet_lookup_ignores_case() {
        let mut rec = record();
        rec.add_worksheet(Some("Data")).unwrap();
        assert_eq!(rec.worksheet_by_name("Data"), Some(1));
        assert_eq!(rec.worksheet_by_name("data"), Some(1));
        assert_eq!(rec.worksheet_by_name("DATA"), Some(1));
        assert_eq!(rec.worksheet_by_name("Data2"), None);
        assert_eq!(rec.worksheet_name(0), None);
        assert_eq!(rec.worksheet_name(2), None);
    }

    #[test]
    fn test_charts_and_formats() {
        let mut rec = record();
        assert_eq!(rec.add_format(), 1);
        assert_eq!(rec.add_format(), 2);

        let id = rec.add_chart(crate::types::XLSX_CHART_PIE).unwrap();
        assert_eq!(rec.chart_type(id), Some(crate::types::XLSX_CHART_PIE));
        assert_eq!(
            rec.add_chart(crate::types::XLSX_CHART_NONE),
            Err(XLSX_ERROR_PARAMETER_VALIDATION)
        );
    }

    #[test]
    fn test_metadata_length_limit() {
        let mut rec = record();
        let metadata = Metadata {
            title: Some("T".repeat(MAX_PROPERTY_LEN + 1)),
            ..Default::default()
        };
        assert_eq!(rec.set_metadata(metadata), Err(XLSX_ERROR_255_STRING_LENGTH_EXCEEDED));
        assert!(rec.metadata.is_none());
    }

    #[test]
    fn test_custom_property_replaces_by_name() {
        let mut rec = record();
        rec.set_custom_property("Checked", CustomValue::Boolean(false)).unwrap();
        rec.set_custom_property("Checked", CustomValue::Boolean(true)).unwrap();
        rec.set_custom_property("Count", CustomValue::Integer(3)).unwrap();
        assert_eq!(
            rec.custom_properties,
            vec![
                ("Checked".to_string(), CustomValue::Boolean(true)),
                ("Count".to_string(), CustomValue::Integer(3)),
            ]
        );
    }

    #[test]
    fn test_missing_tmpdir_rejected() {
        let result = WorkbookRecord::new(
            PathBuf::from("unused.xlsx"),
            true,
            Some(PathBuf::from("/definitely/not/a/real/dir")),
        );
        assert_eq!(result.err(), Some(XLSX_ERROR_CREATING_TMPFILE));
    }
}
