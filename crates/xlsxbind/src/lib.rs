//! # xlsxbind
//!
//! Owning wrappers around the `xlsxbind-engine` workbook handles.
//!
//! This crate provides the lifecycle layer over the engine's C ABI:
//! - [`Options`] - creation options, consumed when a workbook is opened
//! - [`Properties`] - document metadata, copied by the engine on hand-off
//! - [`Workbook`] - sole owner of an engine handle, closed exactly once
//! - [`Worksheet`], [`Format`], [`Chart`] - non-owning views that borrow the workbook
//!
//! ## Example
//!
//! ```rust,no_run
//! use xlsxbind::{ChartType, Options, Properties, Workbook};
//!
//! let mut workbook = Workbook::new("report.xlsx", Options::new(false));
//! workbook.add_worksheet("Sheet1")?;
//! workbook.add_chart(ChartType::Column);
//!
//! let mut properties = Properties::new();
//! properties.set_title("Report").set_author("A");
//! workbook.set_properties(&properties)?;
//! workbook.set_custom_property("Reviewed", true)?;
//!
//! // Writes report.xlsx; dropping the workbook would also do this.
//! workbook.close()?;
//! # Ok::<(), xlsxbind::Error>(())
//! ```

pub mod chart;
pub mod custom_property;
pub mod error;
pub mod format;
pub mod options;
pub mod properties;
pub mod workbook;
pub mod worksheet;

mod text;

pub use chart::{Chart, ChartType};
pub use custom_property::CustomPropertyValue;
pub use error::{CustomPropertyKind, EngineError, Error, Result};
pub use format::Format;
pub use options::Options;
pub use properties::Properties;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

pub use xlsxbind_engine::{Handle, ObjectId};
