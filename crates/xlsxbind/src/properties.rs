//! Document metadata properties

use std::ffi::CString;

use xlsxbind_engine::XlsxDocProperties;

use crate::text::{as_ptr_or_null, c_string};

/// Document metadata passed to
/// [`Workbook::set_properties`](crate::Workbook::set_properties)
///
/// Each field holds an owned copy of the caller's text. Setting a field again
/// releases the previous copy before storing the new one. The workbook copies
/// what it needs, so a `Properties` value can be dropped or reused freely
/// after the hand-off.
#[derive(Debug, Default)]
pub struct Properties {
    title: Option<CString>,
    author: Option<CString>,
    manager: Option<CString>,
    company: Option<CString>,
    category: Option<CString>,
    keywords: Option<CString>,
    comments: Option<CString>,
    status: Option<CString>,
    hyperlink_base: Option<CString>,
}

macro_rules! text_fields {
    ($($(#[$doc:meta])* $field:ident => $setter:ident;)*) => {
        impl Properties {
            $(
                $(#[$doc])*
                pub fn $setter(&mut self, text: &str) -> &mut Self {
                    self.$field = Some(c_string(text));
                    self
                }

                pub fn $field(&self) -> Option<&str> {
                    self.$field.as_deref().and_then(|text| text.to_str().ok())
                }
            )*
        }
    };
}

text_fields! {
    /// Set the document title
    title => set_title;
    /// Set the document author
    author => set_author;
    /// Set the document manager
    manager => set_manager;
    /// Set the company name
    company => set_company;
    /// Set the document category
    category => set_category;
    /// Set the search keywords
    keywords => set_keywords;
    /// Set the document comments
    comments => set_comments;
    /// Set the document status
    status => set_status;
    /// Set the base URL for relative hyperlinks
    hyperlink_base => set_hyperlink_base;
}

impl Properties {
    /// Create an empty set of properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated fields
    pub fn len(&self) -> usize {
        self.fields().iter().filter(|field| field.is_some()).count()
    }

    /// Check if no field has been set
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fields(&self) -> [&Option<CString>; 9] {
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

    /// Borrow these properties as the engine's record.
    ///
    /// The record points into `self` and must not outlive it.
    pub(crate) fn as_raw(&self) -> XlsxDocProperties {
        XlsxDocProperties {
            title: as_ptr_or_null(&self.title),
            author: as_ptr_or_null(&self.author),
            manager: as_ptr_or_null(&self.manager),
            company: as_ptr_or_null(&self.company),
            category: as_ptr_or_null(&self.category),
            keywords: as_ptr_or_null(&self.keywords),
            comments: as_ptr_or_null(&self.comments),
            status: as_ptr_or_null(&self.status),
            hyperlink_base: as_ptr_or_null(&self.hyperlink_base),
        }
    }
}
