//! Typed dispatch for custom document properties

use std::ffi::CStr;
use std::os::raw::c_int;

use xlsxbind_engine::{
    xlsx_workbook_set_custom_property_boolean, xlsx_workbook_set_custom_property_integer,
    xlsx_workbook_set_custom_property_number, xlsx_workbook_set_custom_property_string, Handle,
};

use crate::error::CustomPropertyKind;
use crate::text::c_string;

mod sealed {
    pub trait Sealed {}

    impl Sealed for &str {}
    impl Sealed for String {}
    impl Sealed for f64 {}
    impl Sealed for i32 {}
    impl Sealed for bool {}
}

/// Values accepted by
/// [`Workbook::set_custom_property`](crate::Workbook::set_custom_property)
///
/// Each type is routed to its own engine entry point.
pub trait CustomPropertyValue: sealed::Sealed {
    /// Which kind of property this value produces
    fn kind(&self) -> CustomPropertyKind;

    #[doc(hidden)]
    fn apply(self, handle: Handle, name: &CStr) -> c_int;
}

impl CustomPropertyValue for &str {
    fn kind(&self) -> CustomPropertyKind {
        CustomPropertyKind::String
    }

    fn apply(self, handle: Handle, name: &CStr) -> c_int {
        let value = c_string(self);
        unsafe { xlsx_workbook_set_custom_property_string(handle, name.as_ptr(), value.as_ptr()) }
    }
}

impl CustomPropertyValue for String {
    fn kind(&self) -> CustomPropertyKind {
        CustomPropertyKind::String
    }

    fn apply(self, handle: Handle, name: &CStr) -> c_int {
        self.as_str().apply(handle, name)
    }
}

impl CustomPropertyValue for f64 {
    fn kind(&self) -> CustomPropertyKind {
        CustomPropertyKind::Number
    }

    fn apply(self, handle: Handle, name: &CStr) -> c_int {
        unsafe { xlsx_workbook_set_custom_property_number(handle, name.as_ptr(), self) }
    }
}

impl CustomPropertyValue for i32 {
    fn kind(&self) -> CustomPropertyKind {
        CustomPropertyKind::Integer
    }

    fn apply(self, handle: Handle, name: &CStr) -> c_int {
        unsafe { xlsx_workbook_set_custom_property_integer(handle, name.as_ptr(), self) }
    }
}

impl CustomPropertyValue for bool {
    fn kind(&self) -> CustomPropertyKind {
        CustomPropertyKind::Boolean
    }

    fn apply(self, handle: Handle, name: &CStr) -> c_int {
        unsafe { xlsx_workbook_set_custom_property_boolean(handle, name.as_ptr(), u8::from(self)) }
    }
}
