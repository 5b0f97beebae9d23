use std::ffi::{c_char, CStr};

use super::{AppendTo, Output};

/// Text returned by `pcsc_stringify_error`. A null pointer is `None`, not an empty string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorString(Option<String>);

impl ErrorString {
    /// Copies the text behind `text`.
    ///
    /// # Safety
    ///
    /// `text` is null or points to a valid NUL-terminated string.
    pub unsafe fn from_ptr(text: *const c_char) -> Self {
        if text.is_null() {
            return Self(None);
        }

        // SAFETY: checked for null above. The caller guarantees NUL termination.
        let text = unsafe { CStr::from_ptr(text) };

        Self(Some(text.to_string_lossy().into_owned()))
    }

    /// The text, if any.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl AppendTo for ErrorString {
    fn append_to(&self, output: &mut Output) {
        output.push(self.0.clone());
    }
}
