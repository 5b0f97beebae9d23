use std::ffi::c_char;

use super::{validate_text, AppendTo, FromValue, NativeBuffer, Output, Value};
use crate::{Error, ScardResult};

/// A single NUL-terminated string, or no string at all.
#[derive(Debug, Default)]
pub struct ScardString {
    buffer: NativeBuffer<c_char>,
}

impl ScardString {
    /// Wraps native storage. An empty buffer means "no string".
    pub fn from_buffer(buffer: NativeBuffer<c_char>) -> Self {
        Self { buffer }
    }

    /// Encodes the `text`.
    pub fn from_text(text: &str) -> ScardResult<Self> {
        validate_text(text)?;

        let mut data = Vec::new();
        data.try_reserve_exact(text.len() + 1)?;
        data.extend(text.bytes().map(|byte| byte as c_char));
        data.push(0);

        Ok(Self::from_buffer(NativeBuffer::from_vec(data)))
    }

    /// Pointer to pass as a string argument. Null when there is no string.
    pub fn as_ptr(&self) -> *const c_char {
        self.buffer.as_ptr()
    }

    /// Decoded text up to the first NUL.
    pub fn text(&self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }

        let bytes: Vec<u8> = self
            .buffer
            .as_slice()
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect();

        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl FromValue for ScardString {
    fn from_value(value: &Value) -> ScardResult<Self> {
        let text = value.as_str().ok_or_else(|| Error::type_error("expected a string"))?;

        Self::from_text(text)
    }
}

impl AppendTo for ScardString {
    fn append_to(&self, output: &mut Output) {
        output.push(self.text());
    }
}
