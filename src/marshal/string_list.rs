use std::ffi::c_char;
use std::fmt;

use super::{validate_text, AppendTo, FromValue, NativeBuffer, Output, Value};
use crate::{Error, ScardResult};

/// Multi-string: `item0\0item1\0\0`.
///
/// An empty list is passed to the native side as a null pointer. Items can not be empty: an empty item would
/// terminate the multi-string early.
#[derive(Debug, Default)]
pub struct StringList {
    buffer: NativeBuffer<c_char>,
}

impl StringList {
    /// Wraps native storage holding a multi-string.
    pub fn from_buffer(buffer: NativeBuffer<c_char>) -> Self {
        Self { buffer }
    }

    /// Encodes the `items`.
    pub fn from_strings<S: AsRef<str>>(items: &[S]) -> ScardResult<Self> {
        fn as_str<S: AsRef<str>>(item: &S) -> &str {
            item.as_ref()
        }

        Self::encode(items.iter().map(as_str))
    }

    // Two passes: every item is checked and measured before the buffer is allocated.
    fn encode<'a, I>(items: I) -> ScardResult<Self>
    where
        I: Iterator<Item = &'a str> + Clone,
    {
        let mut count = 0;
        let mut total = 1;
        for item in items.clone() {
            if item.is_empty() {
                return Err(Error::type_error("expected a list of non-empty strings"));
            }
            validate_text(item)?;
            count += 1;
            total += item.len() + 1;
        }

        if count == 0 {
            return Ok(Self::default());
        }

        let mut data = Vec::new();
        data.try_reserve_exact(total)?;
        for item in items {
            data.extend(item.bytes().map(|byte| byte as c_char));
            data.push(0);
        }
        data.push(0);

        Ok(Self::from_buffer(NativeBuffer::from_vec(data)))
    }

    /// Underlying storage.
    pub fn buffer(&self) -> &NativeBuffer<c_char> {
        &self.buffer
    }

    /// Pointer to pass as a multi-string argument. Null for an empty list.
    pub fn as_ptr(&self) -> *const c_char {
        self.buffer.as_ptr()
    }

    /// Decoded items. Parsing stops at the first empty item.
    pub fn strings(&self) -> Vec<String> {
        self.buffer
            .as_slice()
            .split(|&c| c == 0)
            .take_while(|item| !item.is_empty())
            .map(|item| {
                let bytes: Vec<u8> = item.iter().map(|&c| c as u8).collect();
                String::from_utf8_lossy(&bytes).into_owned()
            })
            .collect()
    }
}

impl FromValue for StringList {
    fn from_value(value: &Value) -> ScardResult<Self> {
        let items = value
            .as_list()
            .ok_or_else(|| Error::type_error("expected a list object"))?;

        if items.iter().any(|item| item.as_str().is_none()) {
            return Err(Error::type_error("expected a list of strings"));
        }

        Self::encode(items.iter().filter_map(Value::as_str))
    }
}

impl AppendTo for StringList {
    fn append_to(&self, output: &mut Output) {
        output.push(Value::List(self.strings().into_iter().map(Value::Str).collect()));
    }
}

impl fmt::Display for StringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.strings().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn raw(list: &StringList) -> Vec<u8> {
        list.buffer().as_slice().iter().map(|&c| c as u8).collect()
    }

    #[test]
    fn items_are_separated_and_terminated() {
        let list = StringList::from_strings(&["Reader A", "Reader B"]).unwrap();

        assert_eq!(raw(&list), b"Reader A\0Reader B\0\0");
        assert_eq!(list.strings(), ["Reader A", "Reader B"]);
        assert_eq!(list.to_string(), "Reader A Reader B");
    }

    #[test]
    fn empty_list_is_a_null_pointer() {
        let list = StringList::from_value(&Value::List(Vec::new())).unwrap();

        assert!(list.as_ptr().is_null());
        assert_eq!(list.to_value(), Value::List(Vec::new()));
    }

    #[test]
    fn single_terminator_decodes_to_empty_list() {
        let list = StringList::from_buffer(NativeBuffer::from_vec(vec![0]));

        assert!(list.strings().is_empty());
    }

    #[test]
    fn parsing_stops_at_the_first_empty_item() {
        let data = b"first\0\0second\0\0".iter().map(|&b| b as c_char).collect();
        let list = StringList::from_buffer(NativeBuffer::from_vec(data));

        assert_eq!(list.strings(), ["first"]);
    }

    #[test]
    fn rejects_non_ascii_and_non_strings() {
        let error = StringList::from_value(&Value::List(vec!["Lecteur \u{e9}".into()])).unwrap_err();
        assert_eq!(error.error_kind, ErrorKind::Encoding);

        let error = StringList::from_value(&Value::List(vec!["a".into(), 1_u8.into()])).unwrap_err();
        assert_eq!(error.description, "expected a list of strings");

        let error = StringList::from_value(&Value::Str("a".into())).unwrap_err();
        assert_eq!(error.description, "expected a list object");
    }

    #[test]
    fn rejects_empty_items() {
        let value = Value::List(vec!["a".into(), "".into(), "b".into()]);

        let error = StringList::from_value(&value).unwrap_err();
        assert_eq!(error.error_kind, ErrorKind::Type);
        assert_eq!(error.description, "expected a list of non-empty strings");

        let error = StringList::from_strings(&[""]).unwrap_err();
        assert_eq!(error.error_kind, ErrorKind::Type);
    }
}
