//! Data Marshaling Layer.
//!
//! Conversions between native PC/SC values and the managed [Value] model. "To native" conversions ([FromValue])
//! validate the whole input before allocating anything. "From native" conversions ([AppendTo]) push into an
//! [Output] accumulator.

mod buffer;
mod byte_list;
mod error_string;
mod guid_list;
mod output;
mod reader_state;
mod scalar;
mod string;
mod string_list;
mod value;

pub use self::buffer::NativeBuffer;
pub use self::byte_list::ByteList;
pub use self::error_string::ErrorString;
pub use self::guid_list::GuidList;
pub use self::output::Output;
pub use self::reader_state::{ReaderState, ReaderStateList};
pub use self::scalar::{Context, DwordArg, Handle};
pub use self::string::ScardString;
pub use self::string_list::StringList;
pub use self::value::Value;
use crate::{Error, ErrorKind, ScardResult};

/// Managed to native conversion.
pub trait FromValue: Sized {
    /// Validates the `value` and builds the native representation.
    fn from_value(value: &Value) -> ScardResult<Self>;
}

/// Native to managed conversion.
pub trait AppendTo {
    /// Converts `self` and appends the result to the `output`.
    fn append_to(&self, output: &mut Output);

    /// Converts `self` into a standalone value.
    fn to_value(&self) -> Value {
        let mut output = Output::new();
        self.append_to(&mut output);
        output.into_value()
    }
}

/// Checks that every item is an integer in `0..=255`.
fn validate_bytes(items: &[Value]) -> ScardResult<()> {
    for item in items {
        let value = item
            .as_int()
            .ok_or_else(|| Error::type_error("expected a list of bytes"))?;

        if u8::try_from(value).is_err() {
            return Err(Error::new(
                ErrorKind::Overflow,
                format!("byte value out of range: {}", value),
            ));
        }
    }

    Ok(())
}

/// Copies items already checked by [validate_bytes].
fn collect_bytes(items: &[Value]) -> ScardResult<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(items.len())?;
    bytes.extend(
        items
            .iter()
            .map(|item| item.as_int().and_then(|value| u8::try_from(value).ok()).unwrap_or_default()),
    );

    Ok(bytes)
}

/// Checks that the text can be passed as a NUL-terminated single-byte string.
fn validate_text(text: &str) -> ScardResult<()> {
    if !text.is_ascii() {
        return Err(Error::new(
            ErrorKind::Encoding,
            format!("can not encode {:?} as ASCII", text),
        ));
    }

    if text.contains('\0') {
        return Err(Error::type_error(format!("embedded NUL character in {:?}", text)));
    }

    Ok(())
}
