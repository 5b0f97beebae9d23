use std::fmt;

use super::{collect_bytes, validate_bytes, AppendTo, FromValue, NativeBuffer, Output, Value};
use crate::{Error, ScardResult};

/// Raw bytes: APDUs, attributes, ATRs.
#[derive(Debug, Default)]
pub struct ByteList {
    buffer: NativeBuffer<u8>,
}

impl ByteList {
    /// Wraps native storage.
    pub fn from_buffer(buffer: NativeBuffer<u8>) -> Self {
        Self { buffer }
    }

    /// Copies the `bytes`.
    pub fn from_slice(bytes: &[u8]) -> ScardResult<Self> {
        Ok(Self::from_buffer(NativeBuffer::try_from_slice(bytes)?))
    }

    /// Underlying storage.
    pub fn buffer(&self) -> &NativeBuffer<u8> {
        &self.buffer
    }

    /// Bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Reports whether there are no bytes.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl FromValue for ByteList {
    fn from_value(value: &Value) -> ScardResult<Self> {
        let items = value
            .as_list()
            .ok_or_else(|| Error::type_error("expected a list object"))?;
        validate_bytes(items)?;

        Ok(Self::from_buffer(NativeBuffer::from_vec(collect_bytes(items)?)))
    }
}

impl AppendTo for ByteList {
    fn append_to(&self, output: &mut Output) {
        output.push(Value::bytes(self.as_bytes()));
    }
}

impl fmt::Display for ByteList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
