use std::fmt;

use pcsc_ffi_types::Guid;
use uuid::Uuid;

use super::{collect_bytes, validate_bytes, AppendTo, FromValue, NativeBuffer, Output, Value};
use crate::{Error, ScardResult};

const GUID_SIZE: usize = 16;

/// Interface and provider identifiers.
///
/// The managed side sees GUIDs as their in-memory bytes, so a round-trip keeps the byte order.
#[derive(Debug, Default)]
pub struct GuidList {
    buffer: NativeBuffer<Guid>,
}

fn guid_from_bytes(bytes: &[u8; GUID_SIZE]) -> Guid {
    let [a0, a1, a2, a3, b0, b1, c0, c1, d @ ..] = *bytes;

    Guid {
        data1: u32::from_ne_bytes([a0, a1, a2, a3]),
        data2: u16::from_ne_bytes([b0, b1]),
        data3: u16::from_ne_bytes([c0, c1]),
        data4: d,
    }
}

fn guid_to_bytes(guid: &Guid) -> [u8; GUID_SIZE] {
    let mut bytes = [0; GUID_SIZE];
    bytes[0..4].copy_from_slice(&guid.data1.to_ne_bytes());
    bytes[4..6].copy_from_slice(&guid.data2.to_ne_bytes());
    bytes[6..8].copy_from_slice(&guid.data3.to_ne_bytes());
    bytes[8..].copy_from_slice(&guid.data4);

    bytes
}

impl GuidList {
    /// Wraps native storage.
    pub fn from_buffer(buffer: NativeBuffer<Guid>) -> Self {
        Self { buffer }
    }

    /// Underlying storage.
    pub fn buffer(&self) -> &NativeBuffer<Guid> {
        &self.buffer
    }

    /// GUID records.
    pub fn guids(&self) -> &[Guid] {
        self.buffer.as_slice()
    }

    /// Number of GUIDs.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Reports whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// In-memory bytes of every GUID, concatenated.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.guids().iter().flat_map(guid_to_bytes).collect()
    }
}

impl FromValue for GuidList {
    fn from_value(value: &Value) -> ScardResult<Self> {
        let items = value
            .as_list()
            .ok_or_else(|| Error::type_error("expected a list object"))?;

        if items.len() % GUID_SIZE != 0 {
            return Err(Error::type_error("invalid GUID list size"));
        }
        validate_bytes(items)?;

        let bytes = collect_bytes(items)?;
        let mut guids = Vec::new();
        guids.try_reserve_exact(bytes.len() / GUID_SIZE)?;
        guids.extend(
            bytes
                .chunks_exact(GUID_SIZE)
                .filter_map(|chunk| <&[u8; GUID_SIZE]>::try_from(chunk).ok())
                .map(guid_from_bytes),
        );

        Ok(Self::from_buffer(NativeBuffer::from_vec(guids)))
    }
}

impl AppendTo for GuidList {
    fn append_to(&self, output: &mut Output) {
        output.push(Value::List(
            self.guids()
                .iter()
                .map(|guid| Value::bytes(&guid_to_bytes(guid)))
                .collect(),
        ));
    }
}

impl fmt::Display for GuidList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, guid) in self.guids().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let uuid = Uuid::from_fields(guid.data1, guid.data2, guid.data3, &guid.data4);
            write!(f, "{{{}}}", uuid)?;
        }
        Ok(())
    }
}
