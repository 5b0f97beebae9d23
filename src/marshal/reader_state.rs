use std::ffi::CString;
use std::ptr;

use pcsc_ffi_types::{Dword, LpScardReaderState, ScardReaderState, MAX_ATR_SIZE};

use super::{collect_bytes, validate_bytes, validate_text, AppendTo, DwordArg, FromValue, Output, Value};
use crate::flags::ReaderStateFlags;
use crate::{Error, ScardResult};

/// Managed view of one native reader state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderState {
    /// Reader name.
    pub reader: String,
    /// `dwEventState`, including the event counter bits.
    pub event_state: ReaderStateFlags,
    /// Last seen ATR. Empty when the native length is out of bounds.
    pub atr: Vec<u8>,
}

/// Native reader state records together with owned copies of their reader names.
///
/// The records point into the owned names only, never into managed memory.
#[derive(Debug, Default)]
pub struct ReaderStateList {
    states: Vec<ScardReaderState>,
    names: Vec<CString>,
}

// SAFETY: `sz_reader` points into `names` which are owned by the list. `pv_user_data` is always null.
unsafe impl Send for ReaderStateList {}

impl ReaderStateList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    ///
    /// An ATR longer than [MAX_ATR_SIZE] is treated as absent.
    pub fn push(&mut self, reader: &str, current_state: Dword, atr: Option<&[u8]>) -> ScardResult<()> {
        validate_text(reader)?;
        let name = CString::new(reader)?;

        self.names.try_reserve(1)?;
        self.states.try_reserve(1)?;

        let mut state = ScardReaderState {
            sz_reader: name.as_ptr(),
            dw_current_state: current_state,
            ..Default::default()
        };

        match atr {
            Some(atr) if atr.len() > MAX_ATR_SIZE => {
                warn!(reader, atr_len = atr.len(), "ATR is too long and is ignored");
            }
            Some(atr) => {
                let mut rgb_atr = state.rgb_atr;
                rgb_atr[..atr.len()].copy_from_slice(atr);
                state.rgb_atr = rgb_atr;
                state.cb_atr = atr.len() as Dword;
            }
            None => {}
        }

        self.names.push(name);
        self.states.push(state);

        Ok(())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Reports whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of records as the native count type.
    pub fn native_len(&self) -> ScardResult<Dword> {
        Ok(Dword::try_from(self.states.len())?)
    }

    /// Pointer to the native array. Null when the list is empty.
    pub fn as_mut_ptr(&mut self) -> LpScardReaderState {
        if self.states.is_empty() {
            ptr::null_mut()
        } else {
            self.states.as_mut_ptr()
        }
    }

    /// Native records.
    pub fn records(&self) -> &[ScardReaderState] {
        &self.states
    }

    /// Managed view of every record, in input order.
    ///
    /// The ATR length is checked against [MAX_ATR_SIZE] before any byte is read.
    pub fn states(&self) -> Vec<ReaderState> {
        self.states
            .iter()
            .zip(&self.names)
            .map(|(state, name)| {
                let event_state = state.dw_event_state;
                let cb_atr = state.cb_atr as usize;
                let rgb_atr = state.rgb_atr;

                let atr = if cb_atr > MAX_ATR_SIZE {
                    debug!(?name, cb_atr, "Out of bounds ATR length is reset");
                    Vec::new()
                } else {
                    rgb_atr[..cb_atr].to_vec()
                };

                ReaderState {
                    reader: name.to_string_lossy().into_owned(),
                    event_state: ReaderStateFlags::from_bits_retain(event_state),
                    atr,
                }
            })
            .collect()
    }
}

fn validate_tuple(items: &[Value]) -> ScardResult<()> {
    if items.len() != 2 && items.len() != 3 {
        return Err(Error::type_error("expecting two or three items in tuple"));
    }

    let reader = items[0]
        .as_str()
        .ok_or_else(|| Error::type_error("expected a string as reader name"))?;
    validate_text(reader)?;

    if items[1].as_int().is_none() {
        return Err(Error::type_error("expected an integer as second tuple item"));
    }
    DwordArg::from_value(&items[1])?;

    if let Some(atr) = items.get(2) {
        let atr = atr
            .as_list()
            .ok_or_else(|| Error::type_error("expected a list as third tuple item"))?;
        validate_bytes(atr)?;
    }

    Ok(())
}

impl FromValue for ReaderStateList {
    fn from_value(value: &Value) -> ScardResult<Self> {
        let items = value
            .as_list()
            .ok_or_else(|| Error::type_error("expected a list object"))?;

        for item in items {
            let tuple = item
                .as_tuple()
                .ok_or_else(|| Error::type_error("expected a list of tuples"))?;
            validate_tuple(tuple)?;
        }

        let mut list = Self::new();
        list.names.try_reserve_exact(items.len())?;
        list.states.try_reserve_exact(items.len())?;

        for tuple in items.iter().filter_map(Value::as_tuple) {
            let reader = tuple[0].as_str().unwrap_or_default();
            let DwordArg(current_state) = DwordArg::from_value(&tuple[1])?;
            let atr = match tuple.get(2).and_then(Value::as_list) {
                Some(atr) => Some(collect_bytes(atr)?),
                None => None,
            };

            list.push(reader, current_state, atr.as_deref())?;
        }

        Ok(list)
    }
}

impl AppendTo for ReaderStateList {
    fn append_to(&self, output: &mut Output) {
        output.push(Value::List(
            self.states()
                .into_iter()
                .map(|state| {
                    Value::Tuple(vec![
                        Value::Str(state.reader),
                        Value::from(state.event_state.bits()),
                        Value::bytes(&state.atr),
                    ])
                })
                .collect(),
        ));
    }
}
