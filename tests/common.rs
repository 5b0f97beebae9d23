#![allow(dead_code)]

use std::ffi::{c_char, c_void, CStr};
use std::ptr::{self, NonNull};
use std::slice;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use scard_bridge::ffi::status::*;
use scard_bridge::ffi::{
    Dword, LpByte, LpCByte, LpCScardIoRequest, LpCStr, LpCVoid, LpDword, LpScardContext, LpScardHandle,
    LpScardIoRequest, LpScardReaderState, LpStr, LpVoid, ScardContext, ScardHandle, ScardIoRequest, ScardStatus,
};
use scard_bridge::resolver::{LibraryLoader, Operation, ProtocolDescriptor, SymbolSource};
use scard_bridge::{Error, ErrorKind, ScardResult};

pub const FAKE_CONTEXT: ScardContext = 0x0100_0001;
pub const FAKE_HANDLE: ScardHandle = 0x0200_0002;
pub const READERS: &[u8] = b"Reader A\0Reader B\0Broken\0\0";
pub const STATUS_READER: &[u8] = b"Reader A\0\0";
pub const ATR: [u8; 4] = [0x3b, 0x8f, 0x80, 0x01];
pub const ATTRIBUTE: [u8; 3] = [0x01, 0x02, 0x03];

pub static FREED: AtomicUsize = AtomicUsize::new(0);

pub static T0_PCI: ScardIoRequest = ScardIoRequest::new(SCARD_PROTOCOL_T0);
pub static T1_PCI: ScardIoRequest = ScardIoRequest::new(SCARD_PROTOCOL_T1);
pub static RAW_PCI: ScardIoRequest = ScardIoRequest::new(SCARD_PROTOCOL_RAW);

/// Copies `data` into the caller buffer following the PC/SC length protocol.
unsafe fn write_out<T: Copy>(data: &[T], out: *mut T, out_len: LpDword) -> ScardStatus {
    let available = unsafe { *out_len } as usize;
    unsafe { *out_len = data.len() as Dword };

    if out.is_null() {
        return SCARD_S_SUCCESS;
    }
    if available < data.len() {
        return SCARD_E_INSUFFICIENT_BUFFER;
    }

    unsafe { ptr::copy_nonoverlapping(data.as_ptr(), out, data.len()) };

    SCARD_S_SUCCESS
}

fn chars(bytes: &[u8]) -> Vec<c_char> {
    bytes.iter().map(|&b| b as c_char).collect()
}

pub unsafe extern "system" fn establish_context(
    _scope: Dword,
    _reserved1: LpCVoid,
    _reserved2: LpCVoid,
    context: LpScardContext,
) -> ScardStatus {
    unsafe { *context = FAKE_CONTEXT };

    SCARD_S_SUCCESS
}

pub unsafe extern "system" fn release_context(context: ScardContext) -> ScardStatus {
    if context == FAKE_CONTEXT {
        SCARD_S_SUCCESS
    } else {
        SCARD_E_INVALID_HANDLE
    }
}

pub unsafe extern "system" fn list_readers(
    _context: ScardContext,
    _groups: LpCStr,
    readers: LpStr,
    readers_len: LpDword,
) -> ScardStatus {
    let data = chars(READERS);

    if unsafe { *readers_len } == SCARD_AUTOALLOCATE {
        let memory = Box::into_raw(data.into_boxed_slice()) as *mut c_char;
        unsafe {
            *(readers as *mut LpStr) = memory;
            *readers_len = READERS.len() as Dword;
        }

        return SCARD_S_SUCCESS;
    }

    unsafe { write_out(&data, readers, readers_len) }
}

pub unsafe extern "system" fn free_memory(_context: ScardContext, memory: LpCVoid) -> ScardStatus {
    let memory = ptr::slice_from_raw_parts_mut(memory as *mut c_char, READERS.len());
    drop(unsafe { Box::from_raw(memory) });
    FREED.fetch_add(1, Ordering::SeqCst);

    SCARD_S_SUCCESS
}

pub unsafe extern "system" fn connect(
    _context: ScardContext,
    _reader: LpCStr,
    _share_mode: Dword,
    _preferred_protocols: Dword,
    handle: LpScardHandle,
    active_protocol: LpDword,
) -> ScardStatus {
    unsafe {
        *handle = FAKE_HANDLE;
        *active_protocol = SCARD_PROTOCOL_T1;
    }

    SCARD_S_SUCCESS
}

/// Answers with the reversed command followed by `90 00`.
pub unsafe extern "system" fn transmit(
    _handle: ScardHandle,
    send_pci: LpCScardIoRequest,
    send: LpCByte,
    send_len: Dword,
    _recv_pci: LpScardIoRequest,
    recv: LpByte,
    recv_len: LpDword,
) -> ScardStatus {
    let pci = unsafe { send_pci.read_unaligned() };
    let protocol = pci.dw_protocol;
    if protocol != SCARD_PROTOCOL_T1 {
        return SCARD_E_PROTO_MISMATCH;
    }

    let mut response: Vec<u8> = unsafe { slice::from_raw_parts(send, send_len as usize) }.to_vec();
    response.reverse();
    response.extend_from_slice(&[0x90, 0x00]);

    unsafe { write_out(&response, recv, recv_len) }
}

pub unsafe extern "system" fn control(
    _handle: ScardHandle,
    _control_code: Dword,
    send: LpCVoid,
    send_len: Dword,
    recv: LpVoid,
    recv_len: Dword,
    returned: LpDword,
) -> ScardStatus {
    if recv_len < send_len {
        return SCARD_E_INSUFFICIENT_BUFFER;
    }

    unsafe {
        ptr::copy_nonoverlapping(send as *const u8, recv as *mut u8, send_len as usize);
        *returned = send_len;
    }

    SCARD_S_SUCCESS
}

pub unsafe extern "system" fn get_attrib(
    _handle: ScardHandle,
    _attr_id: Dword,
    attr: LpByte,
    attr_len: LpDword,
) -> ScardStatus {
    unsafe { write_out(&ATTRIBUTE, attr, attr_len) }
}

pub unsafe extern "system" fn status(
    _handle: ScardHandle,
    readers: LpStr,
    readers_len: LpDword,
    state: LpDword,
    protocol: LpDword,
    atr: LpByte,
    atr_len: LpDword,
) -> ScardStatus {
    unsafe {
        *state = 0x0034;
        *protocol = SCARD_PROTOCOL_T1;
    }

    let status = unsafe { write_out(&ATR, atr, atr_len) };
    if status != SCARD_S_SUCCESS {
        return status;
    }

    unsafe { write_out(&chars(STATUS_READER), readers, readers_len) }
}

/// Reports a card everywhere. The "Broken" reader returns an out of bounds ATR length.
pub unsafe extern "system" fn get_status_change(
    _context: ScardContext,
    _timeout: Dword,
    states: LpScardReaderState,
    count: Dword,
) -> ScardStatus {
    for index in 0..count as usize {
        let state = unsafe { &mut *states.add(index) };
        let reader = unsafe { CStr::from_ptr(state.sz_reader) };

        state.dw_event_state = 0x0022;
        if reader == c"Broken" {
            state.cb_atr = 64;
        } else {
            let mut rgb_atr = state.rgb_atr;
            rgb_atr[..ATR.len()].copy_from_slice(&ATR);
            state.rgb_atr = rgb_atr;
            state.cb_atr = ATR.len() as Dword;
        }
    }

    SCARD_S_SUCCESS
}

pub unsafe extern "C" fn stringify_error(_status: ScardStatus) -> *const c_char {
    c"fake error".as_ptr()
}

/// In-process stand-in for the platform library.
#[derive(Debug, Clone, Default)]
pub struct FakeLibrary {
    symbols: Vec<(&'static CStr, usize)>,
}

impl FakeLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Exports the fakes above and all protocol descriptors.
    pub fn pcsc() -> Self {
        Self::empty()
            .with(Operation::EstablishContext, establish_context as usize)
            .with(Operation::ReleaseContext, release_context as usize)
            .with(Operation::ListReaders, list_readers as usize)
            .with(Operation::FreeMemory, free_memory as usize)
            .with(Operation::Connect, connect as usize)
            .with(Operation::Transmit, transmit as usize)
            .with(Operation::Control, control as usize)
            .with(Operation::GetAttrib, get_attrib as usize)
            .with(Operation::Status, status as usize)
            .with(Operation::GetStatusChange, get_status_change as usize)
            .with(Operation::StringifyError, stringify_error as usize)
            .with_descriptor(ProtocolDescriptor::T0, &T0_PCI)
            .with_descriptor(ProtocolDescriptor::T1, &T1_PCI)
            .with_descriptor(ProtocolDescriptor::Raw, &RAW_PCI)
    }

    /// Exports `address` under the platform symbol of the `operation`, if the platform has one.
    pub fn with(mut self, operation: Operation, address: usize) -> Self {
        if let Some(symbol) = operation.symbol() {
            self.symbols.push((symbol, address));
        }
        self
    }

    pub fn with_descriptor(mut self, descriptor: ProtocolDescriptor, pci: &'static ScardIoRequest) -> Self {
        self.symbols
            .push((descriptor.symbol(), pci as *const ScardIoRequest as usize));
        self
    }

    pub fn without(mut self, name: &CStr) -> Self {
        self.symbols.retain(|(symbol, _)| *symbol != name);
        self
    }
}

impl SymbolSource for FakeLibrary {
    fn symbol(&self, name: &CStr) -> Option<NonNull<c_void>> {
        self.symbols
            .iter()
            .find(|(symbol, _)| *symbol == name)
            .and_then(|(_, address)| NonNull::new(*address as *mut c_void))
    }
}

/// Counts open attempts. `library: None` simulates a missing library.
#[derive(Debug, Clone)]
pub struct FakeLoader {
    pub library: Option<FakeLibrary>,
    pub opens: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl FakeLoader {
    pub fn new(library: FakeLibrary) -> Self {
        Self {
            library: Some(library),
            opens: Arc::default(),
            delay: Duration::ZERO,
        }
    }

    pub fn missing() -> Self {
        Self {
            library: None,
            opens: Arc::default(),
            delay: Duration::ZERO,
        }
    }
}

impl LibraryLoader for FakeLoader {
    fn open(&self, path: &str) -> ScardResult<Box<dyn SymbolSource>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);

        match &self.library {
            Some(library) => Ok(Box::new(library.clone())),
            None => Err(Error::new(ErrorKind::LibraryUnavailable, format!("no library at {}", path))),
        }
    }
}
