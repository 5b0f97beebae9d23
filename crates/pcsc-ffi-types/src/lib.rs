#![warn(missing_docs)]
//! Platform-width PC/SC type definitions.
//!
//! The PC/SC API has three flavours that differ in integer widths and structure packing:
//! pcsc-lite on generic Unix, the PCSC framework on macOS and WinSCard on Windows.
//! Everything here is selected at compile time.

#[allow(missing_docs)]
pub mod common;
pub mod functions;
#[allow(missing_docs)]
pub mod status;

#[cfg(all(unix, not(target_os = "macos")))]
use core::ffi::{c_long, c_ulong};

pub use common::*;

/// `DWORD` as seen by the PC/SC API.
#[cfg(all(unix, not(target_os = "macos")))]
pub type Dword = c_ulong;
/// `DWORD` as seen by the PC/SC API.
#[cfg(any(target_os = "macos", windows))]
pub type Dword = u32;

/// Signed `LONG` of the same width as [Dword].
#[cfg(all(unix, not(target_os = "macos")))]
pub type Long = c_long;
/// Signed `LONG` of the same width as [Dword].
#[cfg(any(target_os = "macos", windows))]
pub type Long = i32;

/// Pointer to the [Dword].
pub type LpDword = *mut Dword;

/// Return value of every PC/SC function.
pub type ScardStatus = Long;

/// `hContext` returned by `SCardEstablishContext()`.
///
/// https://pcsclite.apdu.fr/api/pcsclite_8h.html#a22530ffaff18b5d3e32260a5f1ce4abd
#[cfg(all(unix, not(target_os = "macos")))]
pub type ScardContext = c_long;
/// `hContext` returned by `SCardEstablishContext()`.
#[cfg(target_os = "macos")]
pub type ScardContext = i32;
/// `hContext` returned by `SCardEstablishContext()`. It is a `ULONG_PTR` on Windows.
#[cfg(windows)]
pub type ScardContext = usize;

/// Pointer to the [ScardContext].
pub type LpScardContext = *mut ScardContext;

/// `hCard` returned by `SCardConnect()`.
///
/// https://pcsclite.apdu.fr/api/pcsclite_8h.html#af328aca3e11de737ecd771bcf1f75fb5
#[cfg(all(unix, not(target_os = "macos")))]
pub type ScardHandle = c_long;
/// `hCard` returned by `SCardConnect()`.
#[cfg(target_os = "macos")]
pub type ScardHandle = i32;
/// `hCard` returned by `SCardConnect()`. It is a `ULONG_PTR` on Windows.
#[cfg(windows)]
pub type ScardHandle = usize;

/// Pointer to the [ScardHandle].
pub type LpScardHandle = *mut ScardHandle;

/// Maximum ATR length a card may return.
pub const MAX_ATR_SIZE: usize = 33;

/// Size of the `rgbAtr` array inside [ScardReaderState].
#[cfg(not(windows))]
pub const ATR_BUFFER_SIZE: usize = MAX_ATR_SIZE;
/// Size of the `rgbAtr` array inside [ScardReaderState].
#[cfg(windows)]
pub const ATR_BUFFER_SIZE: usize = 36;

/// [SCARD_IO_REQUEST Struct Reference](https://pcsclite.apdu.fr/api/structSCARD__IO__REQUEST.html)
///
/// Protocol Control Information (PCI).
#[cfg_attr(not(target_os = "macos"), repr(C))]
#[cfg_attr(target_os = "macos", repr(C, packed))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScardIoRequest {
    /// Protocol identifier.
    pub dw_protocol: Dword,
    /// Protocol Control Inf Length.
    pub cb_pci_length: Dword,
}

impl ScardIoRequest {
    /// Creates a PCI header without any protocol specific data.
    pub const fn new(dw_protocol: Dword) -> Self {
        Self {
            dw_protocol,
            cb_pci_length: core::mem::size_of::<Self>() as Dword,
        }
    }
}

/// Pointer to the [ScardIoRequest].
pub type LpScardIoRequest = *mut ScardIoRequest;
/// Pointer to the constant [ScardIoRequest].
pub type LpCScardIoRequest = *const ScardIoRequest;

/// [SCARD_READERSTATE Struct Reference](https://pcsclite.apdu.fr/api/structSCARD__READERSTATE.html)
///
/// The ANSI flavour on Windows (`SCARD_READERSTATEA`).
#[cfg_attr(not(target_os = "macos"), repr(C))]
#[cfg_attr(target_os = "macos", repr(C, packed))]
#[derive(Debug, Copy, Clone)]
pub struct ScardReaderState {
    /// Reader name.
    pub sz_reader: LpCStr,
    /// User defined data.
    pub pv_user_data: LpVoid,
    /// Current state of reader.
    pub dw_current_state: Dword,
    /// Reader state after a state change.
    pub dw_event_state: Dword,
    /// ATR length.
    pub cb_atr: Dword,
    /// ATR value.
    pub rgb_atr: [u8; ATR_BUFFER_SIZE],
}

impl Default for ScardReaderState {
    fn default() -> Self {
        Self {
            sz_reader: core::ptr::null(),
            pv_user_data: core::ptr::null_mut(),
            dw_current_state: 0,
            dw_event_state: 0,
            cb_atr: 0,
            rgb_atr: [0; ATR_BUFFER_SIZE],
        }
    }
}

/// Pointer to the [ScardReaderState].
pub type LpScardReaderState = *mut ScardReaderState;

/// `SCARD_ATRMASK` used by `SCardLocateCardsByATR`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ScardAtrMask {
    /// Number of bytes in the ATR and the mask.
    pub cb_atr: Dword,
    /// ATR of the card with extra alignment bytes.
    pub rgb_atr: [u8; 36],
    /// Mask for the ATR with extra alignment bytes.
    pub rgb_mask: [u8; 36],
}

/// Pointer to the [ScardAtrMask].
pub type LpScardAtrMask = *mut ScardAtrMask;
