use core::ffi::{c_char, c_void};

pub type LpStr = *mut c_char;
pub type LpCStr = *const c_char;
pub type LpCByte = *const u8;
pub type LpByte = *mut u8;
pub type LpCVoid = *const c_void;
pub type LpVoid = *mut c_void;
pub type Handle = *mut c_void;

/// Windows `GUID` structure.
///
/// The layout is the same on every platform, so a GUID list is a flat array of 16-byte records.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

pub type LpCGuid = *const Guid;
pub type LpGuid = *mut Guid;
