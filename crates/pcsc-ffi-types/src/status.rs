//! Raw PC/SC constants.
//!
//! Return codes are defined as `(LONG)0x801000XX` in the C headers. Casting the `u32` literal keeps that
//! bit pattern for every width of [ScardStatus].

use crate::{Dword, ScardStatus};

const fn code(value: u32) -> ScardStatus {
    value as ScardStatus
}

pub const SCARD_S_SUCCESS: ScardStatus = 0;
pub const SCARD_F_INTERNAL_ERROR: ScardStatus = code(0x8010_0001);
pub const SCARD_E_CANCELLED: ScardStatus = code(0x8010_0002);
pub const SCARD_E_INVALID_HANDLE: ScardStatus = code(0x8010_0003);
pub const SCARD_E_INVALID_PARAMETER: ScardStatus = code(0x8010_0004);
pub const SCARD_E_INVALID_TARGET: ScardStatus = code(0x8010_0005);
pub const SCARD_E_NO_MEMORY: ScardStatus = code(0x8010_0006);
pub const SCARD_F_WAITED_TOO_LONG: ScardStatus = code(0x8010_0007);
pub const SCARD_E_INSUFFICIENT_BUFFER: ScardStatus = code(0x8010_0008);
pub const SCARD_E_UNKNOWN_READER: ScardStatus = code(0x8010_0009);
pub const SCARD_E_TIMEOUT: ScardStatus = code(0x8010_000A);
pub const SCARD_E_SHARING_VIOLATION: ScardStatus = code(0x8010_000B);
pub const SCARD_E_NO_SMARTCARD: ScardStatus = code(0x8010_000C);
pub const SCARD_E_UNKNOWN_CARD: ScardStatus = code(0x8010_000D);
pub const SCARD_E_CANT_DISPOSE: ScardStatus = code(0x8010_000E);
pub const SCARD_E_PROTO_MISMATCH: ScardStatus = code(0x8010_000F);
pub const SCARD_E_NOT_READY: ScardStatus = code(0x8010_0010);
pub const SCARD_E_INVALID_VALUE: ScardStatus = code(0x8010_0011);
pub const SCARD_E_SYSTEM_CANCELLED: ScardStatus = code(0x8010_0012);
pub const SCARD_F_COMM_ERROR: ScardStatus = code(0x8010_0013);
pub const SCARD_F_UNKNOWN_ERROR: ScardStatus = code(0x8010_0014);
pub const SCARD_E_INVALID_ATR: ScardStatus = code(0x8010_0015);
pub const SCARD_E_NOT_TRANSACTED: ScardStatus = code(0x8010_0016);
pub const SCARD_E_READER_UNAVAILABLE: ScardStatus = code(0x8010_0017);
pub const SCARD_P_SHUTDOWN: ScardStatus = code(0x8010_0018);
pub const SCARD_E_PCI_TOO_SMALL: ScardStatus = code(0x8010_0019);
pub const SCARD_E_READER_UNSUPPORTED: ScardStatus = code(0x8010_001A);
pub const SCARD_E_DUPLICATE_READER: ScardStatus = code(0x8010_001B);
pub const SCARD_E_CARD_UNSUPPORTED: ScardStatus = code(0x8010_001C);
pub const SCARD_E_NO_SERVICE: ScardStatus = code(0x8010_001D);
pub const SCARD_E_SERVICE_STOPPED: ScardStatus = code(0x8010_001E);
pub const SCARD_E_UNEXPECTED: ScardStatus = code(0x8010_001F);
pub const SCARD_E_ICC_INSTALLATION: ScardStatus = code(0x8010_0020);
pub const SCARD_E_ICC_CREATEORDER: ScardStatus = code(0x8010_0021);
pub const SCARD_E_UNSUPPORTED_FEATURE: ScardStatus = code(0x8010_0022);
pub const SCARD_E_DIR_NOT_FOUND: ScardStatus = code(0x8010_0023);
pub const SCARD_E_FILE_NOT_FOUND: ScardStatus = code(0x8010_0024);
pub const SCARD_E_NO_DIR: ScardStatus = code(0x8010_0025);
pub const SCARD_E_NO_FILE: ScardStatus = code(0x8010_0026);
pub const SCARD_E_NO_ACCESS: ScardStatus = code(0x8010_0027);
pub const SCARD_E_WRITE_TOO_MANY: ScardStatus = code(0x8010_0028);
pub const SCARD_E_BAD_SEEK: ScardStatus = code(0x8010_0029);
pub const SCARD_E_INVALID_CHV: ScardStatus = code(0x8010_002A);
pub const SCARD_E_UNKNOWN_RES_MNG: ScardStatus = code(0x8010_002B);
pub const SCARD_E_NO_SUCH_CERTIFICATE: ScardStatus = code(0x8010_002C);
pub const SCARD_E_CERTIFICATE_UNAVAILABLE: ScardStatus = code(0x8010_002D);
pub const SCARD_E_NO_READERS_AVAILABLE: ScardStatus = code(0x8010_002E);
pub const SCARD_E_COMM_DATA_LOST: ScardStatus = code(0x8010_002F);
pub const SCARD_E_NO_KEY_CONTAINER: ScardStatus = code(0x8010_0030);
pub const SCARD_E_SERVER_TOO_BUSY: ScardStatus = code(0x8010_0031);
pub const SCARD_W_UNSUPPORTED_CARD: ScardStatus = code(0x8010_0065);
pub const SCARD_W_UNRESPONSIVE_CARD: ScardStatus = code(0x8010_0066);
pub const SCARD_W_UNPOWERED_CARD: ScardStatus = code(0x8010_0067);
pub const SCARD_W_RESET_CARD: ScardStatus = code(0x8010_0068);
pub const SCARD_W_REMOVED_CARD: ScardStatus = code(0x8010_0069);
pub const SCARD_W_SECURITY_VIOLATION: ScardStatus = code(0x8010_006A);
pub const SCARD_W_WRONG_CHV: ScardStatus = code(0x8010_006B);
pub const SCARD_W_CHV_BLOCKED: ScardStatus = code(0x8010_006C);
pub const SCARD_W_EOF: ScardStatus = code(0x8010_006D);
pub const SCARD_W_CANCELLED_BY_USER: ScardStatus = code(0x8010_006E);
pub const SCARD_W_CARD_NOT_AUTHENTICATED: ScardStatus = code(0x8010_006F);

pub const SCARD_SCOPE_USER: Dword = 0x0000;
pub const SCARD_SCOPE_TERMINAL: Dword = 0x0001;
pub const SCARD_SCOPE_SYSTEM: Dword = 0x0002;

pub const SCARD_SHARE_EXCLUSIVE: Dword = 0x0001;
pub const SCARD_SHARE_SHARED: Dword = 0x0002;
pub const SCARD_SHARE_DIRECT: Dword = 0x0003;

pub const SCARD_LEAVE_CARD: Dword = 0x0000;
pub const SCARD_RESET_CARD: Dword = 0x0001;
pub const SCARD_UNPOWER_CARD: Dword = 0x0002;
pub const SCARD_EJECT_CARD: Dword = 0x0003;

pub const SCARD_PROTOCOL_UNDEFINED: Dword = 0x0000;
pub const SCARD_PROTOCOL_T0: Dword = 0x0001;
pub const SCARD_PROTOCOL_T1: Dword = 0x0002;
#[cfg(not(windows))]
pub const SCARD_PROTOCOL_RAW: Dword = 0x0004;
#[cfg(windows)]
pub const SCARD_PROTOCOL_RAW: Dword = 0x0001_0000;

pub const SCARD_AUTOALLOCATE: Dword = Dword::MAX;
pub const INFINITE: Dword = 0xFFFF_FFFF;

/// Maximum Tx/Rx buffer for short APDUs.
pub const MAX_BUFFER_SIZE: usize = 264;
/// Maximum Tx/Rx buffer for extended APDUs.
pub const MAX_BUFFER_SIZE_EXTENDED: usize = 4 + 3 + (1 << 16) + 3 + 2;
