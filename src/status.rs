use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use pcsc_ffi_types::ScardStatus;

/// [Smart Card Return Values](https://learn.microsoft.com/en-us/windows/win32/secauthn/authentication-return-values).
///
/// The numeric values are shared by pcsc-lite and WinSCard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ToPrimitive, FromPrimitive)]
#[repr(u32)]
pub enum ReturnCode {
    /// No error was encountered.
    Success = 0,
    /// An internal consistency check failed.
    InternalError = 0x80100001,
    /// The action was canceled by an SCardCancel request.
    Canceled = 0x80100002,
    /// The supplied handle was not valid.
    InvalidHandle = 0x80100003,
    /// One or more of the supplied parameters could not be properly interpreted.
    InvalidParameter = 0x80100004,
    /// Registry startup information is missing or not valid.
    InvalidTarget = 0x80100005,
    /// Not enough memory available to complete this command.
    NoMemory = 0x80100006,
    /// An internal consistency timer has expired.
    WaitedTooLong = 0x80100007,
    /// The data buffer for returned data is too small for the returned data.
    InsufficientBuffer = 0x80100008,
    /// The specified reader name is not recognized.
    UnknownReader = 0x80100009,
    /// The user-specified time-out value has expired.
    Timeout = 0x8010000A,
    /// The smart card cannot be accessed because of other outstanding connections.
    SharingViolation = 0x8010000B,
    /// The operation requires a smart card, but no smart card is currently in the device.
    NoSmartCard = 0x8010000C,
    /// The specified smart card name is not recognized.
    UnknownCard = 0x8010000D,
    /// The system could not dispose of the media in the requested manner.
    CantDispose = 0x8010000E,
    /// The requested protocols are incompatible with the protocol currently in use with the card.
    ProtoMismatch = 0x8010000F,
    /// The reader or card is not ready to accept commands.
    NotReady = 0x80100010,
    /// One or more of the supplied parameter values could not be properly interpreted.
    InvalidValue = 0x80100011,
    /// The action was canceled by the system, presumably to log off or shut down.
    SystemCanceled = 0x80100012,
    /// An internal communications error has been detected.
    CommError = 0x80100013,
    /// An internal error has been detected, but the source is unknown.
    UnknownError = 0x80100014,
    /// An ATR string obtained from the registry is not a valid ATR string.
    InvalidAtr = 0x80100015,
    /// An attempt was made to end a nonexistent transaction.
    NotTransacted = 0x80100016,
    /// The specified reader is not currently available for use.
    ReaderUnavailable = 0x80100017,
    /// The operation has been aborted to allow the server application to exit.
    Shutdown = 0x80100018,
    /// The PCI receive buffer was too small.
    PciTooSmall = 0x80100019,
    /// The reader driver does not meet minimal requirements for support.
    ReaderUnsupported = 0x8010001A,
    /// The reader driver did not produce a unique reader name.
    DuplicateReader = 0x8010001B,
    /// The smart card does not meet minimal requirements for support.
    CardUnsupported = 0x8010001C,
    /// The smart card resource manager is not running.
    NoService = 0x8010001D,
    /// The smart card resource manager has shut down.
    ServiceStopped = 0x8010001E,
    /// An unexpected card error has occurred.
    Unexpected = 0x8010001F,
    /// No primary provider can be found for the smart card.
    IccInstallation = 0x80100020,
    /// The requested order of object creation is not supported.
    IccCreateOrder = 0x80100021,
    /// This smart card does not support the requested feature.
    UnsupportedFeature = 0x80100022,
    /// The specified directory does not exist in the smart card.
    DirNotFound = 0x80100023,
    /// The specified file does not exist in the smart card.
    FileNotFound = 0x80100024,
    /// The supplied path does not represent a smart card directory.
    NoDir = 0x80100025,
    /// The supplied path does not represent a smart card file.
    NoFile = 0x80100026,
    /// Access is denied to the file.
    NoAccess = 0x80100027,
    /// An attempt was made to write more data than would fit in the target object.
    WriteTooMany = 0x80100028,
    /// An error occurred in setting the smart card file object pointer.
    BadSeek = 0x80100029,
    /// The supplied PIN is incorrect.
    InvalidChv = 0x8010002A,
    /// An unrecognized error code was returned.
    UnknownResMng = 0x8010002B,
    /// The requested certificate does not exist.
    NoSuchCertificate = 0x8010002C,
    /// The requested certificate could not be obtained.
    CertificateUnavailable = 0x8010002D,
    /// No smart card reader is available.
    NoReadersAvailable = 0x8010002E,
    /// A communications error with the smart card has been detected.
    CommDataLost = 0x8010002F,
    /// The requested key container does not exist on the smart card.
    NoKeyContainer = 0x80100030,
    /// The smart card resource manager is too busy to complete this operation.
    ServerTooBusy = 0x80100031,
    /// The reader cannot communicate with the card, due to ATR string configuration conflicts.
    UnsupportedCard = 0x80100065,
    /// The smart card is not responding to a reset.
    UnresponsiveCard = 0x80100066,
    /// Power has been removed from the smart card, so that further communication is not possible.
    UnpoweredCard = 0x80100067,
    /// The smart card was reset.
    ResetCard = 0x80100068,
    /// The smart card has been removed, so further communication is not possible.
    RemovedCard = 0x80100069,
    /// Access was denied because of a security violation.
    SecurityViolation = 0x8010006A,
    /// The card cannot be accessed because the wrong PIN was presented.
    WrongChv = 0x8010006B,
    /// The card cannot be accessed because the maximum number of PIN entry attempts has been reached.
    ChvBlocked = 0x8010006C,
    /// The end of the smart card file has been reached.
    Eof = 0x8010006D,
    /// The action was canceled by the user.
    CanceledByUser = 0x8010006E,
    /// No PIN was presented to the smart card.
    CardNotAuthenticated = 0x8010006F,
}

impl ReturnCode {
    /// Looks up a native status code.
    pub fn from_status(status: ScardStatus) -> Option<Self> {
        // Codes are `(LONG)0x801000XX`: the low 32 bits carry the value on every platform.
        Self::from_u32(status as u32)
    }

    /// Short description in the wording used by pcsc-lite.
    pub fn description(self) -> &'static CStr {
        match self {
            ReturnCode::Success => c"Command successful.",
            ReturnCode::InternalError => c"Internal error.",
            ReturnCode::Canceled => c"Command cancelled.",
            ReturnCode::InvalidHandle => c"Invalid handle.",
            ReturnCode::InvalidParameter => c"Invalid parameter given.",
            ReturnCode::InvalidTarget => c"Invalid target given.",
            ReturnCode::NoMemory => c"Not enough memory.",
            ReturnCode::WaitedTooLong => c"Waited too long.",
            ReturnCode::InsufficientBuffer => c"Insufficient buffer.",
            ReturnCode::UnknownReader => c"Unknown reader specified.",
            ReturnCode::Timeout => c"Command timeout.",
            ReturnCode::SharingViolation => c"Sharing violation.",
            ReturnCode::NoSmartCard => c"No smart card inserted.",
            ReturnCode::UnknownCard => c"Unknown card.",
            ReturnCode::CantDispose => c"Cannot dispose handle.",
            ReturnCode::ProtoMismatch => c"Card protocol mismatch.",
            ReturnCode::NotReady => c"Subsystem not ready.",
            ReturnCode::InvalidValue => c"Invalid value given.",
            ReturnCode::SystemCanceled => c"System cancelled.",
            ReturnCode::CommError => c"RPC transport error.",
            ReturnCode::UnknownError => c"Unknown error.",
            ReturnCode::InvalidAtr => c"Invalid ATR.",
            ReturnCode::NotTransacted => c"Transaction failed.",
            ReturnCode::ReaderUnavailable => c"Reader is unavailable.",
            ReturnCode::Shutdown => c"Operation aborted.",
            ReturnCode::PciTooSmall => c"PCI struct too small.",
            ReturnCode::ReaderUnsupported => c"Reader is unsupported.",
            ReturnCode::DuplicateReader => c"Reader already exists.",
            ReturnCode::CardUnsupported => c"Card is unsupported.",
            ReturnCode::NoService => c"Service not available.",
            ReturnCode::ServiceStopped => c"Service was stopped.",
            ReturnCode::Unexpected => c"Unexpected card error.",
            ReturnCode::IccInstallation => c"No primary provider for the card.",
            ReturnCode::IccCreateOrder => c"Unsupported order of object creation.",
            ReturnCode::UnsupportedFeature => c"Feature not supported.",
            ReturnCode::DirNotFound => c"Directory not found on the card.",
            ReturnCode::FileNotFound => c"File not found on the card.",
            ReturnCode::NoDir => c"Path is not a directory.",
            ReturnCode::NoFile => c"Path is not a file.",
            ReturnCode::NoAccess => c"Access denied.",
            ReturnCode::WriteTooMany => c"Write exceeds the target object.",
            ReturnCode::BadSeek => c"Bad file seek.",
            ReturnCode::InvalidChv => c"Invalid PIN.",
            ReturnCode::UnknownResMng => c"Unknown resource manager error.",
            ReturnCode::NoSuchCertificate => c"No such certificate.",
            ReturnCode::CertificateUnavailable => c"Certificate unavailable.",
            ReturnCode::NoReadersAvailable => c"Cannot find a smart card reader.",
            ReturnCode::CommDataLost => c"Communication data lost.",
            ReturnCode::NoKeyContainer => c"No key container.",
            ReturnCode::ServerTooBusy => c"Server too busy.",
            ReturnCode::UnsupportedCard => c"Card is not supported.",
            ReturnCode::UnresponsiveCard => c"Card is unresponsive.",
            ReturnCode::UnpoweredCard => c"Card is unpowered.",
            ReturnCode::ResetCard => c"Card was reset.",
            ReturnCode::RemovedCard => c"Card was removed.",
            ReturnCode::SecurityViolation => c"Security violation.",
            ReturnCode::WrongChv => c"Wrong PIN.",
            ReturnCode::ChvBlocked => c"PIN blocked.",
            ReturnCode::Eof => c"End of file.",
            ReturnCode::CanceledByUser => c"Cancelled by user.",
            ReturnCode::CardNotAuthenticated => c"Card not authenticated.",
        }
    }
}

/// Human readable text for any status code, known or not.
pub fn describe(status: ScardStatus) -> String {
    match ReturnCode::from_status(status) {
        Some(code) => code.description().to_string_lossy().into_owned(),
        None => format!("Unknown error: {}, 0x{:08x}", status, status as u32),
    }
}

thread_local! {
    static UNKNOWN_DESCRIPTION: RefCell<CString> = RefCell::new(CString::default());
}

/// Description pointer for the stringify fallback.
///
/// Known codes point to static text. Text for unknown codes lives in a per-thread buffer which is valid until the
/// next unknown code is described on the same thread.
pub(crate) fn description_ptr(status: ScardStatus) -> *const c_char {
    if let Some(code) = ReturnCode::from_status(status) {
        return code.description().as_ptr();
    }

    UNKNOWN_DESCRIPTION.with(|buffer| {
        let mut buffer = buffer.borrow_mut();
        *buffer = CString::new(describe(status)).unwrap_or_default();

        buffer.as_ptr()
    })
}

#[cfg(test)]
mod tests {
    use pcsc_ffi_types::status::{SCARD_E_NO_SERVICE, SCARD_S_SUCCESS, SCARD_W_REMOVED_CARD};

    use super::*;

    #[test]
    fn known_codes_are_described() {
        assert_eq!(describe(SCARD_S_SUCCESS), "Command successful.");
        assert_eq!(describe(SCARD_E_NO_SERVICE), "Service not available.");
        assert_eq!(describe(SCARD_W_REMOVED_CARD), "Card was removed.");
    }

    #[test]
    fn unknown_codes_keep_their_value() {
        assert_eq!(describe(0x1234), "Unknown error: 4660, 0x00001234");

        // SAFETY: the per-thread buffer is not overwritten before the text is read.
        let text = unsafe { CStr::from_ptr(description_ptr(0x1234)) };
        assert_eq!(text.to_str().unwrap(), "Unknown error: 4660, 0x00001234");
    }

    #[test]
    fn status_round_trips_through_return_code() {
        assert_eq!(ReturnCode::from_status(SCARD_E_NO_SERVICE), Some(ReturnCode::NoService));
    }
}
