use std::collections::TryReserveError;
use std::ffi::NulError;
use std::fmt;
use std::num::TryFromIntError;

/// The [ScardResult] type.
pub type ScardResult<T> = Result<T, Error>;

/// Kind of a conversion or loading failure.
///
/// Native call failures are not errors of this crate: they are returned verbatim as status codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The managed value has an unexpected shape or type.
    Type,
    /// Text can not be transcoded into the single-byte encoding used by the PC/SC API.
    Encoding,
    /// An integer does not fit into its native representation.
    Overflow,
    /// Native memory could not be allocated.
    NoMemory,
    /// The platform smart card library could not be opened.
    LibraryUnavailable,
}

/// Represents a marshaling or loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Error category.
    pub error_kind: ErrorKind,
    /// Additional error description.
    pub description: String,
}

impl Error {
    /// Creates a new [Error] based on the [error_kind] and [description].
    pub fn new(error_kind: ErrorKind, description: impl Into<String>) -> Self {
        Error {
            error_kind,
            description: description.into(),
        }
    }

    pub(crate) fn type_error(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, description)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error{{ {:?}: {} }}", self.error_kind, self.description)
    }
}

impl std::error::Error for Error {}

impl From<TryReserveError> for Error {
    fn from(value: TryReserveError) -> Self {
        Error::new(
            ErrorKind::NoMemory,
            format!("unable to allocate temporary array: {}", value),
        )
    }
}

impl From<TryFromIntError> for Error {
    fn from(value: TryFromIntError) -> Self {
        Error::new(ErrorKind::Overflow, format!("can not convert integers: {}", value))
    }
}

impl From<NulError> for Error {
    fn from(value: NulError) -> Self {
        Error::new(ErrorKind::Type, value.to_string())
    }
}
