#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

pub mod api;
/// Smart card library location.
pub mod config;
mod error;
/// Bit flags used by the PC/SC API.
pub mod flags;
/// Optional file logging.
pub mod logging;
pub mod marshal;
pub mod resolver;
/// Return codes and their descriptions.
pub mod status;

pub use api::Scard;
pub use error::{Error, ErrorKind, ScardResult};
pub use pcsc_ffi_types as ffi;
pub use resolver::{FunctionTable, Operation, Resolution, Resolver};
