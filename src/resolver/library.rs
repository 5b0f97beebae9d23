//! Opening the platform smart card library.

use std::ffi::{c_void, CStr, CString};
use std::ptr::NonNull;

use crate::{Error, ErrorKind, ScardResult};

/// Exported symbol lookup by exact name.
pub trait SymbolSource: Send + Sync {
    /// Returns the address of the exported `name`, or `None` if it is not exported.
    fn symbol(&self, name: &CStr) -> Option<NonNull<c_void>>;
}

/// Opens a library by path.
pub trait LibraryLoader: Send + Sync {
    /// Opens the library at the exact `path`. No search or fallback is performed.
    fn open(&self, path: &str) -> ScardResult<Box<dyn SymbolSource>>;
}

/// Loads libraries through the OS dynamic loader.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemLoader;

/// A library opened by the [SystemLoader].
///
/// The library is never closed: resolved function pointers must stay valid for the process lifetime.
#[derive(Debug)]
pub struct SystemLibrary {
    handle: NonNull<c_void>,
}

// SAFETY: the handle is an immutable token of the OS loader. Symbol lookup through it is thread-safe.
unsafe impl Send for SystemLibrary {}
// SAFETY: see above.
unsafe impl Sync for SystemLibrary {}

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        use windows_sys::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryA};

        impl LibraryLoader for SystemLoader {
            fn open(&self, path: &str) -> ScardResult<Box<dyn SymbolSource>> {
                let path = CString::new(path)?;

                // SAFETY: `path` is a valid NUL-terminated string.
                let handle = unsafe { LoadLibraryA(path.as_ptr().cast()) };
                debug!(?handle, ?path);

                let handle = NonNull::new(handle).ok_or_else(|| {
                    Error::new(
                        ErrorKind::LibraryUnavailable,
                        format!("Can not load smart card library: {}", path.to_string_lossy()),
                    )
                })?;

                Ok(Box::new(SystemLibrary { handle }))
            }
        }

        impl SymbolSource for SystemLibrary {
            fn symbol(&self, name: &CStr) -> Option<NonNull<c_void>> {
                // SAFETY: the module handle is valid and `name` is a valid NUL-terminated string.
                let address = unsafe { GetProcAddress(self.handle.as_ptr(), name.as_ptr().cast()) };

                address.and_then(|function| NonNull::new(function as *mut c_void))
            }
        }
    } else {
        use libc::{dlopen, dlsym, RTLD_LAZY, RTLD_LOCAL};

        impl LibraryLoader for SystemLoader {
            fn open(&self, path: &str) -> ScardResult<Box<dyn SymbolSource>> {
                let path = CString::new(path)?;

                // SAFETY: FFI call with no outstanding preconditions.
                let handle = unsafe { dlopen(path.as_ptr(), RTLD_LOCAL | RTLD_LAZY) };
                debug!(?handle, ?path);

                let handle = NonNull::new(handle).ok_or_else(|| {
                    Error::new(
                        ErrorKind::LibraryUnavailable,
                        format!("Can not load smart card library: {}", path.to_string_lossy()),
                    )
                })?;

                Ok(Box::new(SystemLibrary { handle }))
            }
        }

        impl SymbolSource for SystemLibrary {
            fn symbol(&self, name: &CStr) -> Option<NonNull<c_void>> {
                // SAFETY:
                // - The `handle` was returned by a successful `dlopen` and is never closed.
                // - `name` is a valid NUL-terminated string.
                NonNull::new(unsafe { dlsym(self.handle.as_ptr(), name.as_ptr()) })
            }
        }
    }
}
