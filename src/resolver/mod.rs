//! Dynamic Symbol Resolver.
//!
//! The platform smart card library is opened once, on the first [Resolver::initialize] call, and every
//! catalog entry is bound to its export or to a default-failure shim.

mod catalog;
mod library;
mod shims;
mod table;

use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;
use std::sync::OnceLock;

use pcsc_ffi_types::status::{SCARD_E_NO_SERVICE, SCARD_S_SUCCESS};
use pcsc_ffi_types::{LpCScardIoRequest, ScardIoRequest, ScardStatus};

pub use self::catalog::{Operation, Presence, ProtocolDescriptor};
pub use self::library::{LibraryLoader, SymbolSource, SystemLibrary, SystemLoader};
pub use self::table::{FunctionTable, Slot};
use crate::api::Scard;
use crate::config::LibraryConfig;
use crate::flags::Protocol;

static UNRESOLVED: FunctionTable = FunctionTable::unresolved();

/// Addresses of the exported protocol control information structures.
///
/// They are opaque tokens: this crate passes them to `SCardTransmit` and never reads them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ProtocolDescriptors {
    t0: Option<NonNull<c_void>>,
    t1: Option<NonNull<c_void>>,
    raw: Option<NonNull<c_void>>,
}

// SAFETY: the addresses point to immutable data exported by a library which is never unloaded.
unsafe impl Send for ProtocolDescriptors {}
// SAFETY: see above.
unsafe impl Sync for ProtocolDescriptors {}

impl ProtocolDescriptors {
    /// Looks up every descriptor in the `source`.
    pub fn resolve(source: &dyn SymbolSource) -> Self {
        let lookup = |descriptor: ProtocolDescriptor| {
            let address = source.symbol(descriptor.symbol());
            debug!(?descriptor, ?address);
            address
        };

        Self {
            t0: lookup(ProtocolDescriptor::T0),
            t1: lookup(ProtocolDescriptor::T1),
            raw: lookup(ProtocolDescriptor::Raw),
        }
    }

    /// Address of the `descriptor`, if the library exports it.
    pub fn get(&self, descriptor: ProtocolDescriptor) -> Option<NonNull<c_void>> {
        match descriptor {
            ProtocolDescriptor::T0 => self.t0,
            ProtocolDescriptor::T1 => self.t1,
            ProtocolDescriptor::Raw => self.raw,
        }
    }

    /// Exported descriptor matching the `protocol`.
    ///
    /// Returns `None` for unknown or combined protocols and when the library does not export it.
    pub fn for_protocol(&self, protocol: Protocol) -> Option<LpCScardIoRequest> {
        let descriptor = if protocol == Protocol::T0 {
            ProtocolDescriptor::T0
        } else if protocol == Protocol::T1 {
            ProtocolDescriptor::T1
        } else if protocol == Protocol::RAW {
            ProtocolDescriptor::Raw
        } else {
            return None;
        };

        self.get(descriptor)
            .map(|address| address.as_ptr() as LpCScardIoRequest)
    }

    /// A locally built header with the same meaning as the exported descriptor.
    pub fn local(protocol: Protocol) -> ScardIoRequest {
        ScardIoRequest::new(protocol.bits())
    }
}

/// Outcome of the one resolution attempt.
pub struct Resolution {
    status: ScardStatus,
    table: FunctionTable,
    protocols: ProtocolDescriptors,
    // Keeps the library handle alive for the resolver lifetime.
    _library: Option<Box<dyn SymbolSource>>,
}

impl Resolution {
    fn resolve(config: &LibraryConfig, loader: &dyn LibraryLoader) -> Self {
        let library = match loader.open(config.path()) {
            Ok(library) => library,
            Err(err) => {
                warn!(%err, "Smart card service is unavailable");

                return Self {
                    status: SCARD_E_NO_SERVICE,
                    table: FunctionTable::unresolved(),
                    protocols: ProtocolDescriptors::default(),
                    _library: None,
                };
            }
        };

        let table = FunctionTable::resolve(library.as_ref());
        let protocols = ProtocolDescriptors::resolve(library.as_ref());

        Self {
            status: SCARD_S_SUCCESS,
            table,
            protocols,
            _library: Some(library),
        }
    }

    /// `SCARD_S_SUCCESS` if the library was opened, `SCARD_E_NO_SERVICE` otherwise.
    pub fn status(&self) -> ScardStatus {
        self.status
    }

    /// Resolved entry points.
    pub fn table(&self) -> &FunctionTable {
        &self.table
    }

    /// Exported protocol descriptors.
    pub fn protocols(&self) -> &ProtocolDescriptors {
        &self.protocols
    }

    /// Typed call surface over the resolved entry points.
    pub fn api(&self) -> Scard<'_> {
        Scard::new(&self.table, self.protocols)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("status", &self.status)
            .field("table", &self.table)
            .field("protocols", &self.protocols)
            .finish_non_exhaustive()
    }
}

/// Owns one resolution attempt of the platform smart card library.
pub struct Resolver {
    config: LibraryConfig,
    loader: Box<dyn LibraryLoader>,
    state: OnceLock<Resolution>,
}

impl Resolver {
    /// Creates a resolver using the OS dynamic loader.
    pub fn new(config: LibraryConfig) -> Self {
        Self::with_loader(config, Box::new(SystemLoader))
    }

    /// Creates a resolver with a custom library loader.
    pub fn with_loader(config: LibraryConfig, loader: Box<dyn LibraryLoader>) -> Self {
        Self {
            config,
            loader,
            state: OnceLock::new(),
        }
    }

    /// Opens the library and binds every catalog entry.
    ///
    /// Only the first call does the work. Concurrent callers block until it completes and all of them get the
    /// same status. A failed attempt is not retried.
    pub fn initialize(&self) -> ScardStatus {
        self.resolution().status()
    }

    /// Returns the resolution, performing it if needed.
    pub fn resolution(&self) -> &Resolution {
        self.state.get_or_init(|| {
            debug!(path = self.config.path(), "Resolving PC/SC entry points");
            Resolution::resolve(&self.config, self.loader.as_ref())
        })
    }

    /// Reports whether [Resolver::initialize] has completed.
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// Current entry points. Before initialization every entry is a default-failure shim.
    pub fn table(&self) -> &FunctionTable {
        self.state.get().map_or(&UNRESOLVED, Resolution::table)
    }

    /// Typed call surface over the current entry points. It does not trigger initialization.
    pub fn api(&self) -> Scard<'_> {
        match self.state.get() {
            Some(resolution) => resolution.api(),
            None => Scard::new(&UNRESOLVED, ProtocolDescriptors::default()),
        }
    }

    /// The library location.
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

/// Process-wide resolver configured from the environment.
pub fn global() -> &'static Resolver {
    static GLOBAL: OnceLock<Resolver> = OnceLock::new();

    GLOBAL.get_or_init(|| Resolver::new(LibraryConfig::from_env()))
}

/// Initializes the process-wide resolver. Safe to call from any thread, any number of times.
pub fn initialize() -> ScardStatus {
    crate::logging::setup_logger();

    global().initialize()
}
