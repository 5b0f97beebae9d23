pub mod common;

use std::sync::atomic::Ordering;
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use common::{FakeLibrary, FakeLoader};
use scard_bridge::config::LibraryConfig;
use scard_bridge::ffi::status::{SCARD_E_NO_SERVICE, SCARD_SCOPE_USER, SCARD_S_SUCCESS};
use scard_bridge::resolver::{Operation, ProtocolDescriptor, Resolver};

fn resolver(loader: FakeLoader) -> Resolver {
    Resolver::with_loader(LibraryConfig::with_path("libfake-pcsc.so"), Box::new(loader))
}

#[test]
fn concurrent_initialize_resolves_once() {
    const CALLERS: usize = 8;

    let mut loader = FakeLoader::new(FakeLibrary::pcsc());
    loader.delay = Duration::from_millis(50);
    let opens = loader.opens.clone();
    let resolver = resolver(loader);
    let barrier = Barrier::new(CALLERS);

    let observed: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    let status = resolver.initialize();
                    let table = resolver.table() as *const _ as usize;

                    (status, table)
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(opens.load(Ordering::SeqCst), 1);
    assert!(observed.iter().all(|&(status, _)| status == SCARD_S_SUCCESS));
    assert!(observed.windows(2).all(|pair| pair[0].1 == pair[1].1));
    assert!(resolver.table().is_resolved(Operation::EstablishContext));
}

#[test]
fn missing_library_reports_no_service_and_is_not_retried() {
    let loader = FakeLoader::missing();
    let opens = loader.opens.clone();
    let resolver = resolver(loader);

    assert_eq!(resolver.initialize(), SCARD_E_NO_SERVICE);
    assert_eq!(resolver.initialize(), SCARD_E_NO_SERVICE);
    assert_eq!(opens.load(Ordering::SeqCst), 1);

    let table = resolver.table();
    assert!(Operation::ALL.iter().all(|&operation| !table.is_resolved(operation)));
    assert_eq!(resolver.api().establish_context(SCARD_SCOPE_USER).0, SCARD_E_NO_SERVICE);
}

#[test]
fn missing_symbol_keeps_its_shim() {
    let release_context = Operation::ReleaseContext.symbol().unwrap();
    let resolver = resolver(FakeLoader::new(FakeLibrary::pcsc().without(release_context)));

    assert_eq!(resolver.initialize(), SCARD_S_SUCCESS);

    let table = resolver.table();
    assert!(table.is_resolved(Operation::EstablishContext));
    assert!(!table.is_resolved(Operation::ReleaseContext));
    // Optional entries which the fake does not export.
    assert!(!table.is_resolved(Operation::IsValidContext));
    assert!(!table.is_resolved(Operation::CancelTransaction));

    let api = resolver.api();
    let (status, context) = api.establish_context(SCARD_SCOPE_USER);
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(api.release_context(context), SCARD_E_NO_SERVICE);
}

#[test]
fn table_before_initialize_is_all_shims() {
    let loader = FakeLoader::new(FakeLibrary::pcsc());
    let opens = loader.opens.clone();
    let resolver = resolver(loader);

    assert!(!resolver.is_initialized());
    assert!(!resolver.table().is_resolved(Operation::EstablishContext));
    assert_eq!(resolver.api().establish_context(SCARD_SCOPE_USER).0, SCARD_E_NO_SERVICE);
    assert_eq!(opens.load(Ordering::SeqCst), 0);
}

#[test]
fn resolvers_are_independent() {
    let working = resolver(FakeLoader::new(FakeLibrary::pcsc()));
    let missing = resolver(FakeLoader::missing());

    assert_eq!(working.initialize(), SCARD_S_SUCCESS);
    assert_eq!(missing.initialize(), SCARD_E_NO_SERVICE);
    assert!(working.table().is_resolved(Operation::Transmit));
    assert!(!missing.table().is_resolved(Operation::Transmit));
}

#[test]
fn protocol_descriptors_are_resolved() {
    let resolver = resolver(FakeLoader::new(FakeLibrary::pcsc()));
    resolver.initialize();

    let protocols = resolver.resolution().protocols();
    assert!(protocols.get(ProtocolDescriptor::T0).is_some());
    assert_eq!(
        protocols.get(ProtocolDescriptor::T1).map(|address| address.as_ptr() as usize),
        Some(&common::T1_PCI as *const _ as usize)
    );
}
