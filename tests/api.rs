pub mod common;

use std::sync::atomic::Ordering;

use common::{FakeLibrary, FakeLoader, ATR, ATTRIBUTE, FAKE_CONTEXT, FAKE_HANDLE};
use scard_bridge::config::LibraryConfig;
use scard_bridge::ffi::status::*;
use scard_bridge::flags::ReaderStateFlags;
use scard_bridge::marshal::{
    AppendTo, ByteList, Context, FromValue, Output, ReaderStateList, ScardString, StringList, Value,
};
use scard_bridge::resolver::{ProtocolDescriptor, Resolver};

fn initialized(library: FakeLibrary) -> Resolver {
    let resolver = Resolver::with_loader(
        LibraryConfig::with_path("libfake-pcsc.so"),
        Box::new(FakeLoader::new(library)),
    );
    assert_eq!(resolver.initialize(), SCARD_S_SUCCESS);

    resolver
}

#[test]
fn context_and_readers() {
    let resolver = initialized(FakeLibrary::pcsc());
    let scard = resolver.api();

    let (status, context) = scard.establish_context(SCARD_SCOPE_USER);
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(context, Context(FAKE_CONTEXT));

    let (status, readers) = scard.list_readers(context, &StringList::default()).unwrap();
    assert_eq!(status, SCARD_S_SUCCESS);
    assert!(readers.buffer().is_layer_allocated());

    let mut output = Output::new();
    output.push(status);
    readers.append_to(&mut output);
    assert_eq!(
        output.into_value(),
        Value::List(vec![
            Value::from(SCARD_S_SUCCESS),
            Value::List(vec!["Reader A".into(), "Reader B".into(), "Broken".into()]),
        ])
    );

    assert_eq!(scard.release_context(context), SCARD_S_SUCCESS);
}

#[test]
fn autoallocated_readers_are_released_through_the_service() {
    let resolver = initialized(FakeLibrary::pcsc());
    let scard = resolver.api();

    let (status, readers) = scard.list_readers_autoallocate(Context(FAKE_CONTEXT), &StringList::default());
    assert_eq!(status, SCARD_S_SUCCESS);
    assert!(!readers.buffer().is_layer_allocated());
    assert_eq!(readers.strings(), ["Reader A", "Reader B", "Broken"]);

    let freed = common::FREED.load(Ordering::SeqCst);
    drop(readers);
    assert_eq!(common::FREED.load(Ordering::SeqCst), freed + 1);
}

#[test]
fn transmit_uses_the_exported_descriptor() {
    let resolver = initialized(FakeLibrary::pcsc());
    let scard = resolver.api();

    let reader = ScardString::from_value(&"Reader A".into()).unwrap();
    let (status, handle, protocol) =
        scard.connect(Context(FAKE_CONTEXT), &reader, SCARD_SHARE_SHARED, SCARD_PROTOCOL_T1);
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(handle.0, FAKE_HANDLE);

    let command = ByteList::from_value(&Value::bytes(&[0x00, 0xa4, 0x04, 0x00])).unwrap();
    let (status, response) = scard.transmit(handle, protocol, &command).unwrap();
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(response.to_value(), Value::bytes(&[0x00, 0x04, 0xa4, 0x00, 0x90, 0x00]));
}

#[test]
fn transmit_falls_back_to_a_local_descriptor() {
    let library = FakeLibrary::pcsc().without(ProtocolDescriptor::T1.symbol());
    let resolver = initialized(library);
    assert!(resolver.resolution().protocols().get(ProtocolDescriptor::T1).is_none());

    let command = ByteList::from_slice(&[0x80, 0xca]).unwrap();
    let (status, response) = resolver
        .api()
        .transmit(FAKE_HANDLE.into(), SCARD_PROTOCOL_T1, &command)
        .unwrap();
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(response.as_bytes(), &[0xca, 0x80, 0x90, 0x00]);
}

#[test]
fn transmit_with_an_unsupported_protocol_is_passed_through() {
    let resolver = initialized(FakeLibrary::pcsc());

    let (status, response) = resolver
        .api()
        .transmit(FAKE_HANDLE.into(), SCARD_PROTOCOL_T0, &ByteList::from_slice(&[0x00]).unwrap())
        .unwrap();
    assert_eq!(status, SCARD_E_PROTO_MISMATCH);
    assert!(response.is_empty());
}

#[test]
fn status_change_clamps_out_of_bounds_atr() {
    let resolver = initialized(FakeLibrary::pcsc());
    let value = Value::List(vec![
        Value::Tuple(vec!["Reader A".into(), 0_u8.into()]),
        Value::Tuple(vec!["Broken".into(), 0_u8.into(), Value::bytes(&[0x3b])]),
    ]);
    let mut states = ReaderStateList::from_value(&value).unwrap();

    let status = resolver
        .api()
        .get_status_change(Context(FAKE_CONTEXT), INFINITE, &mut states)
        .unwrap();
    assert_eq!(status, SCARD_S_SUCCESS);

    let states = states.states();
    assert_eq!(states[0].reader, "Reader A");
    assert_eq!(states[0].atr, ATR);
    assert!(states[0].event_state.contains(ReaderStateFlags::PRESENT | ReaderStateFlags::CHANGED));
    assert_eq!(states[1].reader, "Broken");
    assert!(states[1].atr.is_empty());
}

#[test]
fn card_status() {
    let resolver = initialized(FakeLibrary::pcsc());

    let (status, card) = resolver.api().status(FAKE_HANDLE.into()).unwrap();
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(card.readers.strings(), ["Reader A"]);
    assert_eq!(card.protocol, SCARD_PROTOCOL_T1);
    assert_eq!(card.atr.as_bytes(), &ATR);
}

#[test]
fn attributes_and_control() {
    let resolver = initialized(FakeLibrary::pcsc());
    let scard = resolver.api();

    let (status, attribute) = scard.get_attrib(FAKE_HANDLE.into(), 0x0009_0303).unwrap();
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(attribute.as_bytes(), &ATTRIBUTE);

    let (status, echo) = scard
        .control(FAKE_HANDLE.into(), 0x4234_0001, &ByteList::from_slice(&[1, 2, 3, 4]).unwrap())
        .unwrap();
    assert_eq!(status, SCARD_S_SUCCESS);
    assert_eq!(echo.as_bytes(), &[1, 2, 3, 4]);
}

#[test]
fn unresolved_operations_report_no_service() {
    let resolver = initialized(FakeLibrary::pcsc());
    let scard = resolver.api();

    assert_eq!(scard.begin_transaction(FAKE_HANDLE.into()), SCARD_E_NO_SERVICE);
    assert_eq!(scard.set_attrib(FAKE_HANDLE.into(), 1, &ByteList::default()).unwrap(), SCARD_E_NO_SERVICE);
    let (status, groups) = scard.list_reader_groups(Context(FAKE_CONTEXT)).unwrap();
    assert_eq!(status, SCARD_E_NO_SERVICE);
    assert!(groups.strings().is_empty());
}

#[cfg(not(windows))]
#[test]
fn exported_stringify_error_is_used() {
    let resolver = initialized(FakeLibrary::pcsc());

    assert_eq!(resolver.api().stringify_error(SCARD_E_TIMEOUT).as_deref(), Some("fake error"));
}
