use std::ptr;

use scard_bridge::config::LibraryConfig;
use scard_bridge::ffi::status::SCARD_E_NO_SERVICE;
use scard_bridge::resolver::{Operation, Resolver};
use scard_bridge::FunctionTable;

/// Invokes every status-returning entry point with null arguments.
fn statuses(table: &FunctionTable) -> Vec<(Operation, i64)> {
    // SAFETY: every entry is a default-failure shim which never touches its arguments.
    let statuses = unsafe {
        [
            (
                Operation::EstablishContext,
                (table.establish_context.get())(0, ptr::null(), ptr::null(), ptr::null_mut()),
            ),
            (Operation::ReleaseContext, (table.release_context.get())(0)),
            (Operation::IsValidContext, (table.is_valid_context.get())(0)),
            (Operation::ListReaders, (table.list_readers.get())(0, ptr::null(), ptr::null_mut(), ptr::null_mut())),
            (Operation::ListReaderGroups, (table.list_reader_groups.get())(0, ptr::null_mut(), ptr::null_mut())),
            (Operation::Connect, (table.connect.get())(0, ptr::null(), 0, 0, ptr::null_mut(), ptr::null_mut())),
            (Operation::Reconnect, (table.reconnect.get())(0, 0, 0, 0, ptr::null_mut())),
            (Operation::Disconnect, (table.disconnect.get())(0, 0)),
            (Operation::BeginTransaction, (table.begin_transaction.get())(0)),
            (Operation::EndTransaction, (table.end_transaction.get())(0, 0)),
            (Operation::CancelTransaction, (table.cancel_transaction.get())(0)),
            (
                Operation::Status,
                (table.status.get())(
                    0,
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                ),
            ),
            (Operation::GetStatusChange, (table.get_status_change.get())(0, 0, ptr::null_mut(), 0)),
            (Operation::Cancel, (table.cancel.get())(0)),
            (
                Operation::Transmit,
                (table.transmit.get())(
                    0,
                    ptr::null(),
                    ptr::null(),
                    0,
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                ),
            ),
            (Operation::Control, (table.control.get())(0, 0, ptr::null(), 0, ptr::null_mut(), 0, ptr::null_mut())),
            (Operation::GetAttrib, (table.get_attrib.get())(0, 0, ptr::null_mut(), ptr::null_mut())),
            (Operation::SetAttrib, (table.set_attrib.get())(0, 0, ptr::null(), 0)),
            (Operation::FreeMemory, (table.free_memory.get())(0, ptr::null())),
            (Operation::AddReaderToGroup, (table.add_reader_to_group.get())(0, ptr::null(), ptr::null())),
            (Operation::RemoveReaderFromGroup, (table.remove_reader_from_group.get())(0, ptr::null(), ptr::null())),
            (Operation::ForgetCardType, (table.forget_card_type.get())(0, ptr::null())),
            (Operation::ForgetReader, (table.forget_reader.get())(0, ptr::null())),
            (Operation::ForgetReaderGroup, (table.forget_reader_group.get())(0, ptr::null())),
            (
                Operation::GetCardTypeProviderName,
                (table.get_card_type_provider_name.get())(0, ptr::null(), 0, ptr::null_mut(), ptr::null_mut()),
            ),
            (
                Operation::SetCardTypeProviderName,
                (table.set_card_type_provider_name.get())(0, ptr::null(), 0, ptr::null()),
            ),
            (Operation::GetProviderId, (table.get_provider_id.get())(0, ptr::null(), ptr::null_mut())),
            (
                Operation::IntroduceCardType,
                (table.introduce_card_type.get())(
                    0,
                    ptr::null(),
                    ptr::null(),
                    ptr::null(),
                    0,
                    ptr::null(),
                    ptr::null(),
                    0,
                ),
            ),
            (Operation::IntroduceReader, (table.introduce_reader.get())(0, ptr::null(), ptr::null())),
            (Operation::IntroduceReaderGroup, (table.introduce_reader_group.get())(0, ptr::null())),
            (
                Operation::ListCards,
                (table.list_cards.get())(0, ptr::null(), ptr::null(), 0, ptr::null_mut(), ptr::null_mut()),
            ),
            (
                Operation::ListInterfaces,
                (table.list_interfaces.get())(0, ptr::null(), ptr::null_mut(), ptr::null_mut()),
            ),
            (Operation::LocateCards, (table.locate_cards.get())(0, ptr::null(), ptr::null_mut(), 0)),
            (Operation::LocateCardsByAtr, (table.locate_cards_by_atr.get())(0, ptr::null_mut(), 0, ptr::null_mut(), 0)),
            (
                Operation::State,
                (table.state.get())(0, ptr::null_mut(), ptr::null_mut(), ptr::null_mut(), ptr::null_mut()),
            ),
        ]
    };

    statuses
        .into_iter()
        .map(|(operation, status)| (operation, i64::from(status)))
        .collect()
}

fn assert_default_failure(table: &FunctionTable) {
    let statuses = statuses(table);

    // Three entries do not return a status: access/release started event and stringify error.
    assert_eq!(statuses.len(), Operation::ALL.len() - 3);
    for (operation, status) in statuses {
        assert_eq!(status, i64::from(SCARD_E_NO_SERVICE), "{operation:?}");
    }

    // SAFETY: shims do not take arguments or return static data.
    unsafe {
        assert!((table.access_started_event.get())().is_null());
        (table.release_started_event.get())();
        assert!(!(table.stringify_error.get())(SCARD_E_NO_SERVICE).is_null());
    }
}

#[test]
fn unresolved_table_reports_no_service_everywhere() {
    assert_default_failure(&FunctionTable::unresolved());
}

#[test]
fn failed_resolution_reports_no_service_everywhere() {
    let resolver = Resolver::new(LibraryConfig::with_path("/nonexistent/scard-bridge/libpcsclite.so.1"));

    assert_eq!(resolver.initialize(), SCARD_E_NO_SERVICE);
    assert_default_failure(resolver.table());
}
