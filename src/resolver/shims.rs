//! Default-failure shims.
//!
//! Every catalog entry has one. They report [SCARD_E_NO_SERVICE] and never touch their arguments.

use std::ffi::c_char;
use std::ptr;

use pcsc_ffi_types::status::SCARD_E_NO_SERVICE;
use pcsc_ffi_types::{
    Dword, Handle, LpByte, LpCByte, LpCGuid, LpCScardIoRequest, LpCStr, LpCVoid, LpDword, LpGuid, LpScardAtrMask,
    LpScardContext, LpScardHandle, LpScardIoRequest, LpScardReaderState, LpStr, LpVoid, ScardContext, ScardHandle,
    ScardStatus,
};

macro_rules! default_failure {
    ($($name:ident($($arg:ty),* $(,)?);)*) => {
        $(
            pub(crate) unsafe extern "system" fn $name($(_: $arg),*) -> ScardStatus {
                SCARD_E_NO_SERVICE
            }
        )*
    };
}

default_failure! {
    establish_context(Dword, LpCVoid, LpCVoid, LpScardContext);
    release_context(ScardContext);
    is_valid_context(ScardContext);
    list_readers(ScardContext, LpCStr, LpStr, LpDword);
    list_reader_groups(ScardContext, LpStr, LpDword);
    connect(ScardContext, LpCStr, Dword, Dword, LpScardHandle, LpDword);
    reconnect(ScardHandle, Dword, Dword, Dword, LpDword);
    disconnect(ScardHandle, Dword);
    begin_transaction(ScardHandle);
    end_transaction(ScardHandle, Dword);
    cancel_transaction(ScardHandle);
    status(ScardHandle, LpStr, LpDword, LpDword, LpDword, LpByte, LpDword);
    get_status_change(ScardContext, Dword, LpScardReaderState, Dword);
    cancel(ScardContext);
    transmit(ScardHandle, LpCScardIoRequest, LpCByte, Dword, LpScardIoRequest, LpByte, LpDword);
    control(ScardHandle, Dword, LpCVoid, Dword, LpVoid, Dword, LpDword);
    get_attrib(ScardHandle, Dword, LpByte, LpDword);
    set_attrib(ScardHandle, Dword, LpCByte, Dword);
    free_memory(ScardContext, LpCVoid);
    add_reader_to_group(ScardContext, LpCStr, LpCStr);
    remove_reader_from_group(ScardContext, LpCStr, LpCStr);
    forget_card_type(ScardContext, LpCStr);
    forget_reader(ScardContext, LpCStr);
    forget_reader_group(ScardContext, LpCStr);
    get_card_type_provider_name(ScardContext, LpCStr, Dword, LpStr, LpDword);
    set_card_type_provider_name(ScardContext, LpCStr, Dword, LpCStr);
    get_provider_id(ScardContext, LpCStr, LpGuid);
    introduce_card_type(ScardContext, LpCStr, LpCGuid, LpCGuid, Dword, LpCByte, LpCByte, Dword);
    introduce_reader(ScardContext, LpCStr, LpCStr);
    introduce_reader_group(ScardContext, LpCStr);
    list_cards(ScardContext, LpCByte, LpCGuid, Dword, LpStr, LpDword);
    list_interfaces(ScardContext, LpCStr, LpGuid, LpDword);
    locate_cards(ScardContext, LpCStr, LpScardReaderState, Dword);
    locate_cards_by_atr(ScardContext, LpScardAtrMask, Dword, LpScardReaderState, Dword);
    state(ScardHandle, LpDword, LpDword, LpByte, LpDword);
}

/// There is no started event without the service.
pub(crate) unsafe extern "system" fn access_started_event() -> Handle {
    ptr::null_mut()
}

pub(crate) unsafe extern "system" fn release_started_event() {}

/// Built-in descriptions. Unknown codes are described by their numeric value.
pub(crate) unsafe extern "C" fn stringify_error(status: ScardStatus) -> *const c_char {
    crate::status::description_ptr(status)
}
