use std::ffi::c_void;
use std::ptr::NonNull;

use pcsc_ffi_types::functions::*;

use super::catalog::{Operation, Presence};
use super::library::SymbolSource;
use super::shims;

/// A catalog entry: the resolved export, if any, and its default-failure shim.
#[derive(Debug, Copy, Clone)]
pub struct Slot<F: Copy> {
    resolved: Option<F>,
    fallback: F,
}

impl<F: Copy> Slot<F> {
    /// Creates a slot that dispatches to the `fallback`.
    pub const fn unresolved(fallback: F) -> Self {
        Self {
            resolved: None,
            fallback,
        }
    }

    /// Returns a callable function. It is the shim when the export was not found.
    pub fn get(&self) -> F {
        self.resolved.unwrap_or(self.fallback)
    }

    /// Reports whether the slot holds a resolved export.
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    fn bind(&mut self, function: F) {
        self.resolved = Some(function);
    }
}

fn lookup(source: &dyn SymbolSource, operation: Operation) -> Option<NonNull<c_void>> {
    let Some(symbol) = operation.symbol() else {
        debug!(?operation, "Entry point is not exported on this platform");
        return None;
    };

    let address = source.symbol(symbol);
    match (address, operation.presence()) {
        (Some(address), _) => debug!(?symbol, ?address),
        (None, Presence::Required) => warn!(?symbol, "Can not resolve PC/SC entry point. Default-failure shim is used"),
        (None, Presence::Optional) => debug!(?symbol, "Optional PC/SC entry point is absent"),
    }

    address
}

macro_rules! function_table {
    ($($field:ident: $operation:ident => $fn_type:ty = $shim:path,)*) => {
        /// Resolved PC/SC entry points.
        ///
        /// Every field is always callable: unresolved entries dispatch to a shim which returns
        /// `SCARD_E_NO_SERVICE`.
        #[derive(Debug, Copy, Clone)]
        pub struct FunctionTable {
            $(
                #[doc = concat!("[Operation::", stringify!($operation), "].")]
                pub $field: Slot<$fn_type>,
            )*
        }

        impl FunctionTable {
            /// Creates a table where every entry is a default-failure shim.
            pub const fn unresolved() -> Self {
                Self {
                    $($field: Slot::unresolved($shim as $fn_type),)*
                }
            }

            /// Binds every catalog entry exported by the `source`. Missing entries keep their shim.
            pub fn resolve(source: &dyn SymbolSource) -> Self {
                let mut table = Self::unresolved();

                $(
                    if let Some(address) = lookup(source, Operation::$operation) {
                        // SAFETY:
                        // - `*mut c_void` and the target function pointer type have the same layout.
                        // - The symbol name is taken from the catalog entry which this slot belongs to, so the
                        //   exported function has the signature described by `$fn_type`.
                        let function = unsafe { std::mem::transmute::<*mut c_void, $fn_type>(address.as_ptr()) };
                        table.$field.bind(function);
                    }
                )*

                table
            }

            /// Reports whether the `operation` is bound to a resolved export.
            pub fn is_resolved(&self, operation: Operation) -> bool {
                match operation {
                    $(Operation::$operation => self.$field.is_resolved(),)*
                }
            }
        }
    };
}

function_table! {
    establish_context: EstablishContext => SCardEstablishContextFn = shims::establish_context,
    release_context: ReleaseContext => SCardReleaseContextFn = shims::release_context,
    is_valid_context: IsValidContext => SCardIsValidContextFn = shims::is_valid_context,
    list_readers: ListReaders => SCardListReadersFn = shims::list_readers,
    list_reader_groups: ListReaderGroups => SCardListReaderGroupsFn = shims::list_reader_groups,
    connect: Connect => SCardConnectFn = shims::connect,
    reconnect: Reconnect => SCardReconnectFn = shims::reconnect,
    disconnect: Disconnect => SCardDisconnectFn = shims::disconnect,
    begin_transaction: BeginTransaction => SCardBeginTransactionFn = shims::begin_transaction,
    end_transaction: EndTransaction => SCardEndTransactionFn = shims::end_transaction,
    cancel_transaction: CancelTransaction => SCardCancelTransactionFn = shims::cancel_transaction,
    status: Status => SCardStatusFn = shims::status,
    get_status_change: GetStatusChange => SCardGetStatusChangeFn = shims::get_status_change,
    cancel: Cancel => SCardCancelFn = shims::cancel,
    transmit: Transmit => SCardTransmitFn = shims::transmit,
    control: Control => SCardControlFn = shims::control,
    get_attrib: GetAttrib => SCardGetAttribFn = shims::get_attrib,
    set_attrib: SetAttrib => SCardSetAttribFn = shims::set_attrib,
    free_memory: FreeMemory => SCardFreeMemoryFn = shims::free_memory,
    access_started_event: AccessStartedEvent => SCardAccessStartedEventFn = shims::access_started_event,
    release_started_event: ReleaseStartedEvent => SCardReleaseStartedEventFn = shims::release_started_event,
    add_reader_to_group: AddReaderToGroup => SCardAddReaderToGroupFn = shims::add_reader_to_group,
    remove_reader_from_group: RemoveReaderFromGroup => SCardRemoveReaderFromGroupFn = shims::remove_reader_from_group,
    forget_card_type: ForgetCardType => SCardForgetCardTypeFn = shims::forget_card_type,
    forget_reader: ForgetReader => SCardForgetReaderFn = shims::forget_reader,
    forget_reader_group: ForgetReaderGroup => SCardForgetReaderGroupFn = shims::forget_reader_group,
    get_card_type_provider_name: GetCardTypeProviderName =>
        SCardGetCardTypeProviderNameFn = shims::get_card_type_provider_name,
    set_card_type_provider_name: SetCardTypeProviderName =>
        SCardSetCardTypeProviderNameFn = shims::set_card_type_provider_name,
    get_provider_id: GetProviderId => SCardGetProviderIdFn = shims::get_provider_id,
    introduce_card_type: IntroduceCardType => SCardIntroduceCardTypeFn = shims::introduce_card_type,
    introduce_reader: IntroduceReader => SCardIntroduceReaderFn = shims::introduce_reader,
    introduce_reader_group: IntroduceReaderGroup => SCardIntroduceReaderGroupFn = shims::introduce_reader_group,
    list_cards: ListCards => SCardListCardsFn = shims::list_cards,
    list_interfaces: ListInterfaces => SCardListInterfacesFn = shims::list_interfaces,
    locate_cards: LocateCards => SCardLocateCardsFn = shims::locate_cards,
    locate_cards_by_atr: LocateCardsByAtr => SCardLocateCardsByAtrFn = shims::locate_cards_by_atr,
    state: State => SCardStateFn = shims::state,
    stringify_error: StringifyError => PcscStringifyErrorFn = shims::stringify_error,
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::unresolved()
    }
}
