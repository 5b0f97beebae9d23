//! The closed catalog of PC/SC entry points and protocol descriptors.

use std::ffi::CStr;

/// Whether a missing export is worth a warning.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Presence {
    /// The entry point is expected in every supported library version.
    Required,
    /// The entry point is missing from some platform or library versions.
    Optional,
}

macro_rules! catalog {
    ($($operation:ident => $symbol:literal,)*) => {
        /// A PC/SC entry point known to the resolver.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum Operation {
            $(
                #[doc = concat!("`", $symbol, "`.")]
                $operation,
            )*
        }

        impl Operation {
            /// Every catalog entry in declaration order.
            pub const ALL: &'static [Operation] = &[$(Operation::$operation,)*];

            /// Base name of the entry point without any platform decoration.
            pub fn name(self) -> &'static str {
                match self {
                    $(Operation::$operation => $symbol,)*
                }
            }
        }
    };
}

catalog! {
    EstablishContext => "SCardEstablishContext",
    ReleaseContext => "SCardReleaseContext",
    IsValidContext => "SCardIsValidContext",
    ListReaders => "SCardListReaders",
    ListReaderGroups => "SCardListReaderGroups",
    Connect => "SCardConnect",
    Reconnect => "SCardReconnect",
    Disconnect => "SCardDisconnect",
    BeginTransaction => "SCardBeginTransaction",
    EndTransaction => "SCardEndTransaction",
    CancelTransaction => "SCardCancelTransaction",
    Status => "SCardStatus",
    GetStatusChange => "SCardGetStatusChange",
    Cancel => "SCardCancel",
    Transmit => "SCardTransmit",
    Control => "SCardControl",
    GetAttrib => "SCardGetAttrib",
    SetAttrib => "SCardSetAttrib",
    FreeMemory => "SCardFreeMemory",
    AccessStartedEvent => "SCardAccessStartedEvent",
    ReleaseStartedEvent => "SCardReleaseStartedEvent",
    AddReaderToGroup => "SCardAddReaderToGroup",
    RemoveReaderFromGroup => "SCardRemoveReaderFromGroup",
    ForgetCardType => "SCardForgetCardType",
    ForgetReader => "SCardForgetReader",
    ForgetReaderGroup => "SCardForgetReaderGroup",
    GetCardTypeProviderName => "SCardGetCardTypeProviderName",
    SetCardTypeProviderName => "SCardSetCardTypeProviderName",
    GetProviderId => "SCardGetProviderId",
    IntroduceCardType => "SCardIntroduceCardType",
    IntroduceReader => "SCardIntroduceReader",
    IntroduceReaderGroup => "SCardIntroduceReaderGroup",
    ListCards => "SCardListCards",
    ListInterfaces => "SCardListInterfaces",
    LocateCards => "SCardLocateCards",
    LocateCardsByAtr => "SCardLocateCardsByATR",
    State => "SCardState",
    StringifyError => "pcsc_stringify_error",
}

impl Operation {
    /// Exported symbol on the current platform, or `None` if the platform never exports it.
    ///
    /// Entries without a symbol keep their default-failure shim without any lookup.
    pub fn symbol(self) -> Option<&'static CStr> {
        use Operation::*;

        cfg_if::cfg_if! {
            if #[cfg(windows)] {
                Some(match self {
                    EstablishContext => c"SCardEstablishContext",
                    ReleaseContext => c"SCardReleaseContext",
                    IsValidContext => c"SCardIsValidContext",
                    ListReaders => c"SCardListReadersA",
                    ListReaderGroups => c"SCardListReaderGroupsA",
                    Connect => c"SCardConnectA",
                    Reconnect => c"SCardReconnect",
                    Disconnect => c"SCardDisconnect",
                    BeginTransaction => c"SCardBeginTransaction",
                    EndTransaction => c"SCardEndTransaction",
                    CancelTransaction => c"SCardCancelTransaction",
                    Status => c"SCardStatusA",
                    GetStatusChange => c"SCardGetStatusChangeA",
                    Cancel => c"SCardCancel",
                    Transmit => c"SCardTransmit",
                    Control => c"SCardControl",
                    GetAttrib => c"SCardGetAttrib",
                    SetAttrib => c"SCardSetAttrib",
                    FreeMemory => c"SCardFreeMemory",
                    AccessStartedEvent => c"SCardAccessStartedEvent",
                    ReleaseStartedEvent => c"SCardReleaseStartedEvent",
                    AddReaderToGroup => c"SCardAddReaderToGroupA",
                    RemoveReaderFromGroup => c"SCardRemoveReaderFromGroupA",
                    ForgetCardType => c"SCardForgetCardTypeA",
                    ForgetReader => c"SCardForgetReaderA",
                    ForgetReaderGroup => c"SCardForgetReaderGroupA",
                    GetCardTypeProviderName => c"SCardGetCardTypeProviderNameA",
                    SetCardTypeProviderName => c"SCardSetCardTypeProviderNameA",
                    GetProviderId => c"SCardGetProviderIdA",
                    IntroduceCardType => c"SCardIntroduceCardTypeA",
                    IntroduceReader => c"SCardIntroduceReaderA",
                    IntroduceReaderGroup => c"SCardIntroduceReaderGroupA",
                    ListCards => c"SCardListCardsA",
                    ListInterfaces => c"SCardListInterfacesA",
                    LocateCards => c"SCardLocateCardsA",
                    LocateCardsByAtr => c"SCardLocateCardsByATRA",
                    State => c"SCardState",
                    StringifyError => return None,
                })
            } else {
                Some(match self {
                    EstablishContext => c"SCardEstablishContext",
                    ReleaseContext => c"SCardReleaseContext",
                    IsValidContext => c"SCardIsValidContext",
                    ListReaders => c"SCardListReaders",
                    ListReaderGroups => c"SCardListReaderGroups",
                    Connect => c"SCardConnect",
                    Reconnect => c"SCardReconnect",
                    Disconnect => c"SCardDisconnect",
                    BeginTransaction => c"SCardBeginTransaction",
                    EndTransaction => c"SCardEndTransaction",
                    CancelTransaction => c"SCardCancelTransaction",
                    Status => c"SCardStatus",
                    GetStatusChange => c"SCardGetStatusChange",
                    Cancel => c"SCardCancel",
                    Transmit => c"SCardTransmit",
                    #[cfg(target_os = "macos")]
                    Control => c"SCardControl132",
                    #[cfg(not(target_os = "macos"))]
                    Control => c"SCardControl",
                    GetAttrib => c"SCardGetAttrib",
                    SetAttrib => c"SCardSetAttrib",
                    FreeMemory => c"SCardFreeMemory",
                    StringifyError => c"pcsc_stringify_error",
                    // The resource manager administration API exists on Windows only.
                    AccessStartedEvent | ReleaseStartedEvent | AddReaderToGroup | RemoveReaderFromGroup
                    | ForgetCardType | ForgetReader | ForgetReaderGroup | GetCardTypeProviderName
                    | SetCardTypeProviderName | GetProviderId | IntroduceCardType | IntroduceReader
                    | IntroduceReaderGroup | ListCards | ListInterfaces | LocateCards | LocateCardsByAtr
                    | State => return None,
                })
            }
        }
    }

    /// Static expectation about the export, used to pick the diagnostic level.
    pub fn presence(self) -> Presence {
        match self {
            Operation::IsValidContext
            | Operation::StringifyError
            | Operation::CancelTransaction
            | Operation::AccessStartedEvent
            | Operation::ReleaseStartedEvent => Presence::Optional,
            _ => Presence::Required,
        }
    }
}

/// Exported protocol control information structures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProtocolDescriptor {
    /// `g_rgSCardT0Pci`.
    T0,
    /// `g_rgSCardT1Pci`.
    T1,
    /// `g_rgSCardRawPci`.
    Raw,
}

impl ProtocolDescriptor {
    /// Every descriptor.
    pub const ALL: [ProtocolDescriptor; 3] = [ProtocolDescriptor::T0, ProtocolDescriptor::T1, ProtocolDescriptor::Raw];

    /// Exported data symbol.
    pub fn symbol(self) -> &'static CStr {
        match self {
            ProtocolDescriptor::T0 => c"g_rgSCardT0Pci",
            ProtocolDescriptor::T1 => c"g_rgSCardT1Pci",
            ProtocolDescriptor::Raw => c"g_rgSCardRawPci",
        }
    }
}
