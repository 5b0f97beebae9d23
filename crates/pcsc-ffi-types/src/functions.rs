//! Signatures of the PC/SC entry points.
//!
//! String arguments use the ANSI flavour (`...A` exports on Windows). All functions use the
//! `system` ABI which is `C` everywhere except 32-bit Windows.

use core::ffi::c_char;

use crate::{
    Dword, Handle, LpByte, LpCByte, LpCGuid, LpCScardIoRequest, LpCStr, LpCVoid, LpDword, LpGuid, LpScardAtrMask,
    LpScardContext, LpScardHandle, LpScardIoRequest, LpScardReaderState, LpStr, LpVoid, ScardContext, ScardHandle,
    ScardStatus,
};

/// Creates an Application Context to the PC/SC Resource Manager.
///
/// [SCardEstablishContext](https://pcsclite.apdu.fr/api/group__API.html#gaa1b8970169fd4883a6dc4a8f43f19b67)
pub type SCardEstablishContextFn = unsafe extern "system" fn(
    dw_scope: Dword,
    pv_reserved1: LpCVoid,
    pv_reserved2: LpCVoid,
    ph_context: LpScardContext,
) -> ScardStatus;

/// Destroys a communication context to the PC/SC Resource Manager.
///
/// [SCardReleaseContext](https://pcsclite.apdu.fr/api/group__API.html#ga6aabcba7744c5c9419fdd6404f73a934)
pub type SCardReleaseContextFn = unsafe extern "system" fn(h_context: ScardContext) -> ScardStatus;

/// Checks if a context is still valid.
///
/// [SCardIsValidContext](https://pcsclite.apdu.fr/api/group__API.html#ga722eb66bcc44d391f700ff9065cc080b)
pub type SCardIsValidContextFn = unsafe extern "system" fn(h_context: ScardContext) -> ScardStatus;

/// Returns a list of currently available readers on the system.
///
/// [SCardListReaders](https://pcsclite.apdu.fr/api/group__API.html#ga93b07815789b3cf2629d439ecf20f0d9)
pub type SCardListReadersFn = unsafe extern "system" fn(
    h_context: ScardContext,
    msz_groups: LpCStr,
    msz_readers: LpStr,
    pcch_readers: LpDword,
) -> ScardStatus;

/// Returns a list of currently available reader groups on the system.
///
/// [SCardListReaderGroups](https://pcsclite.apdu.fr/api/group__API.html#ga9d970d086d5218e080d0079d63f9d496)
pub type SCardListReaderGroupsFn =
    unsafe extern "system" fn(h_context: ScardContext, msz_groups: LpStr, pcch_groups: LpDword) -> ScardStatus;

/// Establishes a connection to the reader specified in `sz_reader`.
///
/// [SCardConnect](https://pcsclite.apdu.fr/api/group__API.html#ga4e515829752e0a8dbc4d630696a8d6a5)
pub type SCardConnectFn = unsafe extern "system" fn(
    h_context: ScardContext,
    sz_reader: LpCStr,
    dw_share_mode: Dword,
    dw_preferred_protocols: Dword,
    ph_card: LpScardHandle,
    pdw_active_protocol: LpDword,
) -> ScardStatus;

/// Reestablishes a connection to a reader that was previously connected to using `SCardConnect()`.
///
/// [SCardReconnect](https://pcsclite.apdu.fr/api/group__API.html#gad5d4393ca8c470112ad9468c44ed8940)
pub type SCardReconnectFn = unsafe extern "system" fn(
    h_card: ScardHandle,
    dw_share_mode: Dword,
    dw_preferred_protocols: Dword,
    dw_initialization: Dword,
    pdw_active_protocol: LpDword,
) -> ScardStatus;

/// Terminates a connection made through `SCardConnect()`.
///
/// [SCardDisconnect](https://pcsclite.apdu.fr/api/group__API.html#ga4be198045c73ec0deb79e66c0ca1738a)
pub type SCardDisconnectFn = unsafe extern "system" fn(h_card: ScardHandle, dw_disposition: Dword) -> ScardStatus;

/// Establishes a temporary exclusive access mode for doing a series of commands in a transaction.
///
/// [SCardBeginTransaction](https://pcsclite.apdu.fr/api/group__API.html#gaddb835dce01a0da1d6ca02d33ee7d861)
pub type SCardBeginTransactionFn = unsafe extern "system" fn(h_card: ScardHandle) -> ScardStatus;

/// Ends a previously begun transaction.
///
/// [SCardEndTransaction](https://pcsclite.apdu.fr/api/group__API.html#gae8742473b404363e5c587f570d7e2f3b)
pub type SCardEndTransactionFn = unsafe extern "system" fn(h_card: ScardHandle, dw_disposition: Dword) -> ScardStatus;

/// Terminates a pending transaction. Only exported by some WinSCard versions.
pub type SCardCancelTransactionFn = unsafe extern "system" fn(h_card: ScardHandle) -> ScardStatus;

/// Returns the current status of the reader connected to by `h_card`.
///
/// [SCardStatus](https://pcsclite.apdu.fr/api/group__API.html#gae49c3c894ad7ac12a5b896bde70d0382)
pub type SCardStatusFn = unsafe extern "system" fn(
    h_card: ScardHandle,
    msz_reader_names: LpStr,
    pcch_reader_len: LpDword,
    pdw_state: LpDword,
    pdw_protocol: LpDword,
    pb_atr: LpByte,
    pcb_atr_len: LpDword,
) -> ScardStatus;

/// Blocks execution until the current availability of the cards in a specific set of readers changes.
///
/// [SCardGetStatusChange](https://pcsclite.apdu.fr/api/group__API.html#ga33247d5d1257d59e55647c3bb717db24)
pub type SCardGetStatusChangeFn = unsafe extern "system" fn(
    h_context: ScardContext,
    dw_timeout: Dword,
    rg_reader_states: LpScardReaderState,
    c_readers: Dword,
) -> ScardStatus;

/// Cancels a specific blocking `SCardGetStatusChange()` function.
///
/// [SCardCancel](https://pcsclite.apdu.fr/api/group__API.html#gaacbbc0c6d6c0cbbeb4f4debf6fbeeee6)
pub type SCardCancelFn = unsafe extern "system" fn(h_context: ScardContext) -> ScardStatus;

/// Sends an APDU to the smart card contained in the reader connected to by `SCardConnect()`.
///
/// [SCardTransmit](https://pcsclite.apdu.fr/api/group__API.html#ga9a2d77242a271310269065e64633ab99)
pub type SCardTransmitFn = unsafe extern "system" fn(
    h_card: ScardHandle,
    pio_send_pci: LpCScardIoRequest,
    pb_send_buffer: LpCByte,
    cb_send_length: Dword,
    pio_recv_pci: LpScardIoRequest,
    pb_recv_buffer: LpByte,
    pcb_recv_length: LpDword,
) -> ScardStatus;

/// Sends a command directly to the IFD Handler (reader driver) to be processed by the reader.
///
/// [SCardControl](https://pcsclite.apdu.fr/api/group__API.html#gac3454d4657110fd7f753b2d3d8f4e32f)
pub type SCardControlFn = unsafe extern "system" fn(
    h_card: ScardHandle,
    dw_control_code: Dword,
    pb_send_buffer: LpCVoid,
    cb_send_length: Dword,
    pb_recv_buffer: LpVoid,
    cb_recv_length: Dword,
    lp_bytes_returned: LpDword,
) -> ScardStatus;

/// Get an attribute from the IFD Handler (reader driver).
///
/// [SCardGetAttrib](https://pcsclite.apdu.fr/api/group__API.html#gaacfec51917255b7a25b94c5104961602)
pub type SCardGetAttribFn = unsafe extern "system" fn(
    h_card: ScardHandle,
    dw_attr_id: Dword,
    pb_attr: LpByte,
    pcb_attr_len: LpDword,
) -> ScardStatus;

/// Set an attribute of the IFD Handler.
///
/// [SCardSetAttrib](https://pcsclite.apdu.fr/api/group__API.html#ga060f0038a4ddfd5dd2b8fadf3c3a2e4f)
pub type SCardSetAttribFn = unsafe extern "system" fn(
    h_card: ScardHandle,
    dw_attr_id: Dword,
    pb_attr: LpCByte,
    cb_attr_len: Dword,
) -> ScardStatus;

/// Releases memory that has been returned from the resource manager using the `SCARD_AUTOALLOCATE` length designator.
///
/// [SCardFreeMemory](https://pcsclite.apdu.fr/api/group__API.html#ga0522241e3180cb05dfd166e28930e961)
pub type SCardFreeMemoryFn = unsafe extern "system" fn(h_context: ScardContext, pv_mem: LpCVoid) -> ScardStatus;

/// Returns an event handle signalled when the smart card resource manager starts.
pub type SCardAccessStartedEventFn = unsafe extern "system" fn() -> Handle;

/// Decrements the reference count of the handle returned by `SCardAccessStartedEvent`.
pub type SCardReleaseStartedEventFn = unsafe extern "system" fn();

/// Adds a reader to a reader group.
pub type SCardAddReaderToGroupFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_reader_name: LpCStr, sz_group_name: LpCStr) -> ScardStatus;

/// Removes a reader from an existing reader group.
pub type SCardRemoveReaderFromGroupFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_reader_name: LpCStr, sz_group_name: LpCStr) -> ScardStatus;

/// Removes an introduced smart card from the smart card subsystem.
pub type SCardForgetCardTypeFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_card_name: LpCStr) -> ScardStatus;

/// Removes a previously introduced reader from control by the smart card subsystem.
pub type SCardForgetReaderFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_reader_name: LpCStr) -> ScardStatus;

/// Removes a previously introduced smart card reader group.
pub type SCardForgetReaderGroupFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_group_name: LpCStr) -> ScardStatus;

/// Returns the name of the module that implements the provider for a given card name and provider type.
pub type SCardGetCardTypeProviderNameFn = unsafe extern "system" fn(
    h_context: ScardContext,
    sz_card_name: LpCStr,
    dw_provider_id: Dword,
    sz_provider: LpStr,
    pcch_provider: LpDword,
) -> ScardStatus;

/// Specifies the name of the module that implements the provider for a given card name and provider type.
pub type SCardSetCardTypeProviderNameFn = unsafe extern "system" fn(
    h_context: ScardContext,
    sz_card_name: LpCStr,
    dw_provider_id: Dword,
    sz_provider: LpCStr,
) -> ScardStatus;

/// Returns the identifier of the primary service provider for a given card.
pub type SCardGetProviderIdFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_card: LpCStr, pguid_provider_id: LpGuid) -> ScardStatus;

/// Introduces a smart card to the smart card subsystem.
pub type SCardIntroduceCardTypeFn = unsafe extern "system" fn(
    h_context: ScardContext,
    sz_card_name: LpCStr,
    pguid_primary_provider: LpCGuid,
    rgguid_interfaces: LpCGuid,
    dw_interface_count: Dword,
    pb_atr: LpCByte,
    pb_atr_mask: LpCByte,
    cb_atr_len: Dword,
) -> ScardStatus;

/// Introduces a new name for an existing smart card reader.
pub type SCardIntroduceReaderFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_reader_name: LpCStr, sz_device_name: LpCStr) -> ScardStatus;

/// Introduces a reader group to the smart card subsystem.
pub type SCardIntroduceReaderGroupFn =
    unsafe extern "system" fn(h_context: ScardContext, sz_group_name: LpCStr) -> ScardStatus;

/// Searches the smart card database and provides a list of named cards previously introduced to the system.
pub type SCardListCardsFn = unsafe extern "system" fn(
    h_context: ScardContext,
    pb_atr: LpCByte,
    rgquid_interfaces: LpCGuid,
    cguid_interface_count: Dword,
    msz_cards: LpStr,
    pcch_cards: LpDword,
) -> ScardStatus;

/// Provides a list of interfaces supplied by a given card.
pub type SCardListInterfacesFn = unsafe extern "system" fn(
    h_context: ScardContext,
    sz_card: LpCStr,
    pguid_interfaces: LpGuid,
    pcguid_interfaces: LpDword,
) -> ScardStatus;

/// Searches the readers listed in `rg_reader_states` for a card with an ATR string that matches one of the card names.
pub type SCardLocateCardsFn = unsafe extern "system" fn(
    h_context: ScardContext,
    msz_cards: LpCStr,
    rg_reader_states: LpScardReaderState,
    c_readers: Dword,
) -> ScardStatus;

/// Searches the readers listed in `rg_reader_states` for a card with an ATR matching one of the masks.
pub type SCardLocateCardsByAtrFn = unsafe extern "system" fn(
    h_context: ScardContext,
    rg_atr_masks: LpScardAtrMask,
    c_atrs: Dword,
    rg_reader_states: LpScardReaderState,
    c_readers: Dword,
) -> ScardStatus;

/// Legacy variant of `SCardStatus` without the reader names.
pub type SCardStateFn = unsafe extern "system" fn(
    h_card: ScardHandle,
    pdw_state: LpDword,
    pdw_protocol: LpDword,
    pb_atr: LpByte,
    pcb_atr_len: LpDword,
) -> ScardStatus;

/// Returns a human readable text for the given error code (`pcsc_stringify_error`).
///
/// Not every pcsc-lite release exports it.
pub type PcscStringifyErrorFn = unsafe extern "C" fn(pcsc_error: ScardStatus) -> *const c_char;
