//! Typed call surface.
//!
//! Every method forwards to the bound entry point with marshaled arguments. Native status codes are returned as is.

use std::ffi::{c_char, c_void};
use std::ptr;

use pcsc_ffi_types::status::{MAX_BUFFER_SIZE_EXTENDED, SCARD_AUTOALLOCATE, SCARD_S_SUCCESS};
use pcsc_ffi_types::{
    Dword, Guid, LpCScardIoRequest, LpDword, LpStr, ScardAtrMask, ScardHandle, ScardStatus, ATR_BUFFER_SIZE,
    MAX_ATR_SIZE,
};

use crate::flags::Protocol;
use crate::marshal::{
    ByteList, Context, ErrorString, GuidList, Handle, NativeBuffer, ReaderStateList, ScardString, StringList,
};
use crate::resolver::{FunctionTable, ProtocolDescriptors};
use crate::{Error, ErrorKind, ScardResult};

/// Result of `SCardStatus`.
#[derive(Debug, Default)]
pub struct CardStatus {
    /// Names the reader is known by.
    pub readers: StringList,
    /// Card state: a bit mask on pcsc-lite, an ordinal on Windows.
    pub state: Dword,
    /// Active protocol.
    pub protocol: Dword,
    /// Card ATR.
    pub atr: ByteList,
}

/// Result of `SCardState`.
#[derive(Debug, Default)]
pub struct CardState {
    /// Card state ordinal.
    pub state: Dword,
    /// Active protocol.
    pub protocol: Dword,
    /// Card ATR.
    pub atr: ByteList,
}

/// Calls `call` with a null buffer to learn the required length, then with a buffer of that length.
fn query_then_fetch<T: Copy + Default>(
    mut call: impl FnMut(*mut T, LpDword) -> ScardStatus,
) -> ScardResult<(ScardStatus, NativeBuffer<T>)> {
    let mut len: Dword = 0;
    let status = call(ptr::null_mut(), &mut len as LpDword);
    if status != SCARD_S_SUCCESS || len == 0 {
        return Ok((status, NativeBuffer::new()));
    }

    let mut buffer = NativeBuffer::with_capacity(usize::try_from(len)?)?;
    let mut len = buffer.native_len()?;
    let status = call(buffer.as_mut_ptr(), &mut len as LpDword);
    buffer.set_len(if status == SCARD_S_SUCCESS { len as usize } else { 0 });

    Ok((status, buffer))
}

/// PC/SC operations over a [FunctionTable].
#[derive(Debug, Copy, Clone)]
pub struct Scard<'r> {
    table: &'r FunctionTable,
    protocols: ProtocolDescriptors,
}

// SAFETY (applies to every native call below):
// - Entry points in the table are either shims or exports whose signature matches the catalog entry.
// - Pointer arguments come from live locals or marshaled values borrowed for the duration of the call and are
//   null only where the API allows it.
// - Buffer lengths passed along with pointers never exceed the allocated capacity.
impl<'r> Scard<'r> {
    /// Creates the call surface.
    pub fn new(table: &'r FunctionTable, protocols: ProtocolDescriptors) -> Self {
        Self { table, protocols }
    }

    /// The table calls are dispatched through.
    pub fn table(&self) -> &'r FunctionTable {
        self.table
    }

    /// `SCardEstablishContext`.
    pub fn establish_context(&self, scope: Dword) -> (ScardStatus, Context) {
        let mut context = Default::default();
        // SAFETY: see the impl block.
        let status = unsafe { (self.table.establish_context.get())(scope, ptr::null(), ptr::null(), &mut context) };

        (status, Context(context))
    }

    /// `SCardReleaseContext`.
    pub fn release_context(&self, context: Context) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.release_context.get())(context.0) }
    }

    /// `SCardIsValidContext`.
    pub fn is_valid_context(&self, context: Context) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.is_valid_context.get())(context.0) }
    }

    /// `SCardListReaders`. An empty `groups` list means all readers.
    pub fn list_readers(&self, context: Context, groups: &StringList) -> ScardResult<(ScardStatus, StringList)> {
        let list_readers = self.table.list_readers.get();
        let (status, buffer) = query_then_fetch(|readers: LpStr, len| {
            // SAFETY: see the impl block.
            unsafe { list_readers(context.0, groups.as_ptr(), readers, len) }
        })?;

        Ok((status, StringList::from_buffer(buffer)))
    }

    /// `SCardListReaders` with `SCARD_AUTOALLOCATE`. The service memory is released when the list is dropped.
    pub fn list_readers_autoallocate(&self, context: Context, groups: &StringList) -> (ScardStatus, StringList) {
        let mut readers: LpStr = ptr::null_mut();
        let mut len = SCARD_AUTOALLOCATE;

        // SAFETY: see the impl block. With `SCARD_AUTOALLOCATE` the buffer argument receives a pointer.
        let status = unsafe {
            (self.table.list_readers.get())(
                context.0,
                groups.as_ptr(),
                (&mut readers as *mut LpStr).cast::<c_char>(),
                &mut len,
            )
        };
        if status != SCARD_S_SUCCESS {
            return (status, StringList::default());
        }

        // SAFETY: on success the service returned `len` characters allocated for the `context`.
        let buffer =
            unsafe { NativeBuffer::from_service(readers, len as usize, context.0, self.table.free_memory.get()) };

        (status, StringList::from_buffer(buffer))
    }

    /// `SCardListReaderGroups`.
    pub fn list_reader_groups(&self, context: Context) -> ScardResult<(ScardStatus, StringList)> {
        let list_reader_groups = self.table.list_reader_groups.get();
        let (status, buffer) = query_then_fetch(|groups: LpStr, len| {
            // SAFETY: see the impl block.
            unsafe { list_reader_groups(context.0, groups, len) }
        })?;

        Ok((status, StringList::from_buffer(buffer)))
    }

    /// `SCardConnect`. Returns the card handle and the active protocol.
    pub fn connect(
        &self,
        context: Context,
        reader: &ScardString,
        share_mode: Dword,
        preferred_protocols: Dword,
    ) -> (ScardStatus, Handle, Dword) {
        let mut handle: ScardHandle = Default::default();
        let mut active_protocol = 0;

        // SAFETY: see the impl block.
        let status = unsafe {
            (self.table.connect.get())(
                context.0,
                reader.as_ptr(),
                share_mode,
                preferred_protocols,
                &mut handle,
                &mut active_protocol,
            )
        };

        (status, Handle(handle), active_protocol)
    }

    /// `SCardReconnect`. Returns the active protocol.
    pub fn reconnect(
        &self,
        handle: Handle,
        share_mode: Dword,
        preferred_protocols: Dword,
        initialization: Dword,
    ) -> (ScardStatus, Dword) {
        let mut active_protocol = 0;

        // SAFETY: see the impl block.
        let status = unsafe {
            (self.table.reconnect.get())(
                handle.0,
                share_mode,
                preferred_protocols,
                initialization,
                &mut active_protocol,
            )
        };

        (status, active_protocol)
    }

    /// `SCardDisconnect`.
    pub fn disconnect(&self, handle: Handle, disposition: Dword) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.disconnect.get())(handle.0, disposition) }
    }

    /// `SCardBeginTransaction`.
    pub fn begin_transaction(&self, handle: Handle) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.begin_transaction.get())(handle.0) }
    }

    /// `SCardEndTransaction`.
    pub fn end_transaction(&self, handle: Handle, disposition: Dword) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.end_transaction.get())(handle.0, disposition) }
    }

    /// `SCardCancelTransaction`.
    pub fn cancel_transaction(&self, handle: Handle) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.cancel_transaction.get())(handle.0) }
    }

    /// `SCardStatus`.
    pub fn status(&self, handle: Handle) -> ScardResult<(ScardStatus, CardStatus)> {
        let status_fn = self.table.status.get();
        let mut card = CardStatus::default();

        let mut atr = NativeBuffer::<u8>::with_capacity(ATR_BUFFER_SIZE)?;
        let mut atr_len = atr.native_len()?;
        let mut readers_len: Dword = 0;

        // SAFETY: see the impl block.
        let status = unsafe {
            status_fn(
                handle.0,
                ptr::null_mut(),
                &mut readers_len,
                &mut card.state,
                &mut card.protocol,
                atr.as_mut_ptr(),
                &mut atr_len,
            )
        };
        if status != SCARD_S_SUCCESS {
            return Ok((status, card));
        }

        let mut readers = NativeBuffer::<c_char>::with_capacity(usize::try_from(readers_len)?)?;
        let mut readers_len = readers.native_len()?;
        let mut atr_len = atr.native_len()?;

        // SAFETY: see the impl block.
        let status = unsafe {
            status_fn(
                handle.0,
                readers.as_mut_ptr(),
                &mut readers_len,
                &mut card.state,
                &mut card.protocol,
                atr.as_mut_ptr(),
                &mut atr_len,
            )
        };
        if status != SCARD_S_SUCCESS {
            return Ok((status, card));
        }

        readers.set_len(readers_len as usize);
        atr.set_len((atr_len as usize).min(MAX_ATR_SIZE));
        card.readers = StringList::from_buffer(readers);
        card.atr = ByteList::from_buffer(atr);

        Ok((status, card))
    }

    /// `SCardGetStatusChange`. Event states and ATRs are written back into the `states`.
    pub fn get_status_change(
        &self,
        context: Context,
        timeout: Dword,
        states: &mut ReaderStateList,
    ) -> ScardResult<ScardStatus> {
        let count = states.native_len()?;

        // SAFETY: see the impl block. `states` owns `count` records and their reader names.
        Ok(unsafe { (self.table.get_status_change.get())(context.0, timeout, states.as_mut_ptr(), count) })
    }

    /// `SCardCancel`.
    pub fn cancel(&self, context: Context) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.cancel.get())(context.0) }
    }

    /// `SCardTransmit`.
    ///
    /// The protocol control information is the library's exported descriptor for the `protocol`, or an equivalent
    /// local header when the library does not export it.
    pub fn transmit(&self, handle: Handle, protocol: Dword, send: &ByteList) -> ScardResult<(ScardStatus, ByteList)> {
        let local = ProtocolDescriptors::local(Protocol::from_bits_retain(protocol));
        let send_pci = self
            .protocols
            .for_protocol(Protocol::from_bits_retain(protocol))
            .unwrap_or(&local as LpCScardIoRequest);

        let mut recv = NativeBuffer::<u8>::with_capacity(MAX_BUFFER_SIZE_EXTENDED)?;
        let mut recv_len = recv.native_len()?;

        // SAFETY: see the impl block. `local` outlives the call.
        let status = unsafe {
            (self.table.transmit.get())(
                handle.0,
                send_pci,
                send.buffer().as_ptr(),
                send.buffer().native_len()?,
                ptr::null_mut(),
                recv.as_mut_ptr(),
                &mut recv_len,
            )
        };
        recv.set_len(if status == SCARD_S_SUCCESS { recv_len as usize } else { 0 });

        Ok((status, ByteList::from_buffer(recv)))
    }

    /// `SCardControl`.
    pub fn control(
        &self,
        handle: Handle,
        control_code: Dword,
        send: &ByteList,
    ) -> ScardResult<(ScardStatus, ByteList)> {
        let mut recv = NativeBuffer::<u8>::with_capacity(MAX_BUFFER_SIZE_EXTENDED)?;
        let recv_capacity = recv.native_len()?;
        let mut returned: Dword = 0;

        // SAFETY: see the impl block.
        let status = unsafe {
            (self.table.control.get())(
                handle.0,
                control_code,
                send.buffer().as_ptr().cast::<c_void>(),
                send.buffer().native_len()?,
                recv.as_mut_ptr().cast::<c_void>(),
                recv_capacity,
                &mut returned,
            )
        };
        recv.set_len(if status == SCARD_S_SUCCESS { returned as usize } else { 0 });

        Ok((status, ByteList::from_buffer(recv)))
    }

    /// `SCardGetAttrib`.
    pub fn get_attrib(&self, handle: Handle, attr_id: Dword) -> ScardResult<(ScardStatus, ByteList)> {
        let get_attrib = self.table.get_attrib.get();
        let (status, buffer) = query_then_fetch(|attr: *mut u8, len| {
            // SAFETY: see the impl block.
            unsafe { get_attrib(handle.0, attr_id, attr, len) }
        })?;

        Ok((status, ByteList::from_buffer(buffer)))
    }

    /// `SCardSetAttrib`.
    pub fn set_attrib(&self, handle: Handle, attr_id: Dword, attr: &ByteList) -> ScardResult<ScardStatus> {
        // SAFETY: see the impl block.
        Ok(unsafe {
            (self.table.set_attrib.get())(handle.0, attr_id, attr.buffer().as_ptr(), attr.buffer().native_len()?)
        })
    }

    /// `SCardFreeMemory`.
    ///
    /// # Safety
    ///
    /// `memory` was allocated by the service for the `context` and is not used after this call.
    pub unsafe fn free_memory(&self, context: Context, memory: *const c_void) -> ScardStatus {
        // SAFETY: guaranteed by the caller.
        unsafe { (self.table.free_memory.get())(context.0, memory) }
    }

    /// `pcsc_stringify_error`. Falls back to the built-in descriptions when the library does not export it.
    pub fn stringify_error(&self, status: ScardStatus) -> ErrorString {
        // SAFETY: see the impl block. The returned text stays valid until the next call on this thread and is copied
        // right away.
        unsafe { ErrorString::from_ptr((self.table.stringify_error.get())(status)) }
    }

    /// `SCardAccessStartedEvent`. Null when the service is unavailable.
    pub fn access_started_event(&self) -> pcsc_ffi_types::Handle {
        // SAFETY: see the impl block.
        unsafe { (self.table.access_started_event.get())() }
    }

    /// `SCardReleaseStartedEvent`.
    pub fn release_started_event(&self) {
        // SAFETY: see the impl block.
        unsafe { (self.table.release_started_event.get())() }
    }

    /// `SCardAddReaderToGroup`.
    pub fn add_reader_to_group(&self, context: Context, reader: &ScardString, group: &ScardString) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.add_reader_to_group.get())(context.0, reader.as_ptr(), group.as_ptr()) }
    }

    /// `SCardRemoveReaderFromGroup`.
    pub fn remove_reader_from_group(
        &self,
        context: Context,
        reader: &ScardString,
        group: &ScardString,
    ) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.remove_reader_from_group.get())(context.0, reader.as_ptr(), group.as_ptr()) }
    }

    /// `SCardForgetCardType`.
    pub fn forget_card_type(&self, context: Context, card: &ScardString) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.forget_card_type.get())(context.0, card.as_ptr()) }
    }

    /// `SCardForgetReader`.
    pub fn forget_reader(&self, context: Context, reader: &ScardString) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.forget_reader.get())(context.0, reader.as_ptr()) }
    }

    /// `SCardForgetReaderGroup`.
    pub fn forget_reader_group(&self, context: Context, group: &ScardString) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.forget_reader_group.get())(context.0, group.as_ptr()) }
    }

    /// `SCardIntroduceReader`.
    pub fn introduce_reader(&self, context: Context, reader: &ScardString, device: &ScardString) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.introduce_reader.get())(context.0, reader.as_ptr(), device.as_ptr()) }
    }

    /// `SCardIntroduceReaderGroup`.
    pub fn introduce_reader_group(&self, context: Context, group: &ScardString) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe { (self.table.introduce_reader_group.get())(context.0, group.as_ptr()) }
    }

    /// `SCardIntroduceCardType`. `primary_provider` must hold at most one GUID.
    pub fn introduce_card_type(
        &self,
        context: Context,
        card: &ScardString,
        primary_provider: &GuidList,
        interfaces: &GuidList,
        atr: &ByteList,
        atr_mask: &ByteList,
    ) -> ScardResult<ScardStatus> {
        if primary_provider.len() > 1 {
            return Err(Error::type_error("expected at most one primary provider GUID"));
        }
        if !atr_mask.is_empty() && atr_mask.len() != atr.len() {
            return Err(Error::type_error("ATR and ATR mask lengths differ"));
        }

        // SAFETY: see the impl block.
        Ok(unsafe {
            (self.table.introduce_card_type.get())(
                context.0,
                card.as_ptr(),
                primary_provider.buffer().as_ptr(),
                interfaces.buffer().as_ptr(),
                interfaces.buffer().native_len()?,
                atr.buffer().as_ptr(),
                atr_mask.buffer().as_ptr(),
                atr.buffer().native_len()?,
            )
        })
    }

    /// `SCardGetCardTypeProviderName`.
    pub fn get_card_type_provider_name(
        &self,
        context: Context,
        card: &ScardString,
        provider_id: Dword,
    ) -> ScardResult<(ScardStatus, ScardString)> {
        let get_provider_name = self.table.get_card_type_provider_name.get();
        let (status, buffer) = query_then_fetch(|provider: LpStr, len| {
            // SAFETY: see the impl block.
            unsafe { get_provider_name(context.0, card.as_ptr(), provider_id, provider, len) }
        })?;

        Ok((status, ScardString::from_buffer(buffer)))
    }

    /// `SCardSetCardTypeProviderName`.
    pub fn set_card_type_provider_name(
        &self,
        context: Context,
        card: &ScardString,
        provider_id: Dword,
        provider: &ScardString,
    ) -> ScardStatus {
        // SAFETY: see the impl block.
        unsafe {
            (self.table.set_card_type_provider_name.get())(context.0, card.as_ptr(), provider_id, provider.as_ptr())
        }
    }

    /// `SCardGetProviderId`.
    pub fn get_provider_id(&self, context: Context, card: &ScardString) -> (ScardStatus, GuidList) {
        let mut guid = Guid::default();

        // SAFETY: see the impl block.
        let status = unsafe { (self.table.get_provider_id.get())(context.0, card.as_ptr(), &mut guid) };
        if status != SCARD_S_SUCCESS {
            return (status, GuidList::default());
        }

        (status, GuidList::from_buffer(NativeBuffer::from_vec(vec![guid])))
    }

    /// `SCardListCards`. Empty filters match every card.
    pub fn list_cards(
        &self,
        context: Context,
        atr: &ByteList,
        interfaces: &GuidList,
    ) -> ScardResult<(ScardStatus, StringList)> {
        let list_cards = self.table.list_cards.get();
        let interface_count = interfaces.buffer().native_len()?;
        let (status, buffer) = query_then_fetch(|cards: LpStr, len| {
            // SAFETY: see the impl block.
            unsafe {
                list_cards(
                    context.0,
                    atr.buffer().as_ptr(),
                    interfaces.buffer().as_ptr(),
                    interface_count,
                    cards,
                    len,
                )
            }
        })?;

        Ok((status, StringList::from_buffer(buffer)))
    }

    /// `SCardListInterfaces`.
    pub fn list_interfaces(&self, context: Context, card: &ScardString) -> ScardResult<(ScardStatus, GuidList)> {
        let list_interfaces = self.table.list_interfaces.get();
        let (status, buffer) = query_then_fetch(|interfaces: *mut Guid, len| {
            // SAFETY: see the impl block.
            unsafe { list_interfaces(context.0, card.as_ptr(), interfaces, len) }
        })?;

        Ok((status, GuidList::from_buffer(buffer)))
    }

    /// `SCardLocateCards`. Matching readers are reported through the event states.
    pub fn locate_cards(
        &self,
        context: Context,
        cards: &StringList,
        states: &mut ReaderStateList,
    ) -> ScardResult<ScardStatus> {
        let count = states.native_len()?;

        // SAFETY: see the impl block.
        Ok(unsafe { (self.table.locate_cards.get())(context.0, cards.as_ptr(), states.as_mut_ptr(), count) })
    }

    /// `SCardLocateCardsByATR`. Every mask pairs an ATR with its mask of the same length.
    pub fn locate_cards_by_atr(
        &self,
        context: Context,
        masks: &[(&ByteList, &ByteList)],
        states: &mut ReaderStateList,
    ) -> ScardResult<ScardStatus> {
        let mut atr_masks = Vec::new();
        atr_masks.try_reserve_exact(masks.len())?;

        for (atr, mask) in masks {
            let atr = atr.as_bytes();
            let mask = mask.as_bytes();

            if atr.len() != mask.len() {
                return Err(Error::type_error("ATR and ATR mask lengths differ"));
            }

            let mut atr_mask = ScardAtrMask {
                cb_atr: 0,
                rgb_atr: [0; 36],
                rgb_mask: [0; 36],
            };
            if atr.len() > atr_mask.rgb_atr.len() {
                return Err(Error::new(ErrorKind::Overflow, format!("ATR is too long: {}", atr.len())));
            }
            atr_mask.cb_atr = atr.len() as Dword;
            atr_mask.rgb_atr[..atr.len()].copy_from_slice(atr);
            atr_mask.rgb_mask[..mask.len()].copy_from_slice(mask);

            atr_masks.push(atr_mask);
        }

        let mask_count = Dword::try_from(atr_masks.len())?;
        let count = states.native_len()?;
        let masks_ptr = if atr_masks.is_empty() {
            ptr::null_mut()
        } else {
            atr_masks.as_mut_ptr()
        };

        // SAFETY: see the impl block.
        Ok(unsafe {
            (self.table.locate_cards_by_atr.get())(context.0, masks_ptr, mask_count, states.as_mut_ptr(), count)
        })
    }

    /// `SCardState`.
    pub fn state(&self, handle: Handle) -> ScardResult<(ScardStatus, CardState)> {
        let mut card = CardState::default();
        let mut atr = NativeBuffer::<u8>::with_capacity(ATR_BUFFER_SIZE)?;
        let mut atr_len = atr.native_len()?;

        // SAFETY: see the impl block.
        let status = unsafe {
            (self.table.state.get())(handle.0, &mut card.state, &mut card.protocol, atr.as_mut_ptr(), &mut atr_len)
        };
        if status == SCARD_S_SUCCESS {
            atr.set_len((atr_len as usize).min(MAX_ATR_SIZE));
            card.atr = ByteList::from_buffer(atr);
        }

        Ok((status, card))
    }
}
