use pcsc_ffi_types::Dword;

bitflags::bitflags! {
    /// [SCARD_READERSTATE](https://pcsclite.apdu.fr/api/structSCARD__READERSTATE.html) `dwCurrentState` and
    /// `dwEventState` bits.
    ///
    /// The upper 16 bits of `dwEventState` carry the event counter and are preserved as unknown bits.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct ReaderStateFlags: Dword {
        /// The application is unaware of the current state, and would like to know.
        const UNAWARE = 0x0000;
        /// The application is not interested in this reader.
        const IGNORE = 0x0001;
        /// There is a difference between the state believed by the application and the actual state.
        const CHANGED = 0x0002;
        /// The given reader name is not recognized.
        const UNKNOWN = 0x0004;
        /// The actual state of this reader is not available.
        const UNAVAILABLE = 0x0008;
        /// There is no card in the reader.
        const EMPTY = 0x0010;
        /// There is a card in the reader.
        const PRESENT = 0x0020;
        /// There is a card in the reader with an ATR matching one of the target cards.
        const ATRMATCH = 0x0040;
        /// The card in the reader is allocated for exclusive use by another application.
        const EXCLUSIVE = 0x0080;
        /// The card in the reader is in use by one or more other applications.
        const INUSE = 0x0100;
        /// The card in the reader is unresponsive or not supported by the reader or software.
        const MUTE = 0x0200;
        /// The card in the reader has not been powered up.
        const UNPOWERED = 0x0400;
    }
}

impl ReaderStateFlags {
    /// Event counter stored in the upper word of `dwEventState`.
    pub fn event_count(self) -> u16 {
        ((self.bits() >> 16) & 0xffff) as u16
    }
}

bitflags::bitflags! {
    /// Protocol identifiers accepted by `SCardConnect` and reported as the active protocol.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct Protocol: Dword {
        /// No protocol was negotiated (direct connections).
        const UNDEFINED = pcsc_ffi_types::status::SCARD_PROTOCOL_UNDEFINED;
        /// T=0 active protocol.
        const T0 = pcsc_ffi_types::status::SCARD_PROTOCOL_T0;
        /// T=1 active protocol.
        const T1 = pcsc_ffi_types::status::SCARD_PROTOCOL_T1;
        /// Raw active protocol.
        const RAW = pcsc_ffi_types::status::SCARD_PROTOCOL_RAW;
    }
}

#[cfg(not(windows))]
bitflags::bitflags! {
    /// [SCardStatus](https://pcsclite.apdu.fr/api/group__API.html#gae49c3c894ad7ac12a5b896bde70d0382) `pdwState`.
    ///
    /// pcsc-lite reports a bit mask. WinSCard reports a single ordinal instead, so there is no such type on Windows.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct CardState: Dword {
        /// Unknown state.
        const UNKNOWN = 0x0001;
        /// There is no card in the reader.
        const ABSENT = 0x0002;
        /// There is a card in the reader, but it has not been moved into position for use.
        const PRESENT = 0x0004;
        /// There is a card in the reader in position for use. The card is not powered.
        const SWALLOWED = 0x0008;
        /// Power is being provided to the card, but the reader driver is unaware of the mode of the card.
        const POWERED = 0x0010;
        /// The card has been reset and is awaiting PTS negotiation.
        const NEGOTIABLE = 0x0020;
        /// The card has been reset and specific communication protocols have been established.
        const SPECIFIC = 0x0040;
    }
}
