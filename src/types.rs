//! Value types shared by the radio traits.
//!
//! Each type knows how to encode itself into (and decode itself from)
//! the register field it lives in, so the driver never shifts bits by hand.

use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

/// Power Amplifier level of the transmitter.
///
/// The unit dBm is relative to 1 milliwatt, so every step is a 6 dB change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    /// Encode as the 2-bit `RF_PWR` field of the `RF_SETUP` register.
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 1,
            PaLevel::High => 2,
            PaLevel::Max => 3,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & 3 {
            0 => PaLevel::Min,
            1 => PaLevel::Low,
            2 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }

    /// The nominal output power in dBm.
    pub const fn dbm(self) -> i8 {
        match self {
            PaLevel::Min => -18,
            PaLevel::Low => -12,
            PaLevel::High => -6,
            PaLevel::Max => 0,
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} dBm", self.dbm())
    }
}

/// How fast data moves through the air.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// 1 Mbps
    Mbps1,
    /// 2 Mbps
    Mbps2,
    /// 250 Kbps (nRF24L01+ only)
    Kbps250,
}

impl DataRate {
    /// Decode the `(RF_DR_LOW, RF_DR_HIGH)` bit pair of `RF_SETUP`.
    ///
    /// Returns [`None`] for the reserved combination (both bits set).
    pub(crate) const fn from_flags(low: bool, high: bool) -> Option<Self> {
        match (low, high) {
            (false, false) => Some(DataRate::Mbps1),
            (false, true) => Some(DataRate::Mbps2),
            (true, false) => Some(DataRate::Kbps250),
            (true, true) => None,
        }
    }

    /// Encode as the `(RF_DR_LOW, RF_DR_HIGH)` bit pair of `RF_SETUP`.
    pub(crate) const fn into_flags(self) -> (bool, bool) {
        match self {
            DataRate::Mbps1 => (false, false),
            DataRate::Mbps2 => (false, true),
            DataRate::Kbps250 => (true, false),
        }
    }

    /// Microseconds to wait after dropping CE in RX mode, so a pending
    /// auto-ACK reply can finish going out at this data rate.
    pub(crate) const fn tx_delay(self) -> u32 {
        match self {
            DataRate::Mbps1 => 280,
            DataRate::Mbps2 => 240,
            DataRate::Kbps250 => 505,
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The length of the CRC checksum appended to every packet (if any).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrcLength {
    /// No CRC checksum is used.
    Disabled,
    /// 1 byte CRC checksum.
    Bit8,
    /// 2 byte CRC checksum.
    Bit16,
}

impl CrcLength {
    /// Encode as the `(EN_CRC, CRCO)` bit pair of the `CONFIG` register.
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 0b10,
            CrcLength::Bit16 => 0b11,
        }
    }

    /// `CRCO` without `EN_CRC` is meaningless, so `0b01` decodes to [`None`].
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value & 3 {
            0 => Some(CrcLength::Disabled),
            0b10 => Some(CrcLength::Bit8),
            0b11 => Some(CrcLength::Bit16),
            _ => None,
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// The fill level of one of the radio's 3-level FIFOs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoState {
    /// All 3 levels are occupied.
    Full,
    /// No payloads are stored.
    Empty,
    /// Somewhere between [`FifoState::Empty`] and [`FifoState::Full`].
    Occupied,
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The operating mode of the radio.
///
/// This is not a register field. The chip's mode is the combination of
/// `PWR_UP`, `PRIM_RX` and the CE pin level, and the driver only moves
/// between these states through its guarded transition functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// `PWR_UP` is cleared. Registers are retained, nothing is on air.
    PowerDown,
    /// Powered, CE low. The only mode from which TX or RX may be entered.
    Standby,
    /// Powered, `PRIM_RX` set and CE high: actively listening.
    Rx,
    /// Powered, `PRIM_RX` cleared and CE high: a transmission is being started.
    Tx,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::PowerDown => write!(f, "power down"),
            Mode::Standby => write!(f, "standby"),
            Mode::Rx => write!(f, "RX"),
            Mode::Tx => write!(f, "TX"),
        }
    }
}

/// A snapshot of the radio's `STATUS` register.
///
/// The radio returns this byte as the first byte of every SPI transaction,
/// so the driver always holds the state observed by its latest bus access.
///
/// The same type doubles as a selector of IRQ events for
/// [`RadioStatus::clear_status_flags()`](fn@crate::radio::prelude::RadioStatus::clear_status_flags)
/// and [`RadioStatus::set_status_flags()`](fn@crate::radio::prelude::RadioStatus::set_status_flags):
/// ```
/// use nrf24::StatusFlags;
/// let flags = StatusFlags::default().with_rx_dr(true);
/// assert!(flags.rx_dr() && !flags.tx_ds() && !flags.tx_df());
/// ```
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _reserved: u8,

    /// "RX Data Ready": a payload arrived in the RX FIFO.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// "TX Data Sent": a payload left the TX FIFO (and was acknowledged, if
    /// auto-ack is on).
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// "TX Data Failed": the auto-retry budget ran out (the chip's `MAX_RT`).
    #[bits(1, access = RO)]
    pub tx_df: bool,

    /// The pipe that received the payload at the top of the RX FIFO.
    ///
    /// `7` means the RX FIFO is empty, `6` is unused by the chip.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// The TX FIFO has no free level.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

impl StatusFlags {
    /// The three IRQ event bits, as laid out in `STATUS` and `CONFIG`.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// The `rx_pipe` value reported while the RX FIFO is empty.
    pub const RX_PIPE_EMPTY: u8 = 7;

    /// All three IRQ events selected; [`StatusFlags::default()`] selects none.
    pub const fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    const fn with_flag(self, offset: usize, flag: bool) -> Self {
        let mask = 1u8 << offset;
        Self::from_bits(if flag {
            self.into_bits() | mask
        } else {
            self.into_bits() & !mask
        })
    }

    /// Select (or deselect) the "RX Data Ready" event.
    pub const fn with_rx_dr(self, flag: bool) -> Self {
        self.with_flag(Self::RX_DR_OFFSET, flag)
    }

    /// Select (or deselect) the "TX Data Sent" event.
    pub const fn with_tx_ds(self, flag: bool) -> Self {
        self.with_flag(Self::TX_DS_OFFSET, flag)
    }

    /// Select (or deselect) the "TX Data Failed" event.
    pub const fn with_tx_df(self, flag: bool) -> Self {
        self.with_flag(Self::TX_DF_OFFSET, flag)
    }

    /// Only the IRQ event bits of this snapshot.
    pub(crate) const fn irq_bits(&self) -> u8 {
        self.into_bits() & Self::IRQ_MASK
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, rx_pipe: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.rx_pipe(),
            self.tx_full()
        )
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}
