//! Typed models of the registers that pack several settings into one byte.
//!
//! The driver keeps a copy of some of these so that a setter only changes
//! its own field and writes every unrelated bit back untouched.

use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel, StatusFlags};

/// The `CONFIG` register.
///
/// The `mask_*` bits are inverted on the chip: a set bit keeps that event
/// off the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _reserved: u8,

    pub mask_rx_dr: bool,

    pub mask_tx_ds: bool,

    pub mask_max_rt: bool,

    /// `EN_CRC` and `CRCO`. Defaults to a 16 bit CRC.
    #[bits(2, default = 3)]
    pub crc: u8,

    pub pwr_up: bool,

    pub prim_rx: bool,
}

impl Config {
    /// `None` when `CRCO` is set without `EN_CRC`.
    pub const fn crc_length(&self) -> Option<CrcLength> {
        CrcLength::from_bits(self.crc())
    }

    pub const fn with_crc_length(self, length: CrcLength) -> Self {
        self.with_crc(length.into_bits())
    }

    /// The IRQ events that are allowed to assert the IRQ pin.
    pub const fn irq_events(&self) -> StatusFlags {
        StatusFlags::from_bits(!self.into_bits() & StatusFlags::IRQ_MASK)
    }

    /// Let only the events selected in `flags` assert the IRQ pin.
    pub const fn with_irq_events(self, flags: StatusFlags) -> Self {
        Self::from_bits(
            self.into_bits() & !StatusFlags::IRQ_MASK | (!flags.into_bits() & StatusFlags::IRQ_MASK),
        )
    }
}

/// The `SETUP_RETR` register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// Auto-retransmit delay: `250 * (ard + 1)` microseconds.
    #[bits(4, default = 5)]
    pub ard: u8,

    /// Auto-retransmit count.
    #[bits(4, default = 15)]
    pub arc: u8,
}

impl SetupRetry {
    /// The longest time (in microseconds) the chip can spend on one payload
    /// before posting either `TX_DS` or `MAX_RT`.
    pub const fn worst_case_us(&self, air_time_us: u32) -> u32 {
        (self.arc() as u32 + 1) * (250 * (self.ard() as u32 + 1) + air_time_us)
    }
}

/// The `RF_SETUP` register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRf {
    pub cont_wave: bool,

    #[bits(1)]
    _reserved: u8,

    #[bits(1, access = RO)]
    pub dr_low: bool,

    pub pll_lock: bool,

    #[bits(1, access = RO)]
    pub dr_high: bool,

    /// `RF_PWR`. Defaults to [`PaLevel::Max`].
    #[bits(2, default = 3)]
    pub rf_pwr: u8,

    /// `LNA_HCURR` (ignored by the plus variant).
    #[bits(1, default = true)]
    pub lna_enable: bool,
}

impl SetupRf {
    /// `None` for the reserved data rate encoding.
    pub const fn data_rate(&self) -> Option<DataRate> {
        DataRate::from_flags(self.dr_low(), self.dr_high())
    }

    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        let (low, high) = data_rate.into_flags();
        let bits = self.into_bits() & !(Self::DR_LOW_MASK | Self::DR_HIGH_MASK);
        Self::from_bits(
            bits | (low as u8) << Self::DR_LOW_OFFSET | (high as u8) << Self::DR_HIGH_OFFSET,
        )
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.rf_pwr())
    }

    pub const fn with_pa_level(self, level: PaLevel) -> Self {
        self.with_rf_pwr(level.into_bits())
    }

    const DR_LOW_MASK: u8 = 1 << Self::DR_LOW_OFFSET;
    const DR_HIGH_MASK: u8 = 1 << Self::DR_HIGH_OFFSET;
}

/// Driver-side feature state.
///
/// The low 3 bits mirror the chip's `FEATURE` register (`EN_DPL`,
/// `EN_ACK_PAY`, `EN_DYN_ACK`). The upper bits are cached facts about the
/// radio that have no register of their own.
#[bitfield(u8, order = Msb)]
pub(crate) struct Feature {
    /// The configured address width (3 to 5 bytes).
    #[bits(3, default = 5)]
    pub address_length: u8,

    /// `false` once auto-ack was disabled for all pipes.
    #[bits(1, default = true)]
    pub auto_ack: bool,

    #[bits(1, default = true)]
    pub is_plus_variant: bool,

    #[bits(1, access = RO)]
    pub dynamic_payloads: bool,

    #[bits(1, access = RO)]
    pub ack_payloads: bool,

    pub ask_no_ack: bool,
}

impl Feature {
    pub const REG_MASK: u8 = 7;

    /// The byte to write to the `FEATURE` register.
    pub const fn register_bits(&self) -> u8 {
        self.into_bits() & Self::REG_MASK
    }

    /// Adopt a `FEATURE` value read from the chip, keeping the cached upper bits.
    pub const fn with_register_bits(self, value: u8) -> Self {
        Self::from_bits(self.into_bits() & !Self::REG_MASK | value & Self::REG_MASK)
    }

    /// Disabling dynamic payloads also disables ACK payloads.
    pub const fn with_dynamic_payloads(self, enable: bool) -> Self {
        let dpl = 1u8 << Self::DYNAMIC_PAYLOADS_OFFSET;
        let ack = 1u8 << Self::ACK_PAYLOADS_OFFSET;
        Self::from_bits(if enable {
            self.into_bits() | dpl
        } else {
            self.into_bits() & !(dpl | ack)
        })
    }

    /// Enabling ACK payloads also enables dynamic payloads.
    pub const fn with_ack_payloads(self, enable: bool) -> Self {
        let dpl = 1u8 << Self::DYNAMIC_PAYLOADS_OFFSET;
        let ack = 1u8 << Self::ACK_PAYLOADS_OFFSET;
        Self::from_bits(if enable {
            self.into_bits() | ack | dpl
        } else {
            self.into_bits() & !ack
        })
    }
}
