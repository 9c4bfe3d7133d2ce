/// Register addresses of the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const OBSERVE_TX: u8 = 0x08;
    /// `RPD` on the plus variant, `CD` (carrier detect) on older chips.
    pub const RPD: u8 = 0x09;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const RX_ADDR_P1: u8 = 0x0B;
    pub const TX_ADDR: u8 = 0x10;
    pub const RX_PW_P0: u8 = 0x11;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// SPI command opcodes of the nRF24L01.
pub mod commands {
    /// Read commands are the bare register address (`000A_AAAA`).
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    pub const ACTIVATE: u8 = 0x50;
    /// The data byte that must follow [`ACTIVATE`].
    pub const ACTIVATE_KEY: u8 = 0x73;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    /// OR'd with the pipe number (`1010_1PPP`).
    pub const W_ACK_PAYLOAD: u8 = 0xA8;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const REUSE_TX_PL: u8 = 0xE3;
    pub const NOP: u8 = 0xFF;
}

/// Single-bit masks used against raw register values.
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;

    // FIFO_STATUS
    pub const RX_EMPTY: u8 = 1;
    pub const TX_EMPTY: u8 = 1 << 4;

    // FEATURE
    pub const EN_DYN_ACK: u8 = 1;
    pub const EN_ACK_PAY: u8 = 1 << 1;
    pub const EN_DPL: u8 = 1 << 2;

    /// All six pipes of EN_AA, EN_RXADDR or DYNPD.
    pub const ALL_PIPES: u8 = 0x3F;
}

/// Timing constraints from the datasheet, in microseconds.
pub mod timing {
    /// Power down to standby (Tpd2stby) with an external crystal.
    pub const POWER_UP_US: u32 = 1500;
    /// Minimum CE high time to trigger one transmission.
    pub const CE_PULSE_US: u32 = 10;
    /// Standby to RX (Tstby2a) before the radio reliably reports payloads.
    pub const RX_SETTLE_US: u32 = 130;
    /// Settling time after a power-on reset before registers take writes.
    pub const INIT_SETTLE_US: u32 = 5000;
    /// Interval between STATUS polls while waiting for a transmission result.
    pub const TX_POLL_INTERVAL_US: u32 = 250;
    /// Worst-case on-air time of one 32-byte packet plus its ACK (at 250 Kbps).
    pub const TX_AIR_TIME_US: u32 = 1500;
    /// Added once to the transmission bound for SPI and PLL overhead.
    pub const TX_MARGIN_US: u32 = 1000;
}
