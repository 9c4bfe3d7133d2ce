//! The traits that make up a radio driver.
//!
//! Every trait method must be in scope to be called, so it is convenient to
//! import them all at once:
//!
//! ```
//! use nrf24::radio::prelude::*;
//! ```

use crate::types::{CrcLength, DataRate, FifoState, Mode, PaLevel, StatusFlags};

use super::RadioConfig;

/// The error type shared by all the radio traits.
pub trait RadioErrorType {
    type Error;
}

/// Bringing up the radio and applying a whole [`RadioConfig`] at once.
pub trait RadioInit: RadioErrorType {
    /// Initialize the radio's hardware with [`RadioConfig::default()`].
    ///
    /// This waits for the chip to settle from a power-on reset, verifies
    /// that registers read back what was written (to detect a dead bus),
    /// detects the chip variant, and leaves the radio in [`Mode::Standby`].
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Reconfigure the radio using the given `config`.
    ///
    /// Both FIFOs are flushed and pending IRQ events are cleared. The radio
    /// is powered up into [`Mode::Standby`] when this returns.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::Error>;
}

/// Transitions between the radio's operating [`Mode`]s.
pub trait RadioMode: RadioErrorType {
    /// The current operating mode.
    fn mode(&self) -> Mode;

    /// Is the radio in [`Mode::Rx`]?
    fn is_listening(&self) -> bool {
        self.mode() == Mode::Rx
    }

    /// Is the radio powered up (any mode but [`Mode::PowerDown`])?
    fn is_powered(&self) -> bool {
        self.mode() != Mode::PowerDown
    }

    /// Leave [`Mode::PowerDown`] for [`Mode::Standby`].
    ///
    /// The radio needs time to start its crystal oscillator before it may
    /// enter RX or TX mode. `delay` overrides the default wait of 1.5
    /// milliseconds. Pass `Some(0)` to skip waiting, in which case the caller
    /// must ensure that time elapses before using the radio.
    ///
    /// This does nothing if the radio is already powered up.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::Error>;

    /// Enter [`Mode::PowerDown`]. All register values are retained.
    fn power_down(&mut self) -> Result<(), Self::Error>;

    /// Enter [`Mode::Rx`] and listen on all open RX pipes.
    ///
    /// The address given to [`RadioPipes::open_rx_pipe()`] for pipe 0 is
    /// restored here, because [`RadioPipes::open_tx_pipe()`] overwrites it.
    /// The RX FIFO is flushed, so stale payloads are never reported.
    fn start_listening(&mut self) -> Result<(), Self::Error>;

    /// Leave [`Mode::Rx`] for [`Mode::Standby`].
    ///
    /// This must be called before transmitting anything.
    fn stop_listening(&mut self) -> Result<(), Self::Error>;
}

/// A trait to represent manipulation of data pipes.
pub trait RadioPipes: RadioErrorType {
    /// Open a `pipe` (0 to 5) for receiving when the radio is in [`Mode::Rx`].
    ///
    /// Pipes 0 and 1 store a full address and need `address` to be at least
    /// [`RadioPipes::get_address_length()`] bytes long. Pipes 2 to 5 only
    /// store their first byte and borrow the remaining bytes from pipe 1:
    /// ```ignore
    /// radio.open_rx_pipe(1, b"1Node")?; // address is "1Node"
    /// radio.open_rx_pipe(2, b"2")?;     // address is "2Node"
    /// ```
    ///
    /// Auto-ack is enabled for the pipe unless it was disabled for all pipes
    /// with [`RadioAutoAck::set_auto_ack()`].
    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::Error>;

    /// Set the address used when transmitting.
    ///
    /// The same address is also written to pipe 0, which is where the radio
    /// receives auto-ack packets. Any address opened on pipe 0 for reading is
    /// put back by [`RadioMode::start_listening()`].
    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::Error>;

    /// Stop receiving on a `pipe`.
    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::Error>;

    /// Set the address length (3 to 5 bytes) used by every pipe.
    ///
    /// Addresses are truncated to the width active when they are written,
    /// so call this before opening any pipe.
    fn set_address_length(&mut self, length: u8) -> Result<(), Self::Error>;

    /// Get the address length used by every pipe.
    fn get_address_length(&mut self) -> Result<u8, Self::Error>;

    /// Read the address programmed for an RX `pipe` into `address`.
    ///
    /// Returns the number of bytes stored to `address`.
    fn get_rx_address(&mut self, pipe: u8, address: &mut [u8]) -> Result<u8, Self::Error>;

    /// Read the TX address into `address`.
    ///
    /// Returns the number of bytes stored to `address`.
    fn get_tx_address(&mut self, address: &mut [u8]) -> Result<u8, Self::Error>;
}

/// Static and dynamic payload lengths.
pub trait RadioPayloads: RadioErrorType {
    /// Set the static payload length (clamped to 32) on all pipes.
    fn set_payload_length(&mut self, length: u8) -> Result<(), Self::Error>;

    /// Set the static payload length (clamped to 32) of a single `pipe`.
    ///
    /// A length of 0 stops the pipe from receiving static payloads.
    fn set_payload_length_pipe(&mut self, pipe: u8, length: u8) -> Result<(), Self::Error>;

    /// Get the static payload length of a `pipe`.
    fn get_payload_length(&mut self, pipe: u8) -> Result<u8, Self::Error>;

    /// Enable or disable dynamic payloads on all pipes.
    ///
    /// A dynamic payload carries its own length, which overrides the static
    /// payload length. Disabling dynamic payloads also disables ACK payloads.
    fn set_dynamic_payloads(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Enable or disable dynamic payloads on a single `pipe`.
    fn set_dynamic_payloads_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::Error>;

    /// Are dynamic payloads enabled (on any pipe)?
    fn get_dynamic_payloads(&self) -> bool;

    /// The length of the dynamic payload at the top of the RX FIFO.
    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::Error>;
}

/// The auto-ack feature and its retries.
pub trait RadioAutoAck: RadioErrorType {
    /// Enable or disable auto-ack on all pipes.
    ///
    /// Disabling auto-ack also disables ACK payloads.
    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Enable or disable auto-ack on a single `pipe`.
    fn set_auto_ack_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::Error>;

    /// Configure the hardware auto-retry.
    ///
    /// - `delay` (0 to 15) waits `250 * (delay + 1)` microseconds between attempts.
    /// - `count` (0 to 15) is the number of retries after the first attempt.
    ///
    /// Both values are clamped to 15.
    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::Error>;

    /// Allow the receiver to put data into the ACK packets it sends back.
    ///
    /// This requires (and enables) dynamic payloads.
    fn set_ack_payloads(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Are ACK payloads enabled?
    fn get_ack_payloads(&self) -> bool;

    /// Allow [`RadioTx::send()`] and [`RadioTx::write()`] to ask the receiver
    /// not to acknowledge a payload.
    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Queue `buf` (truncated to 32 bytes) as the ACK payload for the next
    /// packet received on `pipe`.
    ///
    /// Returns `false` if ACK payloads are disabled, `pipe` is out of range,
    /// or the TX FIFO is full after the upload.
    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::Error>;

    /// The length of an ACK payload received by the last successful
    /// [`RadioTx::send()`], if any. Calling this forgets the value.
    ///
    /// The ACK payload itself waits in the RX FIFO for [`RadioRx::read()`].
    fn take_ack_payload(&mut self) -> Option<u8>;
}

/// Frequency and signal settings.
pub trait RadioRf: RadioErrorType {
    /// Set the channel (clamped to 125). The frequency is `2400 + channel` MHz.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error>;

    fn get_channel(&mut self) -> Result<u8, Self::Error>;

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::Error>;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::Error>;

    /// Set the over-the-air data rate.
    ///
    /// Returns `false` if the radio did not accept the setting (the non-plus
    /// variant has no [`DataRate::Kbps250`]).
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<bool, Self::Error>;

    fn get_data_rate(&mut self) -> Result<DataRate, Self::Error>;

    /// Set the CRC length. Note that the radio forces CRC on while auto-ack
    /// is enabled on any pipe.
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::Error>;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::Error>;
}

/// A trait to represent manipulation of the RX and TX FIFOs.
pub trait RadioFifo: RadioErrorType {
    /// Discard all 3 levels of the RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::Error>;

    /// Discard all 3 levels of the TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::Error>;

    /// Get the state of the TX FIFO (`about_tx` is `true`) or the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::Error>;

    /// Is there a payload waiting in the RX FIFO?
    ///
    /// Some chip revisions report a stale pipe number in `STATUS`, so when
    /// that field says "empty" the FIFO_STATUS register is consulted too.
    fn available(&mut self) -> Result<bool, Self::Error>;

    /// Like [`RadioFifo::available()`], and stores the number of the pipe that
    /// received the payload to `pipe`.
    ///
    /// `pipe` is left untouched when nothing is available, or when only the
    /// FIFO_STATUS fallback saw the payload (the chip did not report a pipe).
    /// ```ignore
    /// let mut pipe = 9;
    /// if radio.available_pipe(&mut pipe)? {
    ///     // pipe is 0..=5 here, unless the chip did not report it
    /// }
    /// ```
    fn available_pipe(&mut self, pipe: &mut u8) -> Result<bool, Self::Error>;
}

/// The radio's IRQ events.
pub trait RadioStatus: RadioErrorType {
    /// Get the [`StatusFlags`] observed by the latest SPI transaction.
    fn get_status_flags(&self) -> StatusFlags;

    /// Refresh the cached [`StatusFlags`] without clearing anything.
    fn update(&mut self) -> Result<(), Self::Error>;

    /// Report which IRQ events happened and clear all of them.
    ///
    /// The returned flags are the state from before clearing.
    fn what_happened(&mut self) -> Result<StatusFlags, Self::Error>;

    /// Clear the IRQ events selected in `flags`.
    ///
    /// The IRQ pin stays active (LOW) while any enabled event is still set.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::Error>;

    /// Choose which IRQ events assert the radio's IRQ pin.
    ///
    /// By default all events do, which is `set_status_flags(StatusFlags::new())`.
    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::Error>;
}

/// Transmitting payloads.
pub trait RadioTx: RadioErrorType {
    /// Transmit one payload and block until the outcome is known.
    ///
    /// `buf` is truncated to 32 bytes. No padding is added, so with static
    /// payload lengths `buf` must match the receiver's configured length.
    ///
    /// Returns `true` if the payload was delivered (or auto-ack is off) and
    /// `false` if the auto-retry budget ran out. On `false` the TX FIFO is
    /// flushed, so the next call starts clean.
    fn send(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<bool, Self::Error>;

    /// Upload a payload to the TX FIFO without waiting for the outcome.
    ///
    /// With `start_tx`, CE is pulsed so the radio transmits the payload.
    /// Poll [`RadioStatus::what_happened()`] (or watch the IRQ pin) for the
    /// result. Returns `false` if the TX FIFO was already full or `buf` is empty.
    fn write(&mut self, buf: &[u8], ask_no_ack: bool, start_tx: bool)
        -> Result<bool, Self::Error>;

    /// The number of retries used by the last transmission.
    fn get_last_arc(&mut self) -> Result<u8, Self::Error>;

    /// The number of packets lost on the current channel (saturates at 15,
    /// reset by [`RadioRf::set_channel()`]).
    fn get_lost_packets(&mut self) -> Result<u8, Self::Error>;
}

/// Receiving payloads.
pub trait RadioRx: RadioErrorType {
    /// Drain the payload at the top of the RX FIFO into `buf`.
    ///
    /// Without an explicit `len`, the length is the dynamic payload length
    /// (if enabled for the receiving pipe) or that pipe's static length.
    /// When the chip does not report the receiving pipe, the static length
    /// shared by all open pipes is used.
    /// A corrupt dynamic length flushes the RX FIFO and nothing is copied.
    ///
    /// Returns the number of bytes stored to `buf`.
    fn read(&mut self, buf: &mut [u8], len: Option<u8>) -> Result<u8, Self::Error>;
}
