use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
mod auto_ack;
pub(crate) mod bit_fields;
mod constants;
mod fifo;
mod init;
mod mode;
mod payload_length;
mod pipe;
mod receive;
mod rf_setup;
mod status;
mod transmit;
use bit_fields::{Config, Feature, SetupRetry};
pub use constants::{commands, mnemonics, registers, timing};

use super::prelude::RadioErrorType;
use crate::{types::Mode, StatusFlags};

/// A collection of error types to describe hardware malfunctions and misuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error (the CE pin).
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO).
    ///
    /// Also returned when a register holds a reserved encoding.
    BinaryCorruption,
    /// The given pipe number is not in range [0, 5].
    InvalidPipe(u8),
    /// The given address (or address length) does not fit the configured address width.
    InvalidAddressLength(u8),
    /// Transmitting was attempted while the radio is in [`Mode::Rx`].
    ///
    /// Call [`RadioMode::stop_listening()`](fn@crate::radio::prelude::RadioMode::stop_listening)
    /// first.
    Listening,
    /// A static-length payload arrived on a pipe whose payload length is 0
    /// (or the chip did not say which pipe it arrived on).
    PipeClosed,
    /// Neither "TX Data Sent" nor "TX Data Failed" was observed within the
    /// worst-case time of the configured auto-retries.
    ///
    /// This usually means the radio is not responding (or not powered).
    Timeout,
}

/// This struct implements the [`Radio*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// Additionally, there are some functions implemented that are specific to the nRF24L01.
pub struct Nrf24<SPI, DO, DELAY> {
    /// The delay (in microseconds) in which
    /// [`RadioMode::stop_listening()`](fn@crate::radio::prelude::RadioMode::stop_listening)
    /// waits for an outgoing ACK packet to complete.
    ///
    /// If the auto-ack feature is disabled, then this can be set as low as 0.
    ///
    /// This value is automatically adjusted when calling
    /// [`RadioRf::set_data_rate()`](fn@crate::radio::prelude::RadioRf::set_data_rate).
    /// If setting this to a custom value, be sure to set it *after*
    /// changing the radio's data rate.
    pub tx_delay: u32,
    spi: SPI,
    ce_pin: DO,
    delay_impl: DELAY,
    buf: [u8; 33],
    status: StatusFlags,
    config_reg: Config,
    retries: SetupRetry,
    feature: Feature,
    mode: Mode,
    pipe0_rx_addr: Option<[u8; 5]>,
    tx_address: [u8; 5],
    payload_lengths: [u8; 6],
    dynamic_pipes: u8,
    ack_payload_length: Option<u8>,
}

impl<SPI, DO, DELAY> RadioErrorType for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type Error = Nrf24Error<SPI::Error, DO::Error>;
}

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate a [`Nrf24`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// Nothing is sent to the radio until
    /// [`RadioInit::init()`](fn@crate::radio::prelude::RadioInit::init) is called.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Nrf24<SPI, DO, DELAY> {
        Nrf24 {
            tx_delay: 250,
            spi,
            ce_pin,
            delay_impl,
            buf: [0u8; 33],
            status: StatusFlags::from_bits(0),
            // 16 bit CRC, all IRQ events enabled, powered down as TX
            config_reg: Config::default(),
            retries: SetupRetry::default(),
            feature: Feature::default(),
            mode: Mode::PowerDown,
            pipe0_rx_addr: None,
            // the chip's reset value of TX_ADDR
            tx_address: [0xE7; 5],
            payload_lengths: [32; 6],
            dynamic_pipes: 0,
            ack_payload_length: None,
        }
    }

    /// Release the SPI device, CE pin and delay implementation.
    pub fn free(self) -> (SPI, DO, DELAY) {
        (self.spi, self.ce_pin, self.delay_impl)
    }

    fn spi_transfer(&mut self, len: usize) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("SPI command {=u8:#x} with {} data bytes", self.buf[0], len - 1);
        self.spi
            .transfer_in_place(&mut self.buf[..len])
            .map_err(Nrf24Error::Spi)?;
        self.status = StatusFlags::from_bits(self.buf[0]);
        Ok(())
    }

    /// Clock `len` bytes out of the radio after sending `command`.
    ///
    /// This is also used to send SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // STATUS register is now stored in self.status
    /// ```
    fn spi_read(&mut self, len: u8, command: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = len as usize;
        self.buf[0] = command;
        self.buf[1..=len].fill(0);
        self.spi_transfer(len + 1)
    }

    /// Read a single register's value.
    fn read_register(&mut self, register: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, register)?;
        Ok(self.buf[1])
    }

    fn spi_write_byte(
        &mut self,
        register: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.buf[0] = register | commands::W_REGISTER;
        self.buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        register: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_command(register | commands::W_REGISTER, buf)
    }

    /// Send a raw command opcode followed by `buf` (at most 32 bytes).
    fn spi_write_command(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len().min(32);
        self.buf[0] = command;
        self.buf[1..=len].copy_from_slice(&buf[..len]);
        self.spi_transfer(len + 1)
    }

    /// Read a register, change it, and write it back.
    fn update_register(
        &mut self,
        register: u8,
        change: impl FnOnce(u8) -> u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let value = self.read_register(register)?;
        self.spi_write_byte(register, change(value))
    }

    /// A private function to write a special SPI command specific to older
    /// non-plus variants of the nRF24L01 radio module. It has no effect on plus variants.
    fn toggle_features(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_command(commands::ACTIVATE, &[commands::ACTIVATE_KEY])
    }

    fn set_ce(&mut self, active: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if active {
            self.ce_pin.set_high().map_err(Nrf24Error::Gpo)
        } else {
            self.ce_pin.set_low().map_err(Nrf24Error::Gpo)
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        #[cfg(feature = "defmt")]
        if self.mode != mode {
            defmt::debug!("radio mode: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Write the cached `CONFIG` register.
    fn write_config(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::CONFIG, self.config_reg.into_bits())
    }

    /// Is this radio a nRF24L01+ variant?
    ///
    /// The bool that this function returns is only valid _after_ calling
    /// [`init()`](fn@crate::radio::prelude::RadioInit::init).
    pub fn is_plus_variant(&self) -> bool {
        self.feature.is_plus_variant()
    }

    /// Was a signal stronger than -64 dBm received on the current channel?
    ///
    /// The chip latches this at the end of each RX period, so the radio
    /// must have been listening for at least 170 microseconds.
    /// Non-plus variants report a carrier detect with a different threshold.
    pub fn rpd(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(self.read_register(registers::RPD)? & 1 == 1)
    }
}
