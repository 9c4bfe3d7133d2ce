use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{RadioFifo, RadioPayloads, RadioStatus, RadioTx},
        Nrf24, Nrf24Error,
    },
    Mode, StatusFlags,
};

use super::{commands, registers, timing};

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// How many STATUS polls [`RadioTx::send()`] makes before giving up.
    fn tx_poll_limit(&self) -> u32 {
        let budget =
            self.retries.worst_case_us(timing::TX_AIR_TIME_US) + timing::TX_MARGIN_US;
        (budget + timing::TX_POLL_INTERVAL_US - 1) / timing::TX_POLL_INTERVAL_US
    }
}

impl<SPI, DO, DELAY> RadioTx for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// See [`RadioTx::send()`] for implementation-agnostic detail.
    ///
    /// The STATUS register is polled every 250 microseconds. If neither
    /// "TX Data Sent" nor "TX Data Failed" shows up within the worst-case
    /// duration of the configured auto-retries, [`Nrf24Error::Timeout`] is returned.
    ///
    /// The TX FIFO is flushed before `buf` is uploaded, so a payload left
    /// behind by [`RadioTx::write()`] is never put on air in its place.
    fn send(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<bool, Self::Error> {
        self.ack_payload_length = None;
        if self.mode == Mode::Rx {
            return Err(Nrf24Error::Listening);
        }
        if buf.is_empty() {
            return Ok(false);
        }
        // this function only handles 1 payload at a time
        self.flush_tx()?;
        if !self.write(buf, ask_no_ack, true)? {
            return Ok(false);
        }

        let limit = self.tx_poll_limit();
        let mut polls = 0;
        loop {
            self.spi_read(0, commands::NOP)?;
            if self.status.tx_ds() || self.status.tx_df() {
                break;
            }
            polls += 1;
            if polls >= limit {
                #[cfg(feature = "defmt")]
                defmt::warn!("no TX result after {} polls", polls);
                return Err(Nrf24Error::Timeout);
            }
            self.delay_impl.delay_us(timing::TX_POLL_INTERVAL_US);
        }

        let flags = self.status;
        self.clear_status_flags(StatusFlags::default().with_tx_ds(true).with_tx_df(true))?;
        if flags.tx_df() {
            // the failed payload would block the next one
            self.flush_tx()?;
            return Ok(false);
        }

        if self.feature.ack_payloads() && flags.rx_dr() {
            match self.get_dynamic_payload_length() {
                Ok(len) => self.ack_payload_length = Some(len),
                Err(Nrf24Error::BinaryCorruption) => self.flush_rx()?,
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }

    /// See [`RadioTx::write()`] for implementation-agnostic detail.
    ///
    /// When `start_tx` is `true`, the CE pin is pulsed for 10 microseconds.
    /// The radio then finishes the transmission (including auto-retries) on its own.
    fn write(&mut self, buf: &[u8], ask_no_ack: bool, start_tx: bool) -> Result<bool, Self::Error> {
        if self.mode == Mode::Rx {
            return Err(Nrf24Error::Listening);
        }
        if buf.is_empty() {
            return Ok(false);
        }

        if !self.config_reg.pwr_up() || self.config_reg.prim_rx() {
            let was_powered = self.config_reg.pwr_up();
            self.config_reg = self.config_reg.with_pwr_up(true).with_prim_rx(false);
            self.write_config()?;
            if !was_powered {
                self.wait_for_oscillator(None);
            }
            self.set_mode(Mode::Standby);
        }

        self.clear_status_flags(StatusFlags::default().with_tx_ds(true).with_tx_df(true))?;
        if self.status.tx_full() {
            return Ok(false);
        }

        let command = if ask_no_ack {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        self.spi_write_command(command, buf)?;

        if start_tx {
            self.set_ce(true)?;
            self.set_mode(Mode::Tx);
            self.delay_impl.delay_us(timing::CE_PULSE_US);
            self.set_ce(false)?;
            self.set_mode(Mode::Standby);
        }
        Ok(true)
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::Error> {
        Ok(self.read_register(registers::OBSERVE_TX)? & 0xF)
    }

    fn get_lost_packets(&mut self) -> Result<u8, Self::Error> {
        Ok(self.read_register(registers::OBSERVE_TX)? >> 4)
    }
}
