use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{RadioFifo, RadioPayloads, RadioStatus, RadioRx},
        Nrf24, Nrf24Error,
    },
    StatusFlags,
};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// The length of the payload at the top of the RX FIFO.
    ///
    /// `Ok(None)` means a corrupt dynamic length was discarded with the RX FIFO.
    fn rx_payload_length(&mut self) -> Result<Option<u8>, Nrf24Error<SPI::Error, DO::Error>> {
        let pipe = self.status.rx_pipe();
        let dynamic = self.feature.dynamic_payloads()
            && (pipe > 5 || self.dynamic_pipes & (1 << pipe) > 0);
        if dynamic {
            return match self.get_dynamic_payload_length() {
                Ok(len) => Ok(Some(len)),
                Err(Nrf24Error::BinaryCorruption) => {
                    self.flush_rx()?;
                    Ok(None)
                }
                Err(e) => Err(e),
            };
        }
        if pipe > 5 {
            return self.shared_static_length().map(Some);
        }
        match self.payload_lengths[pipe as usize] {
            0 => Err(Nrf24Error::PipeClosed),
            len => Ok(Some(len)),
        }
    }

    /// The static payload length used by every open pipe.
    ///
    /// Some chips leave RX_P_NO at "empty" while a payload waits, so the
    /// length cannot be looked up per pipe.
    fn shared_static_length(&mut self) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        let open_pipes = self.read_register(registers::EN_RXADDR)?;
        let mut lengths = self
            .payload_lengths
            .iter()
            .enumerate()
            .filter(|&(pipe, &len)| open_pipes & (1 << pipe) > 0 && len > 0)
            .map(|(_, &len)| len);
        match lengths.next() {
            Some(len) if lengths.all(|other| other == len) => Ok(len),
            _ => Err(Nrf24Error::PipeClosed),
        }
    }
}

impl<SPI, DO, DELAY> RadioRx for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// See [`RadioRx::read()`] for implementation-agnostic detail.
    ///
    /// Remember that each call to [`RadioRx::read()`] fetches data from the
    /// RX FIFO beginning with the first byte from the first available
    /// payload. A payload is not removed from the RX FIFO until its
    /// entire length (or more) is fetched.
    ///
    /// Without an explicit `len`, the pipe reported by the latest STATUS byte
    /// decides the length, so call [`RadioFifo::available()`] first.
    fn read(&mut self, buf: &mut [u8], len: Option<u8>) -> Result<u8, Self::Error> {
        let len = match len {
            Some(len) => len,
            None => match self.rx_payload_length()? {
                Some(len) => len,
                None => return Ok(0),
            },
        };
        let len = (len as usize).min(buf.len()).min(32);
        if len == 0 {
            return Ok(0);
        }

        self.spi_read(len as u8, commands::R_RX_PAYLOAD)?;
        buf[..len].copy_from_slice(&self.buf[1..=len]);
        self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;

        // an ACK payload that went out also raised TX_DS
        let fifo_status = self.read_register(registers::FIFO_STATUS)?;
        if fifo_status & mnemonics::RX_EMPTY > 0 && self.status.tx_ds() {
            self.clear_status_flags(StatusFlags::default().with_tx_ds(true))?;
        }
        Ok(len as u8)
    }
}
