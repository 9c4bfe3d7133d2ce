use crate::radio::{prelude::RadioPayloads, Nrf24, Nrf24Error};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::Feature, commands, mnemonics, registers};

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Adopt the chip's `FEATURE` register, change it, and write it back.
    pub(super) fn update_feature(
        &mut self,
        change: impl FnOnce(Feature) -> Feature,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let value = self.read_register(registers::FEATURE)?;
        self.feature = change(self.feature.with_register_bits(value));
        self.spi_write_byte(registers::FEATURE, self.feature.register_bits())
    }

    pub(super) fn write_dynpd(
        &mut self,
        pipes: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::DYNPD, pipes)?;
        self.dynamic_pipes = pipes;
        Ok(())
    }
}

impl<SPI, DO, DELAY> RadioPayloads for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn set_payload_length(&mut self, length: u8) -> Result<(), Self::Error> {
        let len = length.min(32);
        for pipe in 0..6 {
            self.spi_write_byte(registers::RX_PW_P0 + pipe, len)?;
        }
        self.payload_lengths = [len; 6];
        Ok(())
    }

    fn set_payload_length_pipe(&mut self, pipe: u8, length: u8) -> Result<(), Self::Error> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        let len = length.min(32);
        self.spi_write_byte(registers::RX_PW_P0 + pipe, len)?;
        self.payload_lengths[pipe as usize] = len;
        Ok(())
    }

    fn get_payload_length(&mut self, pipe: u8) -> Result<u8, Self::Error> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        let len = self.read_register(registers::RX_PW_P0 + pipe)? & 0x3F;
        self.payload_lengths[pipe as usize] = len;
        Ok(len)
    }

    fn set_dynamic_payloads(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.update_feature(|feature| feature.with_dynamic_payloads(enable))?;
        self.write_dynpd(mnemonics::ALL_PIPES * enable as u8)
    }

    fn set_dynamic_payloads_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::Error> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        if enable && !self.feature.dynamic_payloads() {
            self.update_feature(|feature| feature.with_dynamic_payloads(true))?;
        }
        let pipes = self.read_register(registers::DYNPD)?;
        let mask = 1 << pipe;
        self.write_dynpd(if enable { pipes | mask } else { pipes & !mask })
    }

    fn get_dynamic_payloads(&self) -> bool {
        self.feature.dynamic_payloads()
    }

    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::Error> {
        let len = self.read_register(commands::R_RX_PL_WID)?;
        if len > 32 {
            #[cfg(feature = "defmt")]
            defmt::warn!("dynamic payload length {} is corrupt", len);
            return Err(Nrf24Error::BinaryCorruption);
        }
        Ok(len)
    }
}
