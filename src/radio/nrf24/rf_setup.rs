use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{
    bit_fields::{Config, SetupRf},
    registers,
};
use crate::radio::{prelude::RadioRf, Nrf24, Nrf24Error};
use crate::{CrcLength, DataRate, PaLevel};

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Control the builtin LNA feature on nRF24L01 (older non-plus variants) and Si24R1
    /// (cheap chinese clones of the nRF24L01).
    ///
    /// This is enabled by default (regardless of chip variant).
    ///
    /// This function has no effect on nRF24L01+ modules and PA/LNA variants because
    /// the LNA feature is always enabled.
    pub fn set_lna(&mut self, enable: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.update_register(registers::RF_SETUP, |value| {
            SetupRf::from_bits(value).with_lna_enable(enable).into_bits()
        })
    }
}

impl<SPI, DO, DELAY> RadioRf for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Writing `RF_CH` also resets the lost packet counter
    /// (see [`RadioTx::get_lost_packets()`](fn@crate::radio::prelude::RadioTx::get_lost_packets)).
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.spi_write_byte(registers::RF_CH, channel.min(125))
    }

    fn get_channel(&mut self) -> Result<u8, Self::Error> {
        Ok(self.read_register(registers::RF_CH)? & 0x7F)
    }

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::Error> {
        self.update_register(registers::RF_SETUP, |value| {
            SetupRf::from_bits(value).with_pa_level(pa_level).into_bits()
        })
    }

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::Error> {
        Ok(SetupRf::from_bits(self.read_register(registers::RF_SETUP)?).pa_level())
    }

    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<bool, Self::Error> {
        self.tx_delay = data_rate.tx_delay();
        self.update_register(registers::RF_SETUP, |value| {
            SetupRf::from_bits(value).with_data_rate(data_rate).into_bits()
        })?;
        // a non-plus variant silently ignores RF_DR_LOW
        let accepted = SetupRf::from_bits(self.read_register(registers::RF_SETUP)?).data_rate();
        if accepted != Some(data_rate) {
            #[cfg(feature = "defmt")]
            defmt::warn!("radio rejected the data rate {}", data_rate);
            return Ok(false);
        }
        Ok(true)
    }

    fn get_data_rate(&mut self) -> Result<DataRate, Self::Error> {
        SetupRf::from_bits(self.read_register(registers::RF_SETUP)?)
            .data_rate()
            .ok_or(Nrf24Error::BinaryCorruption)
    }

    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::Error> {
        let value = self.read_register(registers::CONFIG)?;
        self.config_reg = Config::from_bits(value).with_crc_length(crc_length);
        self.write_config()
    }

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::Error> {
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        let crc_length = config.crc_length().ok_or(Nrf24Error::BinaryCorruption)?;
        self.config_reg = config;
        Ok(crc_length)
    }
}
