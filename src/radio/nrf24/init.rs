use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{RadioFifo, RadioInit, RadioMode, RadioPayloads, RadioPipes, RadioRf, RadioStatus},
        Nrf24, Nrf24Error, RadioConfig,
    },
    Mode, StatusFlags,
};

use super::{mnemonics, registers, timing};

impl<SPI, DO, DELAY> RadioInit for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`Nrf24::new()`].
    ///
    /// [`RadioConfig::default()`] is applied afterwards, leaving the radio
    /// powered up in [`Mode::Standby`].
    fn init(&mut self) -> Result<(), Self::Error> {
        // Registers may not take writes until 4.5 ms (+14 us) after a power-on reset.
        self.delay_impl.delay_us(timing::INIT_SETTLE_US);

        self.power_down()?;
        let config = self.read_register(registers::CONFIG)?;
        if config != self.config_reg.into_bits() {
            #[cfg(feature = "defmt")]
            defmt::warn!("CONFIG reads back as {=u8:#x}, is the radio connected?", config);
            return Err(Nrf24Error::BinaryCorruption);
        }

        // ACTIVATE toggles FEATURE on non-plus variants and is ignored by plus variants
        let before_toggle = self.read_register(registers::FEATURE)?;
        self.toggle_features()?;
        let after_toggle = self.read_register(registers::FEATURE)?;
        self.feature.set_is_plus_variant(before_toggle == after_toggle);
        if after_toggle < before_toggle {
            // The MCU reset without a power-on reset of the radio,
            // so the toggle just disabled the features.
            self.toggle_features()?;
        }
        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::Error> {
        self.clear_status_flags(StatusFlags::new())?;
        self.power_down()?;
        self.flush_rx()?;
        self.flush_tx()?;

        self.set_address_length(config.address_length())?;

        self.retries = config.auto_retries;
        self.spi_write_byte(registers::SETUP_RETR, self.retries.into_bits())?;
        self.spi_write_byte(registers::EN_AA, config.auto_ack())?;
        self.feature.set_auto_ack(config.auto_ack() > 0);

        self.feature = self
            .feature
            .with_register_bits(config.feature.register_bits());
        self.write_dynpd(mnemonics::ALL_PIPES * config.dynamic_payloads() as u8)?;
        self.spi_write_byte(registers::FEATURE, self.feature.register_bits())?;

        // CONT_WAVE and PLL_LOCK are test modes
        self.spi_write_byte(registers::RF_SETUP, config.setup_rf.into_bits() & 0x2F)?;
        self.tx_delay = config.data_rate().tx_delay();

        let width = config.address_length() as usize;
        let mut address = [0u8; 5];
        for pipe in 0..6 {
            config.rx_address(pipe, &mut address);
            if pipe < 2 {
                self.spi_write_buf(registers::RX_ADDR_P0 + pipe, &address[..width])?;
            } else {
                self.spi_write_byte(registers::RX_ADDR_P0 + pipe, address[0])?;
            }
            if pipe == 0 {
                self.pipe0_rx_addr = config.is_rx_pipe_enabled(0).then_some(address);
            }
        }
        self.spi_write_byte(registers::EN_RXADDR, config.rx_pipes_enabled())?;
        config.tx_address(&mut address);
        self.open_tx_pipe(&address)?;

        self.set_payload_length(config.payload_length())?;
        self.set_channel(config.channel())?;
        self.ack_payload_length = None;

        // Do not raise CE, so the radio idles in standby-I mode
        self.config_reg = config.config_reg.with_pwr_up(true).with_prim_rx(false);
        self.write_config()?;
        self.wait_for_oscillator(None);
        self.set_mode(Mode::Standby);
        Ok(())
    }
}
