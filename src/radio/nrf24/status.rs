use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::RadioStatus, Nrf24},
    types::StatusFlags,
};

use super::{commands, registers, Config};

impl<SPI, DO, DELAY> RadioStatus for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn get_status_flags(&self) -> StatusFlags {
        self.status
    }

    fn update(&mut self) -> Result<(), Self::Error> {
        self.spi_read(0, commands::NOP)
    }

    /// The STATUS byte clocked out while writing `STATUS` is the state from
    /// before the write, so one transaction both reads and clears.
    fn what_happened(&mut self) -> Result<StatusFlags, Self::Error> {
        self.clear_status_flags(StatusFlags::new())?;
        Ok(self.status)
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::Error> {
        self.spi_write_byte(registers::STATUS, flags.irq_bits())
    }

    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::Error> {
        let value = self.read_register(registers::CONFIG)?;
        self.config_reg = Config::from_bits(value).with_irq_events(flags);
        self.write_config()
    }
}
