use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::RadioFifo, Nrf24};
use crate::FifoState;

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> RadioFifo for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn available(&mut self) -> Result<bool, Self::Error> {
        let mut pipe = 0;
        self.available_pipe(&mut pipe)
    }

    fn available_pipe(&mut self, pipe: &mut u8) -> Result<bool, Self::Error> {
        self.spi_read(0, commands::NOP)?;
        let reported = self.status.rx_pipe();
        if reported < 6 {
            *pipe = reported;
            return Ok(true);
        }
        // some chips leave RX_P_NO at "empty" while a payload waits
        let fifo_status = self.read_register(registers::FIFO_STATUS)?;
        Ok(fifo_status & mnemonics::RX_EMPTY == 0)
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::Error> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::Error> {
        self.spi_read(0, commands::FLUSH_TX)
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::Error> {
        let offset = about_tx as u8 * 4;
        let status = (self.read_register(registers::FIFO_STATUS)? >> offset) & 3;
        match status {
            1 => Ok(FifoState::Empty),
            2 => Ok(FifoState::Full),
            _ => Ok(FifoState::Occupied),
        }
    }
}
