use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::RadioPipes, Nrf24, Nrf24Error};

use super::registers;

impl<SPI, DO, DELAY> RadioPipes for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::Error> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }

        if pipe < 2 {
            let width = self.feature.address_length() as usize;
            if address.len() < width {
                return Err(Nrf24Error::InvalidAddressLength(address.len() as u8));
            }

            // open_tx_pipe() overwrites the pipe 0 address, so
            // start_listening() has to restore it.
            if pipe == 0 {
                let mut cached_addr = [0u8; 5];
                cached_addr[..width].copy_from_slice(&address[..width]);
                self.pipe0_rx_addr = Some(cached_addr);
            }
            self.spi_write_buf(registers::RX_ADDR_P0 + pipe, &address[..width])?;
        }
        // For pipes 2-5, only write the LSB
        else {
            let Some(&lsb) = address.first() else {
                return Err(Nrf24Error::InvalidAddressLength(0));
            };
            self.spi_write_byte(registers::RX_ADDR_P0 + pipe, lsb)?;
        }

        if self.feature.auto_ack() {
            self.update_register(registers::EN_AA, |value| value | (1 << pipe))?;
        }
        self.update_register(registers::EN_RXADDR, |value| value | (1 << pipe))
    }

    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::Error> {
        let width = self.feature.address_length() as usize;
        if address.len() < width {
            return Err(Nrf24Error::InvalidAddressLength(address.len() as u8));
        }
        self.spi_write_buf(registers::TX_ADDR, &address[..width])?;
        self.tx_address[..width].copy_from_slice(&address[..width]);
        // auto-ack packets are received on pipe 0
        self.spi_write_buf(registers::RX_ADDR_P0, &address[..width])
    }

    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::Error> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        self.update_register(registers::EN_RXADDR, |value| value & !(1 << pipe))?;
        if pipe == 0 {
            self.pipe0_rx_addr = None;
        }
        Ok(())
    }

    fn set_address_length(&mut self, length: u8) -> Result<(), Self::Error> {
        if !(3..=5).contains(&length) {
            return Err(Nrf24Error::InvalidAddressLength(length));
        }
        self.spi_write_byte(registers::SETUP_AW, length - 2)?;
        self.feature.set_address_length(length);
        Ok(())
    }

    fn get_address_length(&mut self) -> Result<u8, Self::Error> {
        let value = self.read_register(registers::SETUP_AW)? & 3;
        if value == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("SETUP_AW holds the illegal address width 0");
            return Err(Nrf24Error::BinaryCorruption);
        }
        let length = value + 2;
        self.feature.set_address_length(length);
        Ok(length)
    }

    fn get_rx_address(&mut self, pipe: u8, address: &mut [u8]) -> Result<u8, Self::Error> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        let width = self.feature.address_length();
        let len = address.len().min(width as usize);

        // pipes 2 - 5 borrow the upper bytes from pipe 1
        let register = registers::RX_ADDR_P0 + pipe.min(1);
        self.spi_read(width, register)?;
        address[..len].copy_from_slice(&self.buf[1..=len]);
        if pipe > 1 && len > 0 {
            address[0] = self.read_register(registers::RX_ADDR_P0 + pipe)?;
        }
        Ok(len as u8)
    }

    fn get_tx_address(&mut self, address: &mut [u8]) -> Result<u8, Self::Error> {
        let width = self.feature.address_length();
        let len = address.len().min(width as usize);
        self.spi_read(width, registers::TX_ADDR)?;
        address[..len].copy_from_slice(&self.buf[1..=len]);
        Ok(len as u8)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, RadioPipes};
    use crate::{
        radio::{nrf24::commands, Nrf24Error},
        spi_test_expects,
        test::mk_radio,
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn open_rx_pipe5() {
        let spi_expectations = spi_test_expects![
            // open_rx_pipe(5)
            (
                vec![(registers::RX_ADDR_P0 + 5) | commands::W_REGISTER, 0x55u8],
                vec![0xEu8, 0u8],
            ),
            // set EN_AA
            (vec![registers::EN_AA, 0u8], vec![0xEu8, 0x1Fu8]),
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            // set EN_RXADDR
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 1u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 0x21u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let address = [0x55u8; 5];
        assert_eq!(
            radio.open_rx_pipe(9, &address),
            Err(Nrf24Error::InvalidPipe(9))
        );
        assert_eq!(
            radio.open_rx_pipe(5, &[]),
            Err(Nrf24Error::InvalidAddressLength(0))
        );
        radio.open_rx_pipe(5, &address).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn open_rx_pipe1_without_auto_ack() {
        let spi_expectations = spi_test_expects![
            // only 3 bytes of the address are written
            (
                vec![registers::RX_ADDR_P1 | commands::W_REGISTER, 1, 2, 3],
                vec![0xEu8, 0, 0, 0],
            ),
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 0u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.feature.set_address_length(3);
        radio.feature.set_auto_ack(false);
        assert_eq!(
            radio.open_rx_pipe(1, &[1, 2]),
            Err(Nrf24Error::InvalidAddressLength(2))
        );
        radio.open_rx_pipe(1, &[1, 2, 3, 4, 5]).unwrap();
        assert!(radio.pipe0_rx_addr.is_none());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn open_tx_pipe() {
        let mut expected_buf = [0x55u8; 6];
        expected_buf[0] = registers::TX_ADDR | commands::W_REGISTER;
        let mut p0_buf = [0x55u8; 6];
        p0_buf[0] = registers::RX_ADDR_P0 | commands::W_REGISTER;
        let mut response = [0u8; 6];
        response[0] = 0xEu8;
        let spi_expectations = spi_test_expects![
            // open_tx_pipe()
            (expected_buf.to_vec(), response.to_vec()),
            // set pipe 0 RX address for auto-ack packets
            (p0_buf.to_vec(), response.to_vec()),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let address = [0x55u8; 5];
        assert_eq!(
            radio.open_tx_pipe(&address[..4]),
            Err(Nrf24Error::InvalidAddressLength(4))
        );
        radio.open_tx_pipe(&address).unwrap();
        assert_eq!(radio.tx_address, address);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn close_rx_pipe() {
        let spi_expectations = spi_test_expects![
            // close_rx_pipe(0)
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 3u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.pipe0_rx_addr = Some([0x55; 5]);
        assert_eq!(radio.close_rx_pipe(9), Err(Nrf24Error::InvalidPipe(9)));
        radio.close_rx_pipe(0).unwrap();
        assert!(radio.pipe0_rx_addr.is_none());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn address_length() {
        let spi_expectations = spi_test_expects![
            // set_address_length(3)
            (
                vec![registers::SETUP_AW | commands::W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            // get_address_length()
            (vec![registers::SETUP_AW, 0u8], vec![0xEu8, 1u8]),
            // get_address_length() of an illegal value
            (vec![registers::SETUP_AW, 0u8], vec![0xEu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(
            radio.set_address_length(2),
            Err(Nrf24Error::InvalidAddressLength(2))
        );
        assert_eq!(
            radio.set_address_length(6),
            Err(Nrf24Error::InvalidAddressLength(6))
        );
        radio.set_address_length(3).unwrap();
        assert_eq!(radio.get_address_length().unwrap(), 3);
        assert_eq!(
            radio.get_address_length(),
            Err(Nrf24Error::BinaryCorruption)
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn read_back_addresses() {
        let spi_expectations = spi_test_expects![
            // get_rx_address(3)
            (
                vec![registers::RX_ADDR_P1, 0, 0, 0, 0, 0],
                vec![0xEu8, 0xC2, 0xB2, 0xB3, 0xB4, 0xB5],
            ),
            (vec![registers::RX_ADDR_P0 + 3, 0u8], vec![0xEu8, 0xC4]),
            // get_tx_address()
            (
                vec![registers::TX_ADDR, 0, 0, 0, 0, 0],
                vec![0xEu8, 1, 2, 3, 4, 5],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let mut address = [0u8; 5];
        assert_eq!(
            radio.get_rx_address(6, &mut address),
            Err(Nrf24Error::InvalidPipe(6))
        );
        assert_eq!(radio.get_rx_address(3, &mut address).unwrap(), 5);
        assert_eq!(address, [0xC4, 0xB2, 0xB3, 0xB4, 0xB5]);
        let mut address = [0u8; 3];
        assert_eq!(radio.get_tx_address(&mut address).unwrap(), 3);
        assert_eq!(address, [1, 2, 3]);
        spi.done();
        ce_pin.done();
    }
}
