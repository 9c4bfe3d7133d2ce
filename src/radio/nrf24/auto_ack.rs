use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::RadioAutoAck, Nrf24, Nrf24Error};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> RadioAutoAck for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn set_ack_payloads(&mut self, enable: bool) -> Result<(), Self::Error> {
        if self.feature.ack_payloads() != enable {
            self.update_feature(|feature| feature.with_ack_payloads(enable))?;
            if enable {
                // Enable dynamic payload on all pipes
                self.write_dynpd(mnemonics::ALL_PIPES)?;
            }
            // else disable ack payloads, but leave dynamic payload features as is
        }
        Ok(())
    }

    fn get_ack_payloads(&self) -> bool {
        self.feature.ack_payloads()
    }

    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.spi_write_byte(registers::EN_AA, mnemonics::ALL_PIPES * enable as u8)?;
        self.feature.set_auto_ack(enable);
        // accommodate ACK payloads feature
        if !enable && self.feature.ack_payloads() {
            self.set_ack_payloads(false)?;
        }
        Ok(())
    }

    fn set_auto_ack_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::Error> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        let value = self.read_register(registers::EN_AA)?;
        if !enable && self.feature.ack_payloads() && pipe == 0 {
            self.set_ack_payloads(false)?;
        }
        if enable {
            self.feature.set_auto_ack(true);
        }
        let mask = 1 << pipe;
        self.spi_write_byte(registers::EN_AA, value & !mask | (mask * enable as u8))
    }

    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::Error> {
        self.retries = self.retries.with_ard(delay.min(15)).with_arc(count.min(15));
        self.spi_write_byte(registers::SETUP_RETR, self.retries.into_bits())
    }

    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.update_feature(|feature| feature.with_ask_no_ack(enable))
    }

    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::Error> {
        if self.feature.ack_payloads() && pipe <= 5 && !buf.is_empty() {
            self.spi_write_command(commands::W_ACK_PAYLOAD | pipe, buf)?;
            return Ok(!self.status.tx_full());
        }
        Ok(false)
    }

    fn take_ack_payload(&mut self) -> Option<u8> {
        self.ack_payload_length.take()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, mnemonics, registers, RadioAutoAck};
    use crate::{radio::Nrf24Error, spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn allow_ack_payloads() {
        let spi_expectations = spi_test_expects![
            // enable ACK payloads
            // read/write FEATURE register
            (vec![registers::FEATURE, 0u8], vec![0xEu8, 0u8]),
            (
                vec![
                    registers::FEATURE | commands::W_REGISTER,
                    mnemonics::EN_ACK_PAY | mnemonics::EN_DPL,
                ],
                vec![0xEu8, 0u8],
            ),
            // write DYNPD register
            (
                vec![registers::DYNPD | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            // disable ACK payloads
            // read/write FEATURE register
            (
                vec![registers::FEATURE, 0u8],
                vec![0xEu8, mnemonics::EN_ACK_PAY | mnemonics::EN_DPL],
            ),
            (
                vec![registers::FEATURE | commands::W_REGISTER, mnemonics::EN_DPL],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_ack_payloads(true).unwrap();
        assert!(radio.get_ack_payloads());
        // do again for region coverage (should result in Ok non-op)
        radio.set_ack_payloads(true).unwrap();
        radio.set_ack_payloads(false).unwrap();
        assert!(!radio.get_ack_payloads());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn set_auto_ack() {
        let spi_expectations = spi_test_expects![
            // disable auto-ack on all pipes
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
            // disable ACK payloads
            (
                vec![registers::FEATURE, 0u8],
                vec![0xEu8, mnemonics::EN_ACK_PAY | mnemonics::EN_DPL],
            ),
            (
                vec![registers::FEATURE | commands::W_REGISTER, mnemonics::EN_DPL],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.feature = radio.feature.with_ack_payloads(true);
        radio.set_auto_ack(false).unwrap();
        assert!(!radio.feature.auto_ack());
        assert!(!radio.get_ack_payloads());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn set_auto_ack_pipe() {
        let spi_expectations = spi_test_expects![
            // disable auto-ack on pipe 0
            (vec![registers::EN_AA, 0u8], vec![0xEu8, 0x3Fu8]),
            // disable ACK payloads
            (
                vec![registers::FEATURE, 0u8],
                vec![0xEu8, mnemonics::EN_ACK_PAY | mnemonics::EN_DPL],
            ),
            (
                vec![registers::FEATURE | commands::W_REGISTER, mnemonics::EN_DPL],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0x3Eu8],
                vec![0xEu8, 0u8],
            ),
            // enable auto-ack on pipe 1
            (vec![registers::EN_AA, 0u8], vec![0xEu8, 0u8]),
            (
                vec![registers::EN_AA | commands::W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.feature = radio.feature.with_ack_payloads(true);
        assert_eq!(
            radio.set_auto_ack_pipe(9, true),
            Err(Nrf24Error::InvalidPipe(9))
        );
        radio.set_auto_ack_pipe(0, false).unwrap();
        radio.set_auto_ack_pipe(1, true).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn set_auto_retries() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0xF3u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_auto_retries(20, 3).unwrap();
        assert_eq!(radio.retries.ard(), 15);
        assert_eq!(radio.retries.arc(), 3);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn allow_ask_no_ack() {
        let spi_expectations = spi_test_expects![
            // disable EN_DYN_ACK flag in FEATURE register
            (vec![registers::FEATURE, 0u8], vec![0xEu8, 7u8]),
            (
                vec![registers::FEATURE | commands::W_REGISTER, 6u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.allow_ask_no_ack(false).unwrap();
        assert!(radio.get_ack_payloads());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn write_ack_payload() {
        let mut buf = [0x55u8; 9];
        buf[0] = commands::W_ACK_PAYLOAD | 2;
        let spi_expectations = spi_test_expects![
            (buf.to_vec(), vec![0xEu8; 9]),
            // a full TX FIFO after the upload
            (buf.to_vec(), vec![0xFu8; 9]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let payload = [0x55u8; 8];
        // ACK payloads are disabled
        assert!(!radio.write_ack_payload(2, &payload).unwrap());
        radio.feature = radio.feature.with_ack_payloads(true);
        assert!(!radio.write_ack_payload(6, &payload).unwrap());
        assert!(!radio.write_ack_payload(2, &[]).unwrap());
        assert!(radio.write_ack_payload(2, &payload).unwrap());
        assert!(!radio.write_ack_payload(2, &payload).unwrap());
        assert_eq!(radio.take_ack_payload(), None);
        radio.ack_payload_length = Some(4);
        assert_eq!(radio.take_ack_payload(), Some(4));
        assert_eq!(radio.take_ack_payload(), None);
        spi.done();
        ce_pin.done();
    }
}
