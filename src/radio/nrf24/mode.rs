use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{RadioFifo, RadioMode, RadioPipes, RadioStatus},
        Nrf24,
    },
    Mode, StatusFlags,
};

use super::{registers, timing};

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Wait for the crystal oscillator after setting `PWR_UP`.
    ///
    /// The chip must pass through standby for Tpd2stby before CE may go HIGH.
    pub(super) fn wait_for_oscillator(&mut self, delay: Option<u32>) {
        match delay {
            Some(d) => {
                if d > 0 {
                    self.delay_impl.delay_us(d);
                }
            }
            None => self.delay_impl.delay_us(timing::POWER_UP_US),
        }
    }
}

impl<SPI, DO, DELAY> RadioMode for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn mode(&self) -> Mode {
        self.mode
    }

    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::Error> {
        if self.config_reg.pwr_up() {
            return Ok(());
        }
        self.config_reg.set_pwr_up(true);
        self.write_config()?;
        self.wait_for_oscillator(delay);
        self.set_mode(Mode::Standby);
        Ok(())
    }

    /// In power down mode the radio draws about 900nA. All register values
    /// are kept, so no configuration is lost.
    fn power_down(&mut self) -> Result<(), Self::Error> {
        self.set_ce(false)?;
        self.config_reg.set_pwr_up(false);
        self.write_config()?;
        self.set_mode(Mode::PowerDown);
        Ok(())
    }

    fn start_listening(&mut self) -> Result<(), Self::Error> {
        let was_powered = self.config_reg.pwr_up();
        self.config_reg = self.config_reg.with_pwr_up(true).with_prim_rx(true);
        self.write_config()?;
        if !was_powered {
            self.wait_for_oscillator(None);
        }
        self.clear_status_flags(StatusFlags::new())?;

        // open_tx_pipe() overwrote pipe 0's address, so put it back
        if let Some(address) = self.pipe0_rx_addr {
            let width = self.feature.address_length() as usize;
            self.spi_write_buf(registers::RX_ADDR_P0, &address[..width])?;
        } else {
            self.close_rx_pipe(0)?;
        }
        self.flush_rx()?;

        self.set_ce(true)?;
        self.set_mode(Mode::Rx);
        self.delay_impl.delay_us(timing::RX_SETTLE_US);
        Ok(())
    }

    /// CE is held LOW for [`Nrf24::tx_delay`] microseconds, so an ACK packet that
    /// is still going out can finish.
    ///
    /// If [`RadioMode::start_listening()`] put an RX address on pipe 0, the TX
    /// address is written back there.
    fn stop_listening(&mut self) -> Result<(), Self::Error> {
        self.set_ce(false)?;
        self.delay_impl.delay_us(self.tx_delay);
        if self.feature.ack_payloads() {
            // ACK payloads that were never requested are stale now
            self.flush_tx()?;
        }

        self.config_reg.set_prim_rx(false);
        self.write_config()?;

        // pipe 0 receives the auto-ack packets in TX mode
        if self.pipe0_rx_addr.is_some() {
            let width = self.feature.address_length() as usize;
            let address = self.tx_address;
            self.spi_write_buf(registers::RX_ADDR_P0, &address[..width])?;
        }
        self.update_register(registers::EN_RXADDR, |value| value | 1)?;
        self.set_mode(if self.config_reg.pwr_up() {
            Mode::Standby
        } else {
            Mode::PowerDown
        });
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, RadioMode};
    use crate::{
        radio::{nrf24::commands, prelude::RadioPipes},
        spi_test_expects,
        test::mk_radio,
        Mode,
    };
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;

    #[test]
    pub fn power_up() {
        let spi_expectations = spi_test_expects![
            // set the PWR_UP bit in CONFIG
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xEu8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.power_up(None).unwrap();
        assert_eq!(radio.mode(), Mode::Standby);
        assert!(radio.is_powered());
        // already powered up: nothing is sent
        radio.power_up(Some(0)).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn power_down() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // clear the PWR_UP bit in CONFIG
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xCu8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.config_reg.set_pwr_up(true);
        radio.mode = Mode::Standby;
        radio.power_down().unwrap();
        assert_eq!(radio.mode(), Mode::PowerDown);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn start_listening() {
        let ce_expectations = [PinTransaction::set(PinState::High)];
        let spi_expectations = spi_test_expects![
            // set PWR_UP and PRIM_RX together
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xFu8],
                vec![0xEu8, 0u8],
            ),
            // clear_status_flags()
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            // close_rx_pipe(0)
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 3u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
            // flush_rx()
            (vec![commands::FLUSH_RX], vec![0xEu8]),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.start_listening().unwrap();
        assert_eq!(radio.mode(), Mode::Rx);
        assert!(radio.is_listening());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn start_listening_restores_pipe0() {
        let ce_expectations = [PinTransaction::set(PinState::High)];

        let mut rx_address = [0x55u8; 6];
        rx_address[0] = registers::RX_ADDR_P0 | commands::W_REGISTER;
        let mut tx_address = [0xAAu8; 6];
        tx_address[0] = registers::TX_ADDR | commands::W_REGISTER;
        let mut tx_on_pipe0 = [0xAAu8; 6];
        tx_on_pipe0[0] = registers::RX_ADDR_P0 | commands::W_REGISTER;

        let spi_expectations = spi_test_expects![
            // open_rx_pipe(0)
            (rx_address.to_vec(), vec![0xEu8; 6]),
            (vec![registers::EN_AA, 0u8], vec![0xEu8, 0x3Eu8]),
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 2u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            // open_tx_pipe()
            (tx_address.to_vec(), vec![0xEu8; 6]),
            (tx_on_pipe0.to_vec(), vec![0xEu8; 6]),
            // start_listening() on a powered radio
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xFu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            // write cached pipe 0 address
            (rx_address.to_vec(), vec![0xEu8; 6]),
            (vec![commands::FLUSH_RX], vec![0xEu8]),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.config_reg.set_pwr_up(true);
        radio.mode = Mode::Standby;
        radio.open_rx_pipe(0, &[0x55u8; 5]).unwrap();
        radio.open_tx_pipe(&[0xAAu8; 5]).unwrap();
        radio.start_listening().unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn stop_listening() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // flush_tx() of stale ACK payloads
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            // clear PRIM_RX flag
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xEu8],
                vec![0xEu8, 0u8],
            ),
            // open pipe 0 for auto-ack packets
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 2u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.config_reg = radio.config_reg.with_pwr_up(true).with_prim_rx(true);
        radio.mode = Mode::Rx;
        radio.feature = radio.feature.with_ack_payloads(true);
        radio.stop_listening().unwrap();
        assert_eq!(radio.mode(), Mode::Standby);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn stop_listening_restores_tx_address() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let mut tx_on_pipe0 = [0xAAu8; 6];
        tx_on_pipe0[0] = registers::RX_ADDR_P0 | commands::W_REGISTER;
        let spi_expectations = spi_test_expects![
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xEu8],
                vec![0xEu8, 0u8],
            ),
            // the cached RX address is replaced by the TX address
            (tx_on_pipe0.to_vec(), vec![0xEu8; 6]),
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 3u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.config_reg = radio.config_reg.with_pwr_up(true).with_prim_rx(true);
        radio.mode = Mode::Rx;
        radio.pipe0_rx_addr = Some([0x55u8; 5]);
        radio.tx_address = [0xAAu8; 5];
        radio.stop_listening().unwrap();
        assert_eq!(radio.mode(), Mode::Standby);
        // still restored by the next start_listening()
        assert_eq!(radio.pipe0_rx_addr, Some([0x55u8; 5]));
        spi.done();
        ce_pin.done();
    }
}
