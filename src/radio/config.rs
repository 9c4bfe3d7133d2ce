use crate::radio::nrf24::bit_fields::{Config, Feature, SetupRetry, SetupRf};
use crate::{CrcLength, DataRate, PaLevel};

/// The addresses of all pipes, and which RX pipes are open.
#[derive(Debug, Clone, Copy)]
struct PipeConfig {
    tx_address: [u8; 5],
    pipe0: [u8; 5],
    pipe1: [u8; 5],
    /// The first byte of the addresses on pipes 2 - 5.
    lsb: [u8; 4],
    rx_pipes_enabled: u8,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            tx_address: [0xE7; 5],
            pipe0: [0xE7; 5],
            pipe1: [0xC2; 5],
            lsb: [0xC3, 0xC4, 0xC5, 0xC6],
            rx_pipes_enabled: 2,
        }
    }
}

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use nrf24::radio::RadioConfig;
/// use nrf24::DataRate;
///
/// let config = RadioConfig::default()
///     .with_channel(40)
///     .with_data_rate(DataRate::Kbps250)
///     .with_rx_address(1, &[0xA2; 5])
///     .with_payload_length(8);
/// assert_eq!(config.channel(), 40);
/// assert!(config.is_rx_pipe_enabled(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) setup_rf: SetupRf,
    pub(crate) feature: Feature,
    channel: u8,
    payload_length: u8,
    auto_ack: u8,
    pipes: PipeConfig,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::address_length()`] | `5` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::lna_enable()`] | `true` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::payload_length()`] | `32` |
    /// | [`RadioConfig::dynamic_payloads()`] | `false` |
    /// | [`RadioConfig::auto_ack()`] | `0x3F` (enabled for pipes 0 - 5) |
    /// | [`RadioConfig::ack_payloads()`] | `false` |
    /// | [`RadioConfig::ask_no_ack()`] | `false` |
    /// | [`RadioConfig::auto_retry_delay()`] | `5` |
    /// | [`RadioConfig::auto_retry_count()`] | `15` |
    /// | [`RadioConfig::tx_address()`] | `[0xE7; 5]` |
    /// | [`RadioConfig::rx_dr()`] | `true` |
    /// | [`RadioConfig::tx_ds()`] | `true` |
    /// | [`RadioConfig::tx_df()`] | `true` |
    ///
    /// ## Default RX pipes' configuration
    ///
    /// | pipe number | state  | address     |
    /// |-------------|--------|-------------|
    /// |      0      | closed | `[0xE7; 5]` |
    /// |      1      | open   | `[0xC2; 5]` |
    /// |      2[^1]  | closed | `0xC3`      |
    /// |      3[^1]  | closed | `0xC4`      |
    /// |      4[^1]  | closed | `0xC5`      |
    /// |      5[^1]  | closed | `0xC6`      |
    ///
    /// [^1]: Pipes 2 - 5 share the upper bytes of the address on pipe 1.
    fn default() -> Self {
        Self {
            config_reg: Config::default(),
            auto_retries: SetupRetry::default(),
            setup_rf: SetupRf::default(),
            feature: Feature::default(),
            channel: 76,
            payload_length: 32,
            auto_ack: 0x3F,
            pipes: PipeConfig::default(),
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        match self.config_reg.crc_length() {
            Some(length) => length,
            None => CrcLength::Bit16,
        }
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// See [`RadioRf::set_crc_length()`](fn@crate::radio::prelude::RadioRf::set_crc_length).
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        Self {
            config_reg: self.config_reg.with_crc_length(length),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        match self.setup_rf.data_rate() {
            Some(data_rate) => data_rate,
            None => DataRate::Mbps1,
        }
    }

    /// The Data Rate (over the air).
    ///
    /// See [`RadioRf::set_data_rate()`](fn@crate::radio::prelude::RadioRf::set_data_rate).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self {
            setup_rf: self.setup_rf.with_data_rate(data_rate),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.setup_rf.pa_level()
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        Self {
            setup_rf: self.setup_rf.with_pa_level(level),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_lna_enable()`].
    pub const fn lna_enable(&self) -> bool {
        self.setup_rf.lna_enable()
    }

    /// Enable or disable the chip's Low Noise Amplifier (LNA) feature.
    ///
    /// Only older non-plus variants (and some clones) respect this.
    pub fn with_lna_enable(self, enable: bool) -> Self {
        Self {
            setup_rf: self.setup_rf.with_lna_enable(enable),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address_length()`].
    pub const fn address_length(&self) -> u8 {
        self.feature.address_length()
    }

    /// The address length used by all pipes.
    ///
    /// This value is clamped to range [3, 5].
    pub fn with_address_length(self, value: u8) -> Self {
        Self {
            feature: self.feature.with_address_length(value.clamp(3, 5)),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 125].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(125),
            ..self
        }
    }

    /// The auto-retry feature's `delay` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// The auto-retry feature's `count` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the auto-retry feature's `delay` and `count` parameters.
    ///
    /// See [`RadioAutoAck::set_auto_retries()`](fn@crate::radio::prelude::RadioAutoAck::set_auto_retries).
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        Self {
            auto_retries: self
                .auto_retries
                .with_ard(delay.min(15))
                .with_arc(count.min(15)),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_rx_dr()`].
    pub const fn rx_dr(&self) -> bool {
        !self.config_reg.mask_rx_dr()
    }

    /// Enable or disable the "RX Data Ready" event triggering the radio's IRQ.
    pub fn with_rx_dr(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_mask_rx_dr(!enable),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_tx_ds()`].
    pub const fn tx_ds(&self) -> bool {
        !self.config_reg.mask_tx_ds()
    }

    /// Enable or disable the "TX Data Sent" event triggering the radio's IRQ.
    pub fn with_tx_ds(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_mask_tx_ds(!enable),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_tx_df()`].
    pub const fn tx_df(&self) -> bool {
        !self.config_reg.mask_max_rt()
    }

    /// Enable or disable the "TX Data Failed" event triggering the radio's IRQ.
    pub fn with_tx_df(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_mask_max_rt(!enable),
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_ask_no_ack()`].
    pub const fn ask_no_ack(&self) -> bool {
        self.feature.ask_no_ack()
    }

    /// Allow disabling auto-ack per payload.
    ///
    /// See the `ask_no_ack` parameter of
    /// [`RadioTx::send()`](fn@crate::radio::prelude::RadioTx::send).
    pub fn with_ask_no_ack(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_ask_no_ack(enable),
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_dynamic_payloads()`].
    ///
    /// This feature is enabled automatically when enabling ACK payloads
    /// via [`RadioConfig::with_ack_payloads()`].
    pub const fn dynamic_payloads(&self) -> bool {
        self.feature.dynamic_payloads()
    }

    /// Enable or disable dynamically sized payloads on all pipes.
    ///
    /// Enabling this feature nullifies the utility of [`RadioConfig::payload_length()`].
    pub fn with_dynamic_payloads(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_dynamic_payloads(enable),
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Enable or disable auto-ACK feature.
    ///
    /// The given value (in binary form) is used to control the auto-ack feature for each pipe.
    /// Bit 0 controls the feature for pipe 0. Bit 1 controls the feature for pipe 1. And so on.
    ///
    /// Disabling auto-ack on pipe 0 also disables ACK payloads.
    pub fn with_auto_ack(self, enable: u8) -> Self {
        let feature = if enable & 1 == 0 {
            self.feature.with_ack_payloads(false)
        } else {
            self.feature
        };
        Self {
            auto_ack: enable & 0x3F,
            feature,
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_ack_payloads()`].
    pub const fn ack_payloads(&self) -> bool {
        self.feature.ack_payloads()
    }

    /// Enable or disable custom ACK payloads for auto-ACK packets.
    ///
    /// ACK payloads require the [`RadioConfig::auto_ack`] and [`RadioConfig::dynamic_payloads`]
    /// to be enabled. If ACK payloads are enabled, then this function also enables those
    /// features (for all pipes).
    pub fn with_ack_payloads(self, enable: bool) -> Self {
        let auto_ack = if enable { 0x3F } else { self.auto_ack };
        Self {
            auto_ack,
            feature: self.feature.with_ack_payloads(enable),
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_payload_length()`].
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    /// Set the static payload length for all pipes (clamped to 32).
    ///
    /// A length of 0 stops all pipes from receiving static payloads.
    pub fn with_payload_length(self, value: u8) -> Self {
        Self {
            payload_length: value.min(32),
            ..self
        }
    }

    /// Copy the TX address into `address`.
    pub fn tx_address(&self, address: &mut [u8]) {
        let len = address.len().min(5);
        address[..len].copy_from_slice(&self.pipes.tx_address[..len]);
    }

    /// Set the TX address (at most 5 bytes are used).
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let mut pipes = self.pipes;
        let len = address.len().min(5);
        pipes.tx_address[..len].copy_from_slice(&address[..len]);
        Self { pipes, ..self }
    }

    /// Copy the address of an RX `pipe` into `address`.
    ///
    /// The addresses of pipes 2 - 5 are composed from their first byte and
    /// the upper bytes of pipe 1's address. Invalid pipe numbers are ignored.
    pub fn rx_address(&self, pipe: u8, address: &mut [u8]) {
        let len = address.len().min(5);
        match pipe {
            0 => address[..len].copy_from_slice(&self.pipes.pipe0[..len]),
            1..=5 => address[..len].copy_from_slice(&self.pipes.pipe1[..len]),
            _ => return,
        }
        if pipe > 1 && len > 0 {
            address[0] = self.pipes.lsb[pipe as usize - 2];
        }
    }

    /// Set the address of an RX `pipe` and open it.
    ///
    /// Only the first byte of `address` is used for pipes 2 - 5.
    /// Invalid pipe numbers and empty addresses are ignored.
    pub fn with_rx_address(self, pipe: u8, address: &[u8]) -> Self {
        let len = address.len().min(5);
        if pipe > 5 || len == 0 {
            return self;
        }
        let mut pipes = self.pipes;
        match pipe {
            0 => pipes.pipe0[..len].copy_from_slice(&address[..len]),
            1 => pipes.pipe1[..len].copy_from_slice(&address[..len]),
            _ => pipes.lsb[pipe as usize - 2] = address[0],
        }
        pipes.rx_pipes_enabled |= 1 << pipe;
        Self { pipes, ..self }
    }

    /// Close an RX `pipe`. Its address is kept.
    pub fn close_rx_pipe(self, pipe: u8) -> Self {
        let mut pipes = self.pipes;
        if pipe < 6 {
            pipes.rx_pipes_enabled &= !(1 << pipe);
        }
        Self { pipes, ..self }
    }

    /// Is the given RX `pipe` open?
    pub const fn is_rx_pipe_enabled(&self, pipe: u8) -> bool {
        pipe < 6 && self.pipes.rx_pipes_enabled & (1 << pipe) > 0
    }

    /// All open RX pipes as a bit mask (bit 0 is pipe 0).
    pub(crate) const fn rx_pipes_enabled(&self) -> u8 {
        self.pipes.rx_pipes_enabled
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::RadioConfig;
    use crate::{CrcLength, DataRate, PaLevel};

    #[test]
    fn defaults() {
        let config = RadioConfig::default();
        assert_eq!(config.channel(), 76);
        assert_eq!(config.data_rate(), DataRate::Mbps1);
        assert_eq!(config.pa_level(), PaLevel::Max);
        assert_eq!(config.crc_length(), CrcLength::Bit16);
        assert_eq!(config.address_length(), 5);
        assert_eq!(config.payload_length(), 32);
        assert_eq!(config.auto_ack(), 0x3F);
        assert_eq!(config.auto_retry_delay(), 5);
        assert_eq!(config.auto_retry_count(), 15);
        assert!(config.lna_enable());
        assert!(config.rx_dr() && config.tx_ds() && config.tx_df());
        assert!(!config.dynamic_payloads());
        assert!(!config.ack_payloads());
        assert!(!config.ask_no_ack());
        assert_eq!(config.rx_pipes_enabled(), 2);
    }

    #[test]
    fn clamped_values() {
        let config = RadioConfig::default()
            .with_channel(200)
            .with_address_length(9)
            .with_auto_retries(20, 30)
            .with_payload_length(40);
        assert_eq!(config.channel(), 125);
        assert_eq!(config.address_length(), 5);
        assert_eq!(config.auto_retry_delay(), 15);
        assert_eq!(config.auto_retry_count(), 15);
        assert_eq!(config.payload_length(), 32);
        assert_eq!(config.with_address_length(1).address_length(), 3);
    }

    #[test]
    fn feature_dependencies() {
        let config = RadioConfig::default().with_auto_ack(0).with_ack_payloads(true);
        assert!(config.ack_payloads());
        assert!(config.dynamic_payloads());
        assert_eq!(config.auto_ack(), 0x3F);
        let config = config.with_dynamic_payloads(false);
        assert!(!config.ack_payloads());
        let config = config.with_ack_payloads(true).with_auto_ack(0x3E);
        assert!(!config.ack_payloads());
        assert!(config.dynamic_payloads());
    }

    #[test]
    fn irq_events() {
        let config = RadioConfig::default().with_tx_ds(false).with_rx_dr(false);
        assert!(!config.rx_dr() && !config.tx_ds() && config.tx_df());
        assert_eq!(config.config_reg.into_bits(), 0x6C);
    }

    #[test]
    fn pipe_addresses() {
        let config = RadioConfig::default()
            .with_rx_address(1, b"1Node")
            .with_rx_address(3, b"3")
            .with_rx_address(9, b"9Node")
            .with_tx_address(b"tx")
            .close_rx_pipe(1);
        assert!(config.is_rx_pipe_enabled(3));
        assert!(!config.is_rx_pipe_enabled(1));
        assert!(!config.is_rx_pipe_enabled(9));

        let mut address = [0u8; 5];
        config.rx_address(3, &mut address);
        assert_eq!(&address, b"3Node");
        config.rx_address(1, &mut address);
        assert_eq!(&address, b"1Node");
        config.tx_address(&mut address);
        assert_eq!(address, [b't', b'x', 0xE7, 0xE7, 0xE7]);
        config.rx_address(0, &mut address);
        assert_eq!(address, [0xE7; 5]);
    }
}
