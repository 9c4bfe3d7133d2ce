mod config;
pub use config::RadioConfig;
mod nrf24;
pub use nrf24::{commands, mnemonics, registers, timing, Nrf24, Nrf24Error};
pub mod prelude;
