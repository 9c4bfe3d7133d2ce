#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::init()`](radio/struct.Nrf24.html#method.init)
//! - [`Nrf24::start_listening()`](radio/struct.Nrf24.html#method.start_listening)
//! - [`Nrf24::stop_listening()`](radio/struct.Nrf24.html#method.stop_listening)
//! - [`Nrf24::open_tx_pipe()`](radio/struct.Nrf24.html#method.open_tx_pipe)
//! - [`Nrf24::open_rx_pipe()`](radio/struct.Nrf24.html#method.open_rx_pipe)
//! - [`Nrf24::close_rx_pipe()`](radio/struct.Nrf24.html#method.close_rx_pipe)
//! - [`Nrf24::available()`](radio/struct.Nrf24.html#method.available)
//! - [`Nrf24::available_pipe()`](radio/struct.Nrf24.html#method.available_pipe)
//! - [`Nrf24::read()`](radio/struct.Nrf24.html#method.read)
//! - [`Nrf24::send()`](radio/struct.Nrf24.html#method.send)
//! - [`Nrf24::set_channel()`](radio/struct.Nrf24.html#method.set_channel)
//! - [`Nrf24::get_channel()`](radio/struct.Nrf24.html#method.get_channel)
//!
//! ## Advanced API
//!
//! - [`Nrf24::write_ack_payload()`](radio/struct.Nrf24.html#method.write_ack_payload)
//! - [`Nrf24::take_ack_payload()`](radio/struct.Nrf24.html#method.take_ack_payload)
//! - [`Nrf24::write()`](radio/struct.Nrf24.html#method.write)
//! - [`Nrf24::what_happened()`](radio/struct.Nrf24.html#method.what_happened)
//! - [`Nrf24::get_fifo_state()`](radio/struct.Nrf24.html#method.get_fifo_state)
//! - [`Nrf24::clear_status_flags()`](radio/struct.Nrf24.html#method.clear_status_flags)
//! - [`Nrf24::update()`](radio/struct.Nrf24.html#method.update)
//! - [`Nrf24::get_status_flags()`](radio/struct.Nrf24.html#method.get_status_flags)
//! - [`Nrf24::flush_rx()`](radio/struct.Nrf24.html#method.flush_rx)
//! - [`Nrf24::flush_tx()`](radio/struct.Nrf24.html#method.flush_tx)
//! - [`Nrf24::rpd()`](fn@crate::radio::Nrf24::rpd)
//! - [`Nrf24::get_last_arc()`](radio/struct.Nrf24.html#method.get_last_arc)
//! - [`Nrf24::get_lost_packets()`](radio/struct.Nrf24.html#method.get_lost_packets)
//! - [`Nrf24::get_dynamic_payload_length()`](radio/struct.Nrf24.html#method.get_dynamic_payload_length)
//!
//! ## Configuration API
//!
//! - [`Nrf24::with_config()`](radio/struct.Nrf24.html#method.with_config)
//! - [`Nrf24::set_status_flags()`](radio/struct.Nrf24.html#method.set_status_flags)
//! - [`Nrf24::set_auto_ack()`](radio/struct.Nrf24.html#method.set_auto_ack)
//! - [`Nrf24::set_auto_ack_pipe()`](radio/struct.Nrf24.html#method.set_auto_ack_pipe)
//! - [`Nrf24::set_auto_retries()`](radio/struct.Nrf24.html#method.set_auto_retries)
//! - [`Nrf24::set_dynamic_payloads()`](radio/struct.Nrf24.html#method.set_dynamic_payloads)
//! - [`Nrf24::set_dynamic_payloads_pipe()`](radio/struct.Nrf24.html#method.set_dynamic_payloads_pipe)
//! - [`Nrf24::allow_ask_no_ack()`](radio/struct.Nrf24.html#method.allow_ask_no_ack)
//! - [`Nrf24::set_ack_payloads()`](radio/struct.Nrf24.html#method.set_ack_payloads)
//! - [`Nrf24::set_address_length()`](radio/struct.Nrf24.html#method.set_address_length)
//! - [`Nrf24::set_payload_length()`](radio/struct.Nrf24.html#method.set_payload_length)
//! - [`Nrf24::set_payload_length_pipe()`](radio/struct.Nrf24.html#method.set_payload_length_pipe)
//! - [`Nrf24::set_data_rate()`](radio/struct.Nrf24.html#method.set_data_rate)
//! - [`Nrf24::set_pa_level()`](radio/struct.Nrf24.html#method.set_pa_level)
//! - [`Nrf24::set_lna()`](fn@crate::radio::Nrf24::set_lna)
//! - [`Nrf24::set_crc_length()`](radio/struct.Nrf24.html#method.set_crc_length)
//! - [`Nrf24::power_up()`](radio/struct.Nrf24.html#method.power_up)
//! - [`Nrf24::power_down()`](radio/struct.Nrf24.html#method.power_down)
//! - [`Nrf24::tx_delay`](value@crate::radio::Nrf24::tx_delay)
//! - [`Nrf24::is_plus_variant()`](fn@crate::radio::Nrf24::is_plus_variant)
//!
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod types;
pub use types::{CrcLength, DataRate, FifoState, Mode, PaLevel, StatusFlags};
pub mod radio;
