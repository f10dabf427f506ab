//! Hardware Abstraction Layer
//!
//! Pin mapping tables, GPIO primitives and the shared-line board model.
//! Register access is confined to `port`; everything above it works on
//! logical pins through the [`gpio::Gpio`] trait so the bus drivers run
//! unchanged against a simulated board on the host.

pub mod adc;
pub mod board;
pub mod gpio;
pub mod pins;
pub mod poll;
pub mod tick;

#[cfg(feature = "embedded")]
pub mod delay;
#[cfg(feature = "embedded")]
pub mod port;
