//! GPIO Primitives
//!
//! Direction, set, clear, toggle and read on logical pins. The trait is the
//! seam between the bus drivers and the port registers; on target it is
//! implemented by [`PortGpio`], on the host by a simulated board.
//!
//! No debouncing happens here and the operations assume a single execution
//! context.

use super::pins::{Direction, Pin};

/// Primitive pin operations
pub trait Gpio {
    /// Configure a pin as input or output
    fn set_direction(&mut self, pin: Pin, direction: Direction);

    /// Drive a pin high
    fn set_output(&mut self, pin: Pin);

    /// Drive a pin low
    fn clear_output(&mut self, pin: Pin);

    /// Invert the driven level
    fn toggle_output(&mut self, pin: Pin);

    /// Sample the input level
    fn read_input(&mut self, pin: Pin) -> bool;

    /// Drive a pin to the given level
    fn write(&mut self, pin: Pin, high: bool) {
        if high {
            self.set_output(pin);
        } else {
            self.clear_output(pin);
        }
    }
}

#[cfg(feature = "embedded")]
pub use self::target::PortGpio;

#[cfg(feature = "embedded")]
mod target {
    use core::marker::PhantomData;

    use super::Gpio;
    use crate::hal::pins::{Direction, Pin, PinMap};
    use crate::hal::port::PortRegisters;

    /// Register-backed GPIO for one board revision
    ///
    /// Pins the revision leaves unrouted are silently ignored and read low.
    pub struct PortGpio<B> {
        _board: PhantomData<B>,
    }

    impl<B: PinMap + PortRegisters> PortGpio<B> {
        /// Take ownership of the GPIO ports.
        ///
        /// Port clocks must already be enabled.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                _board: PhantomData,
            }
        }
    }

    impl<B: PinMap + PortRegisters> Default for PortGpio<B> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<B: PinMap + PortRegisters> Gpio for PortGpio<B> {
        fn set_direction(&mut self, pin: Pin, direction: Direction) {
            if let Some(p) = B::physical(pin) {
                B::set_direction(p, direction);
            }
        }

        fn set_output(&mut self, pin: Pin) {
            if let Some(p) = B::physical(pin) {
                B::set(p);
            }
        }

        fn clear_output(&mut self, pin: Pin) {
            if let Some(p) = B::physical(pin) {
                B::clear(p);
            }
        }

        fn toggle_output(&mut self, pin: Pin) {
            if let Some(p) = B::physical(pin) {
                B::toggle(p);
            }
        }

        fn read_input(&mut self, pin: Pin) -> bool {
            B::physical(pin).is_some_and(B::read)
        }
    }
}
