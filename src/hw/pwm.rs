// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Timer PWM output channel abstraction.
//!
//! Every HAL channel that implements the embedded-hal 0.2 `PwmPin` trait with a `u16` duty is a
//! [`PwmChannel`]. With the timer clocked at 1 MHz the compare value is the pulse width in
//! microseconds.

use embedded_hal::PwmPin;

/// One timer output line driving one actuator.
pub trait PwmChannel {
    /// Connect the compare output to its pin.
    fn enable_output(&mut self);

    /// Disconnect the compare output.
    fn disable_output(&mut self);

    /// Write the capture/compare register.
    fn set_compare_value(&mut self, value: u16);
}

impl<P> PwmChannel for P
where
    P: PwmPin<Duty = u16>,
{
    #[inline]
    fn enable_output(&mut self) {
        self.enable();
    }

    #[inline]
    fn disable_output(&mut self) {
        self.disable();
    }

    #[inline]
    fn set_compare_value(&mut self, value: u16) {
        self.set_duty(value);
    }
}
