// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Driver for RC-PWM actuators (hobby servos and ESCs).
//!
//! An RC device is commanded by the width of a periodic pulse, nominally 1000..2000 us repeated
//! every 20 ms. The driver holds a borrowed timer channel, remembers the last commanded pulse and
//! whether the output is engaged.
//!
//! Out-of-range requests are never rejected: they are clamped to the nearest valid pulse.

use crate::control::pulse::{self, PulseRange, PulseUnit};
use crate::hw::PwmChannel;

/// A single RC-PWM actuator bound to one timer channel.
pub struct Device<'d> {
    label: &'static str,
    channel: &'d mut dyn PwmChannel,
    range: PulseRange,
    /// Last commanded pulse (us), always inside `range`.
    pulse_us: u16,
    running: bool,
}

impl<'d> Device<'d> {
    /// Create a stopped device at the bottom of its range.
    pub fn new(label: &'static str, channel: &'d mut dyn PwmChannel, range: PulseRange) -> Self {
        Self {
            label,
            channel,
            range,
            pulse_us: range.min_us(),
            running: false,
        }
    }

    /// Set the pulse applied on the next [`start`](Self::start), clamped to the range.
    ///
    /// Does not touch the hardware.
    pub fn with_initial_pulse_us(mut self, pulse_us: u16) -> Self {
        self.pulse_us = self.range.clamp(pulse_us as i32);
        self
    }

    /// Engage the PWM output and apply the current pulse.
    pub fn start(&mut self) {
        self.channel.enable_output();
        self.channel.set_compare_value(self.pulse_us);
        self.running = true;
    }

    /// Disengage the PWM output.
    pub fn stop(&mut self) {
        self.channel.disable_output();
        self.running = false;
    }

    /// Command a new pulse width, interpreted in `unit`.
    ///
    /// The compare register is written even while the output is stopped.
    pub fn set_pulse(&mut self, value: i32, unit: PulseUnit) {
        self.pulse_us = match unit {
            PulseUnit::Percent => pulse::to_microseconds(value, self.range),
            PulseUnit::Microseconds => self.range.clamp(value),
        };
        self.channel.set_compare_value(self.pulse_us);
    }

    /// Current pulse width reported in `unit`.
    pub fn pulse(&self, unit: PulseUnit) -> i32 {
        match unit {
            PulseUnit::Percent => pulse::to_percent(self.pulse_us, self.range),
            PulseUnit::Microseconds => self.pulse_us as i32,
        }
    }

    #[inline]
    pub fn pulse_us(&self) -> u16 {
        self.pulse_us
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn range(&self) -> PulseRange {
        self.range
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Timer channel double recording the register state.
    #[derive(Default)]
    pub(crate) struct FakeChannel {
        pub enabled: bool,
        pub compare: Option<u16>,
        pub writes: usize,
    }

    impl embedded_hal::PwmPin for FakeChannel {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn get_duty(&self) -> u16 {
            self.compare.unwrap_or(0)
        }

        fn get_max_duty(&self) -> u16 {
            20_000
        }

        fn set_duty(&mut self, duty: u16) {
            self.compare = Some(duty);
            self.writes += 1;
        }
    }

    fn servo_range() -> PulseRange {
        PulseRange::new(1000, 2000).unwrap()
    }

    #[test]
    fn starts_stopped_at_min() {
        let mut ch = FakeChannel::default();
        let dev = Device::new("servo", &mut ch, servo_range());
        assert!(!dev.is_running());
        assert_eq!(dev.pulse_us(), 1000);
        assert_eq!(dev.label(), "servo");
    }

    #[test]
    fn initial_pulse_is_clamped_and_deferred() {
        let mut ch = FakeChannel::default();
        {
            let dev = Device::new("servo", &mut ch, servo_range()).with_initial_pulse_us(2500);
            assert_eq!(dev.pulse_us(), 2000);
        }
        assert_eq!(ch.compare, None);
    }

    #[test]
    fn start_applies_pulse_and_is_idempotent() {
        let mut ch = FakeChannel::default();
        {
            let mut dev =
                Device::new("servo", &mut ch, servo_range()).with_initial_pulse_us(1500);
            dev.start();
            dev.start();
            assert!(dev.is_running());
        }
        assert!(ch.enabled);
        assert_eq!(ch.compare, Some(1500));
        assert_eq!(ch.writes, 2);
    }

    #[test]
    fn stop_disables_output() {
        let mut ch = FakeChannel::default();
        {
            let mut dev = Device::new("servo", &mut ch, servo_range());
            dev.start();
            dev.stop();
            dev.stop();
            assert!(!dev.is_running());
        }
        assert!(!ch.enabled);
    }

    #[test]
    fn set_pulse_writes_register_while_stopped() {
        let mut ch = FakeChannel::default();
        {
            let mut dev = Device::new("servo", &mut ch, servo_range());
            dev.set_pulse(1234, PulseUnit::Microseconds);
            assert!(!dev.is_running());
        }
        assert_eq!(ch.compare, Some(1234));
        assert!(!ch.enabled);
    }

    #[test]
    fn microsecond_requests_are_clamped() {
        let mut ch = FakeChannel::default();
        let mut dev = Device::new("servo", &mut ch, servo_range());
        dev.set_pulse(500, PulseUnit::Microseconds);
        assert_eq!(dev.pulse(PulseUnit::Microseconds), 1000);
        dev.set_pulse(2600, PulseUnit::Microseconds);
        assert_eq!(dev.pulse(PulseUnit::Microseconds), 2000);
        dev.set_pulse(-1, PulseUnit::Microseconds);
        assert_eq!(dev.pulse(PulseUnit::Microseconds), 1000);
    }

    #[test]
    fn percent_requests_map_into_range() {
        let mut ch = FakeChannel::default();
        let mut dev = Device::new("servo", &mut ch, servo_range());
        dev.set_pulse(50, PulseUnit::Percent);
        assert_eq!(dev.pulse_us(), 1500);
        assert_eq!(dev.pulse(PulseUnit::Percent), 50);
        dev.set_pulse(250, PulseUnit::Percent);
        assert_eq!(dev.pulse_us(), 2000);
        assert_eq!(dev.pulse(PulseUnit::Percent), 100);
    }

    #[test]
    fn percent_read_of_microsecond_pulse_truncates() {
        let mut ch = FakeChannel::default();
        let mut dev = Device::new("servo", &mut ch, servo_range());
        dev.set_pulse(1999, PulseUnit::Microseconds);
        assert_eq!(dev.pulse(PulseUnit::Percent), 99);
    }
}
