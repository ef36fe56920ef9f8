// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pulse width conversion between percent and microseconds.
//!
//! All arithmetic is integer with truncating division, so `to_percent` of a converted value only
//! round-trips exactly at the range boundaries and at exact divisors.

/// Upper bound of the percent scale.
pub const PERCENT_MAX: i32 = 100;

/// Unit used to interpret and report pulse widths on the command protocol.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PulseUnit {
    /// Raw pulse width in microseconds.
    #[default]
    Microseconds,
    /// Pulse width as 0..=100 of the device's range.
    Percent,
}

/// Rejected pulse range (`min_us` must be strictly below `max_us`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RangeError {
    pub min_us: u16,
    pub max_us: u16,
}

/// Allowed pulse width window of a device, in microseconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PulseRange {
    min_us: u16,
    max_us: u16,
}

impl PulseRange {
    /// Build a range, rejecting empty or inverted windows.
    pub const fn new(min_us: u16, max_us: u16) -> Result<Self, RangeError> {
        if min_us < max_us {
            Ok(Self { min_us, max_us })
        } else {
            Err(RangeError { min_us, max_us })
        }
    }

    #[inline]
    pub const fn min_us(&self) -> u16 {
        self.min_us
    }

    #[inline]
    pub const fn max_us(&self) -> u16 {
        self.max_us
    }

    /// Clamp an arbitrary microsecond request into this range.
    #[inline]
    pub fn clamp(&self, value_us: i32) -> u16 {
        constrain(value_us, self.min_us as i32, self.max_us as i32) as u16
    }
}

/// Linear re-mapping of `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Division truncates toward zero. `in_min` and `in_max` must differ.
#[inline]
pub fn map(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Limit `val` to `[min, max]`.
#[inline]
pub fn constrain<T: PartialOrd>(val: T, min: T, max: T) -> T {
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Convert a percent request (clamped to 0..=100) into a pulse width inside `range`.
pub fn to_microseconds(percent: i32, range: PulseRange) -> u16 {
    let percent = constrain(percent, 0, PERCENT_MAX);
    map(
        percent,
        0,
        PERCENT_MAX,
        range.min_us as i32,
        range.max_us as i32,
    ) as u16
}

/// Convert a pulse width inside `range` into percent.
///
/// The input is assumed to be in range already; the result is not re-clamped.
pub fn to_percent(pulse_us: u16, range: PulseRange) -> i32 {
    map(
        pulse_us as i32,
        range.min_us as i32,
        range.max_us as i32,
        0,
        PERCENT_MAX,
    )
}
