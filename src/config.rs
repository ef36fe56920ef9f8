// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board and protocol configuration.
//!
//! Devices are wired to TIM4 CH1..CH4 (PD12..PD15) on the Nucleo-F767ZI. TIM4 runs at a 1 MHz
//! tick so the compare register holds the pulse width in microseconds.

use crate::control::pulse::PulseRange;

/// Maximum number of devices reachable from the console.
pub const CONTROL_LIST_CAPACITY: usize = 10;

/// Longest request line accepted, terminator excluded.
pub const RX_BUFFER_LEN: usize = 32;

/// Transmit buffer size; the `CL` listing is the longest reply.
pub const TX_BUFFER_LEN: usize = 256;

/// Command console on USART3 (ST-LINK virtual COM port).
pub const CONSOLE_BAUD: u32 = 115_200;

/// Debug trace on USART1.
pub const DEBUG_BAUD: u32 = 115_200;

/// PWM timer tick frequency.
pub const PWM_TICK_HZ: u32 = 1_000_000;

/// RC frame period (50 Hz).
pub const SERVO_FRAME_US: u32 = 20_000;

/// Static description of one RC output.
#[derive(Copy, Clone, Debug)]
pub struct DeviceConfig {
    /// Identity shown in the `CL` listing.
    pub label: &'static str,
    pub range: PulseRange,
    /// Pulse applied on the first start.
    pub initial_pulse_us: u16,
}

/// RC outputs in TIM4 channel order.
pub const DEVICES: [DeviceConfig; 4] = [
    DeviceConfig {
        label: "TIM4_CH1",
        range: range(1000, 2000),
        initial_pulse_us: 1500,
    },
    DeviceConfig {
        label: "TIM4_CH2",
        range: range(1000, 2000),
        initial_pulse_us: 1500,
    },
    // ESC: throttle closed at boot
    DeviceConfig {
        label: "TIM4_CH3",
        range: range(1000, 2000),
        initial_pulse_us: 1000,
    },
    // Wide-travel servo
    DeviceConfig {
        label: "TIM4_CH4",
        range: range(544, 2400),
        initial_pulse_us: 1472,
    },
];

/// Compile-time checked pulse range. An invalid table entry fails the build.
const fn range(min_us: u16, max_us: u16) -> PulseRange {
    match PulseRange::new(min_us, max_us) {
        Ok(range) => range,
        Err(_) => panic!("pulse range must satisfy min < max"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_fits_timer() {
        // The compare register is 16 bits wide.
        assert!(SERVO_FRAME_US <= u16::MAX as u32);
        for dev in DEVICES.iter() {
            assert!((dev.range.max_us() as u32) < SERVO_FRAME_US);
        }
    }

    #[test]
    fn initial_pulses_are_in_range() {
        for dev in DEVICES.iter() {
            assert!(dev.initial_pulse_us >= dev.range.min_us(), "{}", dev.label);
            assert!(dev.initial_pulse_us <= dev.range.max_us(), "{}", dev.label);
        }
    }

    #[test]
    fn full_listing_fits_tx_buffer() {
        let longest = DEVICES.iter().map(|d| d.label.len()).max().unwrap_or(0);
        // "<index> : <label>\n" with a two-digit index
        let line = 2 + 3 + longest + 1;
        assert!(line * CONTROL_LIST_CAPACITY <= TX_BUFFER_LEN);
    }

    #[test]
    fn table_fits_control_list() {
        assert!(DEVICES.len() <= CONTROL_LIST_CAPACITY);
        assert!(DEVICES.len() <= u8::MAX as usize);
    }
}
