// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Console command set and reply vocabulary.
//!
//! Requests are single ASCII lines: one command letter followed by an optional argument.
//! Replies are ASCII lines terminated by `\n`.

use core::fmt;

// Command letters
pub const CMD_SET_PULSE: u8 = b'S';
pub const CMD_READ_PULSE: u8 = b'R';
pub const CMD_RUNNING: u8 = b'H';
pub const CMD_PERCENT_MODE: u8 = b'P';
pub const CMD_CONTROL_LIST: u8 = b'C';
pub const CMD_TOGGLE: u8 = b'T';

/// Argument of `C` requesting the device listing.
pub const ARG_LIST: u8 = b'L';

// Replies
pub const REPLY_SET_OK: &str = "Set OK";
pub const REPLY_OK: &str = "OK";
pub const REPLY_ON: &str = "ON";
pub const REPLY_OFF: &str = "OFF";
pub const REPLY_PERCENT_ON: &str = "PIP:1";
pub const REPLY_PERCENT_OFF: &str = "PIP:0";
pub const REPLY_ERROR_PREFIX: &str = "ERROR:";
pub const LIST_SEPARATOR: &str = " : ";
pub const LINE_END: &str = "\n";

/// Parsed console request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `S<n>`: set the selected device's pulse.
    SetPulse(i32),
    /// `R`: read the selected device's pulse.
    ReadPulse,
    /// `H`: report whether the selected device is running.
    QueryRunning,
    /// `P`: report percent mode.
    QueryPercentMode,
    /// `P0` / `P1`: switch percent mode.
    SetPercentMode(bool),
    /// `C`: report the selected index.
    QuerySelected,
    /// `CL`: list every registered device.
    ListDevices,
    /// `C<n>`: select by index.
    Select(i32),
    /// `T<n>`: stop (`0`) or start the selected device.
    SetRunning(i32),
}

/// Numbered error replies (`ERROR:<n>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// `S` without a value.
    MissingPulse = 0,
    /// `S` value is not a number.
    InvalidPulse = 1,
    /// `R` takes no argument.
    UnexpectedReadArgument = 2,
    /// `H` takes no argument.
    UnexpectedRunningArgument = 3,
    /// `P` argument other than 0 or 1.
    InvalidPercentMode = 4,
    /// `C` index not in the list.
    InvalidSelection = 5,
    /// `T` without a value.
    MissingRunState = 6,
    /// `T` value not a list index.
    InvalidRunState = 7,
    /// Nothing is selected, or the selection names no device.
    NoDeviceSelected = 8,
}

impl ErrorCode {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", REPLY_ERROR_PREFIX, self.code())
    }
}
