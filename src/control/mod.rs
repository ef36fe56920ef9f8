// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Building Blocks
//!
//! ## Modules
//!
//! - [`pulse`] - Percent/microsecond pulse width conversion and clamping.
//! - [`control_list`] - Bounded registry of console-reachable devices with a selected entry.

pub mod control_list;
pub mod pulse;

pub use control_list::{ControlList, DeviceId};
pub use pulse::{PulseRange, PulseUnit};
