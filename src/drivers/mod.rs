// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! console protocol.
//!
//! ## Existing drivers
//!
//! - [`rc_device`] – RC-PWM servo or ESC on one timer channel

pub mod rc_device;

pub use rc_device::Device;
