// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # rcpwm Firmware
//!
//! This crate drives several RC-PWM actuators (hobby servos, ESCs) from one STM32F767 MCU and
//! exposes a line-based ASCII console over serial so a host can query and control any of them.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers around timer PWM channels and USART |
//! | [`drivers`] | Device-level drivers (RC servo / ESC) |
//! | [`control`] | Pulse conversion and the console control list |
//! | [`protocol`] | Console command parsing and dispatch |
//! | [`config`] | Board, buffer and device table constants |
//!
//! ## Console
//!
//! | Request | Reply |
//! | ------- | ----- |
//! | `S<n>` | set the selected device's pulse: `Set OK` |
//! | `R` | selected device's pulse |
//! | `H` | `ON` / `OFF` |
//! | `P`, `P0`, `P1` | `PIP:<0/1>`, or switch percent mode: `OK` |
//! | `C`, `CL`, `C<n>` | selected index, device listing, or select: `OK` |
//! | `T0`, `T<n>` | stop / start the selected device: `OK` |
//!
//! Failures reply `ERROR:<n>`; unknown commands get no reply.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
pub mod hw;
pub mod protocol;
