// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Console Protocol
//!
//! Line-based ASCII protocol used by a host to query and drive the RC outputs.
//!
//! ## Modules
//!
//! - [`messages`] - Command letters, parsed commands, replies and error codes.
//! - [`parser`] - Line assembly and command parsing.
//! - [`reply`] - Fixed-size transmit buffer.
//! - [`dispatch`] - Command execution against the device table and control list.

pub mod dispatch;
pub mod messages;
pub mod parser;
pub mod reply;

pub use dispatch::{Dispatcher, ReplySink};
pub use messages::{Command, ErrorCode};
pub use parser::{parse_line, LineReader};
pub use reply::ReplyBuffer;
