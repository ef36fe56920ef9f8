// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Console command dispatcher.
//!
//! [`Dispatcher`] owns everything the console can reach: the device table, the control list and
//! the pulse unit (percent mode). One line is parsed, executed and answered per call; handlers take
//! `&mut self`, so a request can never start while another is still being processed.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut dispatcher = Dispatcher::new(&mut devices);
//! dispatcher.register_all();
//!
//! loop {
//!     if let Some(line) = reader.push(usart.read_byte()?) {
//!         dispatcher.receive(line, &mut usart);
//!     }
//! }
//! ```

use core::fmt::Write;

use crate::config::{CONTROL_LIST_CAPACITY, TX_BUFFER_LEN};
use crate::control::control_list::{ControlList, DeviceId};
use crate::control::pulse::PulseUnit;
use crate::drivers::Device;
use crate::protocol::messages::*;
use crate::protocol::parser::parse_line;
use crate::protocol::reply::ReplyBuffer;

/// Outbound half of the console transport.
pub trait ReplySink {
    /// Transmit one complete reply.
    fn send(&mut self, bytes: &[u8]);
}

/// Console state and command execution.
pub struct Dispatcher<'a, 'd> {
    devices: &'a mut [Device<'d>],
    list: ControlList<CONTROL_LIST_CAPACITY>,
    unit: PulseUnit,
    tx: ReplyBuffer<TX_BUFFER_LEN>,
}

impl<'a, 'd> Dispatcher<'a, 'd> {
    /// Create a dispatcher over `devices`. Slot `i` of the table is `DeviceId::new(i)`.
    ///
    /// The control list starts empty and percent mode off.
    pub fn new(devices: &'a mut [Device<'d>]) -> Self {
        Self {
            devices,
            list: ControlList::new(),
            unit: PulseUnit::Microseconds,
            tx: ReplyBuffer::new(),
        }
    }

    /// Ids of every device in the table.
    pub fn device_ids(&self) -> impl Iterator<Item = DeviceId> {
        let count = self.devices.len().min(u8::MAX as usize + 1);
        (0..count).map(|slot| DeviceId::new(slot as u8))
    }

    /// Add every device in the table to the control list, in table order.
    pub fn register_all(&mut self) {
        for slot in 0..self.devices.len().min(u8::MAX as usize + 1) {
            self.list.add(DeviceId::new(slot as u8));
        }
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device<'d>> {
        self.devices.get(id.slot())
    }

    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device<'d>> {
        self.devices.get_mut(id.slot())
    }

    #[inline]
    pub fn control_list(&self) -> &ControlList<CONTROL_LIST_CAPACITY> {
        &self.list
    }

    #[inline]
    pub fn control_list_mut(&mut self) -> &mut ControlList<CONTROL_LIST_CAPACITY> {
        &mut self.list
    }

    #[inline]
    pub fn pulse_unit(&self) -> PulseUnit {
        self.unit
    }

    #[inline]
    pub fn set_pulse_unit(&mut self, unit: PulseUnit) {
        self.unit = unit;
    }

    /// Handle one received line and transmit the reply, if any.
    pub fn receive<S: ReplySink>(&mut self, line: &[u8], sink: &mut S) {
        if let Some(reply) = self.handle_line(line) {
            if !reply.is_empty() {
                sink.send(reply);
            }
        }
    }

    /// Handle one received line.
    ///
    /// Returns `None` for lines that get no reply (empty or unknown command). The reply of a
    /// `CL` listing over an empty list is an empty slice.
    pub fn handle_line(&mut self, line: &[u8]) -> Option<&[u8]> {
        let request = parse_line(line)?;
        self.tx.clear();

        if let Err(err) = request.and_then(|cmd| self.execute(cmd)) {
            self.tx.clear();
            self.reply_error(err);
        }

        Some(self.tx.as_bytes())
    }

    /// Execute a parsed command, writing its reply into the transmit buffer.
    ///
    /// On error nothing has been mutated and the caller replies with the error code.
    pub fn execute(&mut self, cmd: Command) -> Result<(), ErrorCode> {
        match cmd {
            Command::SetPulse(value) => {
                let unit = self.unit;
                self.selected_device_mut()?.set_pulse(value, unit);
                self.reply_line(REPLY_SET_OK);
            }
            Command::ReadPulse => {
                let pulse = self.selected_device()?.pulse(self.unit);
                self.reply_int(pulse);
            }
            Command::QueryRunning => {
                let running = self.selected_device()?.is_running();
                self.reply_line(if running { REPLY_ON } else { REPLY_OFF });
            }
            Command::QueryPercentMode => {
                let reply = match self.unit {
                    PulseUnit::Percent => REPLY_PERCENT_ON,
                    PulseUnit::Microseconds => REPLY_PERCENT_OFF,
                };
                self.reply_line(reply);
            }
            Command::SetPercentMode(on) => {
                self.unit = if on {
                    PulseUnit::Percent
                } else {
                    PulseUnit::Microseconds
                };
                self.reply_line(REPLY_OK);
            }
            Command::QuerySelected => {
                let index = self.list.selected_index().map_or(-1, |i| i as i32);
                self.reply_int(index);
            }
            Command::ListDevices => self.reply_listing(),
            Command::Select(index) => {
                let index = self.listed_index(index).ok_or(ErrorCode::InvalidSelection)?;
                self.list.select_by_index(index);
                self.reply_line(REPLY_OK);
            }
            Command::SetRunning(state) => {
                self.listed_index(state).ok_or(ErrorCode::InvalidRunState)?;
                let id = self
                    .list
                    .selected_index()
                    .and_then(|i| self.list.get(i))
                    .ok_or(ErrorCode::NoDeviceSelected)?;
                let dev = self
                    .devices
                    .get_mut(id.slot())
                    .ok_or(ErrorCode::NoDeviceSelected)?;
                if state != 0 {
                    dev.start();
                } else {
                    dev.stop();
                }
                self.reply_line(REPLY_OK);
            }
        }
        Ok(())
    }

    /// `value` as an index into the list as it currently stands.
    fn listed_index(&self, value: i32) -> Option<usize> {
        usize::try_from(value).ok().filter(|&i| i < self.list.len())
    }

    fn selected_device(&self) -> Result<&Device<'d>, ErrorCode> {
        self.list
            .selected()
            .and_then(|id| self.devices.get(id.slot()))
            .ok_or(ErrorCode::NoDeviceSelected)
    }

    fn selected_device_mut(&mut self) -> Result<&mut Device<'d>, ErrorCode> {
        let id = self.list.selected().ok_or(ErrorCode::NoDeviceSelected)?;
        self.devices
            .get_mut(id.slot())
            .ok_or(ErrorCode::NoDeviceSelected)
    }

    // Single-line replies always fit the transmit buffer.

    fn reply_line(&mut self, s: &str) {
        let _ = self.tx.push_str(s);
        let _ = self.tx.push_str(LINE_END);
    }

    fn reply_int(&mut self, n: i32) {
        let _ = self.tx.push_int(n);
        let _ = self.tx.push_str(LINE_END);
    }

    fn reply_error(&mut self, err: ErrorCode) {
        let _ = write!(self.tx, "{err}{LINE_END}");
    }

    /// One `index : label` line per listed device, stopping at the first line that does not fit.
    fn reply_listing(&mut self) {
        for (index, id) in self.list.iter() {
            let mark = self.tx.len();
            let line = match self.devices.get(id.slot()) {
                Some(dev) => write!(self.tx, "{index}{LIST_SEPARATOR}{}{LINE_END}", dev.label()),
                None => write!(self.tx, "{index}{LIST_SEPARATOR}{id}{LINE_END}"),
            };

            if line.is_err() {
                self.tx.truncate(mark);
                break;
            }
        }
    }
}
