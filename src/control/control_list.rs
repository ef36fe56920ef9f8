// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bounded registry of devices reachable from the serial console.
//!
//! The list keeps insertion order and never holds the same device twice. One device is the
//! "selected" target of console commands. The selection is stored separately from the list and is
//! allowed to go stale (e.g. after [`ControlList::remove`]); it is re-resolved every time the
//! selected index is queried, and a selected device is inserted on demand when the list is empty.
//!
//! Adding to a full list is silently ignored.

use core::fmt;

/// Handle naming one slot of the device table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DeviceId(u8);

impl DeviceId {
    #[inline]
    pub const fn new(slot: u8) -> Self {
        Self(slot)
    }

    /// Slot in the device table.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dev{}", self.0)
    }
}

/// Fixed-capacity ordered list of devices with a selected entry.
pub struct ControlList<const CAP: usize> {
    entries: [Option<DeviceId>; CAP],
    len: usize,
    selected: Option<DeviceId>,
}

impl<const CAP: usize> ControlList<CAP> {
    pub const fn new() -> Self {
        Self {
            entries: [None; CAP],
            len: 0,
            selected: None,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == CAP
    }

    /// Device at `index`, if listed.
    pub fn get(&self, index: usize) -> Option<DeviceId> {
        if index < self.len {
            self.entries[index]
        } else {
            None
        }
    }

    pub fn contains(&self, dev: DeviceId) -> bool {
        self.position(dev).is_some()
    }

    /// Selected device, which may not be listed.
    #[inline]
    pub fn selected(&self) -> Option<DeviceId> {
        self.selected
    }

    /// Register a device.
    ///
    /// The first device added to an empty list becomes selected unless a selection already
    /// exists. Later devices become selected only when the current selection does not resolve to
    /// a listed device.
    pub fn add(&mut self, dev: DeviceId) {
        if self.is_empty() {
            self.push(dev);
            if self.selected.is_none() {
                self.select_by_index(0);
            }
        } else if let Some(index) = self.push(dev) {
            if self.selected_index().is_none() {
                self.select_by_index(index);
            }
        }
    }

    /// Unregister a device, shifting later entries down.
    ///
    /// The selection is left untouched.
    pub fn remove(&mut self, dev: DeviceId) {
        let Some(index) = self.position(dev) else {
            return;
        };
        self.entries.copy_within(index + 1..self.len, index);
        self.len -= 1;
        self.entries[self.len] = None;
    }

    /// Position of the selected device in the list.
    ///
    /// If the list is empty, the selected device is inserted first.
    pub fn selected_index(&mut self) -> Option<usize> {
        self.insert_selected_if_empty();
        self.selected.and_then(|dev| self.position(dev))
    }

    /// Select the device at `index`. Out-of-range indices are ignored.
    ///
    /// If the list is empty, the selected device is inserted first.
    pub fn select_by_index(&mut self, index: usize) {
        self.insert_selected_if_empty();
        if let Some(dev) = self.get(index) {
            self.selected = Some(dev);
        }
    }

    /// Select a device directly, listed or not.
    #[inline]
    pub fn select_device(&mut self, dev: DeviceId) {
        self.selected = Some(dev);
    }

    /// `(index, device)` pairs in list order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, DeviceId)> + '_ {
        self.entries[..self.len]
            .iter()
            .enumerate()
            .filter_map(|(i, dev)| dev.map(|dev| (i, dev)))
    }

    fn position(&self, dev: DeviceId) -> Option<usize> {
        self.entries[..self.len]
            .iter()
            .position(|entry| *entry == Some(dev))
    }

    /// Append unless full or already present. Returns the new index.
    fn push(&mut self, dev: DeviceId) -> Option<usize> {
        if self.is_full() || self.contains(dev) {
            return None;
        }
        let index = self.len;
        self.entries[index] = Some(dev);
        self.len += 1;
        Some(index)
    }

    fn insert_selected_if_empty(&mut self) {
        if self.is_empty() {
            if let Some(dev) = self.selected {
                self.push(dev);
            }
        }
    }
}

impl<const CAP: usize> Default for ControlList<CAP> {
    fn default() -> Self {
        Self::new()
    }
}
