// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Slave ID
pub type SlaveId = u8;

/// The address every device on the bus listens to.
pub const BROADCAST_SLAVE_ID: SlaveId = 0;

/// The identity of the addressed device.
///
/// The slave id may be reassigned at any time, e.g. to reuse one codec
/// for several devices on the same bus. The broadcast id is fixed once
/// the identity is created.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    slave: SlaveId,
    broadcast: SlaveId,
}

impl Device {
    #[must_use]
    pub const fn new(slave: SlaveId, broadcast: SlaveId) -> Self {
        Self { slave, broadcast }
    }

    /// A device that uses [`BROADCAST_SLAVE_ID`] for broadcasts.
    #[must_use]
    pub const fn with_default_broadcast(slave: SlaveId) -> Self {
        Self::new(slave, BROADCAST_SLAVE_ID)
    }

    #[must_use]
    pub const fn slave(&self) -> SlaveId {
        self.slave
    }

    pub fn set_slave(&mut self, slave: SlaveId) {
        self.slave = slave;
    }

    #[must_use]
    pub const fn broadcast(&self) -> SlaveId {
        self.broadcast
    }

    /// The address byte of a frame sent to (or received from) this device.
    #[must_use]
    pub const fn target(&self, broadcast: bool) -> SlaveId {
        if broadcast {
            self.broadcast
        } else {
            self.slave
        }
    }
}
