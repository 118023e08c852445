//! Registration record array.
//!
//! The device announces its channels to the controller with one record
//! per channel. The record layout belongs to the registration handshake;
//! the channel core only writes `value` and the metadata setters, and
//! reads `channel_type`/`number` back by index.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::proto::{ChannelValue, MAX_CHANNELS, VALUE_SIZE};

/// Wire-visible state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub number: u8,
    pub channel_type: i32,
    pub default: i32,
    /// Capability flags (ORed in by `set_flag`).
    pub flags: u32,
    /// Supported function bitmask.
    pub func_list: u32,
    pub value: ChannelValue,
}

impl ChannelRecord {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            channel_type: 0,
            default: 0,
            flags: 0,
            func_list: 0,
            value: [0; VALUE_SIZE],
        }
    }
}

/// Bounded record array, indexed by channel number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceRegistration<const N: usize = MAX_CHANNELS> {
    channels: Vec<ChannelRecord, N>,
}

impl<const N: usize> DeviceRegistration<N> {
    pub fn new() -> Self {
        Self { channels: Vec::new() }
    }

    /// Number of registered records.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Append the record for the next channel number.
    ///
    /// Returns `None` when the array is full.
    pub(crate) fn allocate(&mut self) -> Option<u8> {
        let number = self.channels.len() as u8;
        self.channels.push(ChannelRecord::new(number)).ok()?;
        Some(number)
    }

    pub fn record(&self, number: u8) -> Option<&ChannelRecord> {
        self.channels.get(number as usize)
    }

    pub(crate) fn record_mut(&mut self, number: u8) -> Option<&mut ChannelRecord> {
        self.channels.get_mut(number as usize)
    }

    pub fn records(&self) -> &[ChannelRecord] {
        &self.channels
    }
}
