//! Channel registry.
//!
//! Owns every channel and the registration record array. Capacity is a
//! compile-time bound (`N`, default [`MAX_CHANNELS`]); nothing is heap
//! allocated and nothing is ever removed, so traversal order is exactly
//! registration order for the lifetime of the registry.
//!
//! ```text
//!  register(kind) ──▶ ┌──────────────────────────────┐
//!                     │ channels:     [c0, c1, … cN) │
//!                     │ registration: [r0, r1, … rN) │ ◀── handshake
//!                     └──────────────────────────────┘
//! ```
//!
//! Index `i` in both arrays always refers to the same channel.

use heapless::Vec;
use log::{info, warn};

use crate::adapters::log_sink::LogObserver;
use crate::app::ports::{ChangeObserver, ValueTransport};
use crate::channel::{Channel, ChannelId, ChannelKind, ChannelMut};
use crate::dispatch;
use crate::error::{Error, Result};
use crate::proto::MAX_CHANNELS;
use crate::registration::DeviceRegistration;

/// Statically bounded collection of all channels.
pub struct ChannelRegistry<O: ChangeObserver = LogObserver, const N: usize = MAX_CHANNELS> {
    channels: Vec<Channel, N>,
    registration: DeviceRegistration<N>,
    observer: O,
    /// Registrations refused because the registry was full.
    rejected: u16,
}

impl<const N: usize> ChannelRegistry<LogObserver, N> {
    /// Registry that logs every accepted change.
    pub fn new() -> Self {
        Self::with_observer(LogObserver)
    }
}

impl<const N: usize> Default for ChannelRegistry<LogObserver, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ChangeObserver, const N: usize> ChannelRegistry<O, N> {
    pub fn with_observer(observer: O) -> Self {
        const { assert!(N <= u8::MAX as usize + 1, "channel numbers are u8") };
        Self {
            channels: Vec::new(),
            registration: DeviceRegistration::new(),
            observer,
            rejected: 0,
        }
    }

    // ── Registration ──────────────────────────────────────────

    /// Register a channel and assign it the next index.
    ///
    /// When the registry is full the channel is not registered, the
    /// registry remembers the overflow (see [`limit_exceeded`]) and
    /// [`Error::CapacityExceeded`] is returned.
    ///
    /// [`limit_exceeded`]: Self::limit_exceeded
    pub fn register(&mut self, kind: ChannelKind) -> Result<ChannelId> {
        let Some(number) = self.registration.allocate() else {
            self.rejected = self.rejected.saturating_add(1);
            warn!(
                "Channel limit exceeded ({} max), registration #{} dropped",
                N, self.rejected
            );
            return Err(Error::CapacityExceeded);
        };

        let id = ChannelId::new(number);
        let channel_type = kind.default_channel_type();
        if let Some(record) = self.registration.record_mut(number) {
            record.channel_type = channel_type;
        }
        info!("Channel({}) registered, type {}", id, channel_type);
        self.channels
            .push(Channel::new(id, kind))
            .map_err(|_| Error::CapacityExceeded)?;
        Ok(id)
    }

    /// Whether any registration was refused for lack of capacity.
    pub fn limit_exceeded(&self) -> bool {
        self.rejected > 0
    }

    /// Number of refused registrations.
    pub fn rejected_count(&self) -> u16 {
        self.rejected
    }

    pub fn capacity(&self) -> usize {
        N
    }

    // ── Traversal ─────────────────────────────────────────────

    /// First registered channel.
    pub fn head(&self) -> Option<&Channel> {
        self.channels.first()
    }

    /// Last registered channel.
    pub fn tail(&self) -> Option<&Channel> {
        self.channels.last()
    }

    /// The channel registered right after `id`.
    pub fn next(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(id.index() + 1)
    }

    pub fn count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channels in registration order.
    pub fn iter(&self) -> core::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Number of channels waiting to be dispatched.
    pub fn dirty_count(&self) -> usize {
        self.channels.iter().filter(|c| c.is_dirty()).count()
    }

    // ── Access ────────────────────────────────────────────────

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(id.index())
    }

    /// Mutable handle for setters and metadata.
    pub fn channel_mut(&mut self, id: ChannelId) -> Option<ChannelMut<'_, O>> {
        let channel = self.channels.get_mut(id.index())?;
        let record = self.registration.record_mut(id.number())?;
        Some(ChannelMut::new(channel, record, &mut self.observer))
    }

    /// Like [`channel_mut`](Self::channel_mut), but unknown ids are an error.
    pub fn try_channel_mut(&mut self, id: ChannelId) -> Result<ChannelMut<'_, O>> {
        self.channel_mut(id).ok_or(Error::UnknownChannel(id))
    }

    /// Channel type from the registration record.
    pub fn channel_type(&self, id: ChannelId) -> Option<i32> {
        self.registration.record(id.number()).map(|r| r.channel_type)
    }

    pub fn registration(&self) -> &DeviceRegistration<N> {
        &self.registration
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [Channel] {
        &mut self.channels
    }

    // ── Dirty flags and dispatch ──────────────────────────────

    /// Clear the dirty flag of every non-extended channel.
    ///
    /// Extended channels keep their flag; only an explicit
    /// [`send_update`](Self::send_update) clears it.
    pub fn clear_all_dirty(&mut self) {
        for channel in self.channels.iter_mut().filter(|c| !c.is_extended()) {
            channel.clear_dirty();
        }
    }

    /// Send one channel's state to `transport` and clear its dirty flag.
    pub fn send_update<T: ValueTransport>(&mut self, id: ChannelId, transport: &mut T) -> Result<()> {
        let channel = self
            .channels
            .get_mut(id.index())
            .ok_or(Error::UnknownChannel(id))?;
        dispatch::send_update(transport, channel);
        Ok(())
    }
}
