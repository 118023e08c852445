//! Outbox transport.
//!
//! Uses a bounded `embassy-sync` channel to hand notifications from the
//! dispatch cycle to the task that owns the controller link, without heap
//! allocation.
//!
//! ```text
//! ┌───────────────┐  Notification  ┌──────────────┐
//! │ Dispatch cycle│───────────────▶│  Link task   │
//! │ (sync)        │    OUTBOX      │  (drains)    │
//! └───────────────┘                └──────────────┘
//! ```
//!
//! A full outbox drops the notification. The dispatch layer is
//! fire-and-forget, so the only trace is the drop counter and a warning.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::ports::ValueTransport;
use crate::channel::ChannelId;
use crate::proto::{ChannelValue, ExtendedValue};

/// Outbox depth in notifications.
pub const OUTBOX_DEPTH: usize = 8;

/// One queued transport notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ValueChanged {
        channel: ChannelId,
        value: ChannelValue,
    },
    ExtendedValueChanged {
        channel: ChannelId,
        value: ExtendedValue,
    },
}

impl Notification {
    pub fn channel(&self) -> ChannelId {
        match self {
            Self::ValueChanged { channel, .. } | Self::ExtendedValueChanged { channel, .. } => *channel,
        }
    }
}

pub type Outbox = Channel<CriticalSectionRawMutex, Notification, OUTBOX_DEPTH>;

/// Default outbox: dispatch cycle → link task.
pub static OUTBOX: Outbox = Channel::new();

/// The outbox was full; the notification was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboxFull;

/// [`ValueTransport`] that enqueues into an [`Outbox`].
pub struct OutboxTransport {
    outbox: &'static Outbox,
    dropped: u32,
}

impl OutboxTransport {
    pub fn new(outbox: &'static Outbox) -> Self {
        Self { outbox, dropped: 0 }
    }

    /// Notifications dropped because the outbox was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn enqueue(&mut self, msg: Notification) -> Result<(), OutboxFull> {
        let channel = msg.channel();
        self.outbox.try_send(msg).map_err(|_| {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Outbox full, Channel({}) notification dropped", channel);
            OutboxFull
        })
    }
}

impl ValueTransport for OutboxTransport {
    type Error = OutboxFull;

    fn value_changed(&mut self, channel: ChannelId, value: &ChannelValue) -> Result<(), OutboxFull> {
        self.enqueue(Notification::ValueChanged {
            channel,
            value: *value,
        })
    }

    fn extended_value_changed(&mut self, channel: ChannelId, value: &ExtendedValue) -> Result<(), OutboxFull> {
        self.enqueue(Notification::ExtendedValueChanged {
            channel,
            value: value.clone(),
        })
    }
}

/// Drain all pending notifications into a callback, FIFO order.
pub fn drain(outbox: &Outbox, mut handler: impl FnMut(Notification)) {
    while let Ok(msg) = outbox.try_receive() {
        handler(msg);
    }
}
