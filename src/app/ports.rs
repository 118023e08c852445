//! Port traits: the boundary between the channel core and the outside world.
//!
//! ```text
//!   ChannelMut ──▶ ChangeObserver   (diagnostics)
//!   dispatch   ──▶ ValueTransport   (controller link)
//! ```
//!
//! Adapters in [`crate::adapters`] implement these traits; the core only
//! ever sees them through generics, so it stays a pure state machine over
//! bytes and is testable with recording mocks.

use crate::channel::ChannelId;
use crate::proto::{ChannelValue, ExtendedValue};

use super::events::ValueChange;

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: core → controller link)
// ───────────────────────────────────────────────────────────────

/// Outbound notifications towards the controller.
///
/// Both calls are fire-and-forget from the core's point of view: the
/// dispatcher never retries and never propagates a failure.
pub trait ValueTransport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// The primary value of `channel` changed.
    fn value_changed(&mut self, channel: ChannelId, value: &ChannelValue) -> Result<(), Self::Error>;

    /// The extended value of `channel` changed.
    fn extended_value_changed(
        &mut self,
        channel: ChannelId,
        value: &ExtendedValue,
    ) -> Result<(), Self::Error>;
}

/// A transport that discards every notification.
/// Useful before the controller link is up.
pub struct NullTransport;

impl ValueTransport for NullTransport {
    type Error = ();

    fn value_changed(&mut self, _channel: ChannelId, _value: &ChannelValue) -> Result<(), ()> {
        Ok(())
    }

    fn extended_value_changed(&mut self, _channel: ChannelId, _value: &ExtendedValue) -> Result<(), ()> {
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Change observer port (driven adapter: core → diagnostics)
// ───────────────────────────────────────────────────────────────

/// Invoked once for every accepted value change.
pub trait ChangeObserver {
    fn value_changed(&mut self, channel: ChannelId, change: &ValueChange);
}

/// Observer that ignores every change.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ChangeObserver for NoopObserver {
    fn value_changed(&mut self, _channel: ChannelId, _change: &ValueChange) {}
}
