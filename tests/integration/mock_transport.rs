//! Recording mocks for integration tests.
//!
//! [`MockTransport`] keeps every notification so tests can assert on the
//! full send history; [`RecordingObserver`] does the same for accepted
//! value changes.

use chanval::app::events::ValueChange;
use chanval::app::ports::{ChangeObserver, ValueTransport};
use chanval::proto::{ChannelValue, ExtendedValue};
use chanval::ChannelId;

// ── Transport call record ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Value { channel: u8, value: ChannelValue },
    Extended { channel: u8, value_type: u8, size: usize },
}

// ── MockTransport ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockTransport {
    pub calls: Vec<TransportCall>,
    /// Make every send report failure.
    pub failing: bool,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, TransportCall::Value { .. }))
            .count()
    }

    pub fn extended_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, TransportCall::Extended { .. }))
            .count()
    }

    /// Channel numbers in send order (value notifications only).
    pub fn value_channels(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                TransportCall::Value { channel, .. } => Some(*channel),
                TransportCall::Extended { .. } => None,
            })
            .collect()
    }
}

impl ValueTransport for MockTransport {
    type Error = &'static str;

    fn value_changed(&mut self, channel: ChannelId, value: &ChannelValue) -> Result<(), Self::Error> {
        self.calls.push(TransportCall::Value {
            channel: channel.number(),
            value: *value,
        });
        if self.failing { Err("link down") } else { Ok(()) }
    }

    fn extended_value_changed(&mut self, channel: ChannelId, value: &ExtendedValue) -> Result<(), Self::Error> {
        self.calls.push(TransportCall::Extended {
            channel: channel.number(),
            value_type: value.value_type,
            size: value.size(),
        });
        if self.failing { Err("link down") } else { Ok(()) }
    }
}

// ── RecordingObserver ─────────────────────────────────────────

#[derive(Default)]
pub struct RecordingObserver {
    pub changes: Vec<(u8, ValueChange)>,
}

impl ChangeObserver for RecordingObserver {
    fn value_changed(&mut self, channel: ChannelId, change: &ValueChange) {
        self.changes.push((channel.number(), *change));
    }
}
