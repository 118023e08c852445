//! Bridges a dirty channel to the transport.
//!
//! Sending is fire-and-forget: transport errors are logged at debug level
//! and otherwise ignored, and the dirty flag is cleared whether or not
//! the sends succeeded.

use log::{debug, warn};

use crate::app::ports::ValueTransport;
use crate::channel::Channel;

/// Send `channel`'s primary value, then its extended value if the kind
/// has one, and clear the dirty flag.
pub fn send_update<T: ValueTransport>(transport: &mut T, channel: &mut Channel) {
    let id = channel.id();

    if let Err(e) = transport.value_changed(id, channel.value()) {
        debug!("Channel({}) value send failed: {:?}", id, e);
    }

    match channel.extended_value() {
        Ok(Some(ext)) => {
            if let Err(e) = transport.extended_value_changed(id, &ext) {
                debug!("Channel({}) extended value send failed: {:?}", id, e);
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Channel({}) extended value not encoded: {}", id, e),
    }

    channel.clear_dirty();
}
