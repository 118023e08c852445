//! Log-based adapters.
//!
//! [`LogObserver`] writes one debug record per accepted value change;
//! [`LogTransport`] logs every outbound notification instead of sending
//! it (bring-up and simulation).

use log::{debug, info};

use crate::app::events::ValueChange;
use crate::app::ports::{ChangeObserver, ValueTransport};
use crate::channel::ChannelId;
use crate::proto::{ChannelValue, ExtendedValue};

/// Adapter that logs every accepted change.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ChangeObserver for LogObserver {
    fn value_changed(&mut self, channel: ChannelId, change: &ValueChange) {
        match change {
            ValueChange::Double(v) => debug!("Channel({}) value changed to {}", channel, v),
            ValueChange::Float(v) => debug!("Channel({}) value changed to {}", channel, v),
            ValueChange::TemperatureHumidity {
                temperature,
                humidity,
            } => debug!(
                "Channel({}) value changed to temp({}), humi({})",
                channel, temperature, humidity
            ),
            ValueChange::Integer(v) => debug!("Channel({}) value changed to {}", channel, v),
            ValueChange::Bool(v) => debug!("Channel({}) value changed to {}", channel, u8::from(*v)),
            ValueChange::Rgbw {
                red,
                green,
                blue,
                color_brightness,
                brightness,
            } => debug!(
                "Channel({}) value changed to RGB({}, {}, {}), colBr({}), bright({})",
                channel, red, green, blue, color_brightness, brightness
            ),
            ValueChange::ElectricityMeter {
                flags,
                total_forward_active_energy,
            } => debug!(
                "Channel({}) meter value: energy={} flags=0b{:03b}",
                channel, total_forward_active_energy, flags
            ),
            ValueChange::Raw(bytes) => debug!("Channel({}) value changed to {:02X?}", channel, bytes),
        }
    }
}

/// Transport that logs notifications and never fails.
#[derive(Debug, Default)]
pub struct LogTransport {
    sent: u32,
}

impl LogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications logged so far.
    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl ValueTransport for LogTransport {
    type Error = core::convert::Infallible;

    fn value_changed(&mut self, channel: ChannelId, value: &ChannelValue) -> Result<(), Self::Error> {
        self.sent += 1;
        info!("VALUE | ch={} | {:02X?}", channel, value);
        Ok(())
    }

    fn extended_value_changed(
        &mut self,
        channel: ChannelId,
        value: &ExtendedValue,
    ) -> Result<(), Self::Error> {
        self.sent += 1;
        info!(
            "EXTVAL | ch={} | type={} size={}",
            channel,
            value.value_type,
            value.size()
        );
        Ok(())
    }
}
