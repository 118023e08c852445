//! Change descriptions handed to the [`ChangeObserver`](super::ports::ChangeObserver).
//!
//! The observer sees the typed input that produced a change rather than
//! the raw bytes, so diagnostics can print meaningful values.

use crate::proto::ChannelValue;

/// The typed input behind an accepted value change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueChange {
    Double(f64),
    Float(f32),
    TemperatureHumidity { temperature: f64, humidity: f64 },
    Integer(i32),
    Bool(bool),
    Rgbw {
        red: u8,
        green: u8,
        blue: u8,
        color_brightness: u8,
        brightness: u8,
    },
    /// Electricity meter standard value (always reported, see
    /// [`ChannelMut::set_electricity_meter`](crate::channel::ChannelMut::set_electricity_meter)).
    ElectricityMeter { flags: u8, total_forward_active_energy: u32 },
    /// Pre-encoded bytes submitted directly.
    Raw(ChannelValue),
}
