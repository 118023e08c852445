//! Channel entity and its typed setters.
//!
//! A [`Channel`] owns the encoded primary value and the dirty flag. It is
//! only mutated through a [`ChannelMut`] handle, which also borrows the
//! channel's registration record and the change observer so the
//! buffer/record mirror invariant holds after every accepted write.
//!
//! ## Change detection
//!
//! Simple setters encode into a fresh buffer and call
//! [`ChannelMut::try_set_value`], which compares byte-wise and only marks
//! the channel dirty when the bytes differ. The electricity meter setter
//! is the exception: it always marks the channel dirty, because the
//! extended reading may have changed even when the condensed standard
//! value did not.

use core::fmt;

use log::debug;

use crate::app::events::ValueChange;
use crate::app::ports::ChangeObserver;
use crate::codec;
use crate::error::Result;
use crate::meter::{self, ElectricityMeterReading};
use crate::proto::{ChannelType, ChannelValue, ExtendedValue, VALUE_SIZE};
use crate::registration::ChannelRecord;

/// Stable channel index, dense from 0 in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a channel carries. Closed set; every kind-dependent decision is
/// an exhaustive match.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelKind {
    /// On/off state (relays, contact sensors).
    Binary,
    /// Single real-valued measurement.
    Numeric,
    /// Integer state (counters, positions).
    Integer,
    /// Temperature + humidity pair.
    TemperatureHumidity,
    /// RGB colour with colour brightness and dimmer brightness.
    Rgbw,
    /// Electricity meter; carries the latest full reading.
    ElectricityMeter(ElectricityMeterReading),
}

impl ChannelKind {
    /// Electricity meter with an empty reading.
    pub fn electricity_meter() -> Self {
        Self::ElectricityMeter(ElectricityMeterReading::default())
    }

    /// Whether the kind carries an extended value.
    ///
    /// Extended channels are exempt from bulk dirty clearing.
    pub fn is_extended(&self) -> bool {
        match self {
            Self::ElectricityMeter(_) => true,
            Self::Binary | Self::Numeric | Self::Integer | Self::TemperatureHumidity | Self::Rgbw => {
                false
            }
        }
    }

    /// Build the extended payload, or `None` for kinds without one.
    pub fn extended_value(&self) -> Result<Option<ExtendedValue>> {
        match self {
            Self::ElectricityMeter(reading) => meter::encode_extended(reading).map(Some),
            Self::Binary | Self::Numeric | Self::Integer | Self::TemperatureHumidity | Self::Rgbw => {
                Ok(None)
            }
        }
    }

    /// Channel type written into the registration record at registration.
    pub fn default_channel_type(&self) -> i32 {
        match self {
            Self::Binary => ChannelType::RELAY,
            Self::Numeric => ChannelType::THERMOMETER,
            Self::Integer => ChannelType::UNSET,
            Self::TemperatureHumidity => ChannelType::HUMIDITY_AND_TEMP_SENSOR,
            Self::Rgbw => ChannelType::DIMMER_AND_RGB_LED,
            Self::ElectricityMeter(_) => ChannelType::ELECTRICITY_METER,
        }
    }
}

/// One registered channel.
#[derive(Debug, Clone)]
pub struct Channel {
    id: ChannelId,
    kind: ChannelKind,
    value: ChannelValue,
    dirty: bool,
}

impl Channel {
    pub(crate) fn new(id: ChannelId, kind: ChannelKind) -> Self {
        Self {
            id,
            kind,
            value: [0; VALUE_SIZE],
            dirty: false,
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn kind(&self) -> &ChannelKind {
        &self.kind
    }

    /// Current encoded primary value.
    pub fn value(&self) -> &ChannelValue {
        &self.value
    }

    /// Whether the channel has state the controller has not seen yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_extended(&self) -> bool {
        self.kind.is_extended()
    }

    pub fn extended_value(&self) -> Result<Option<ExtendedValue>> {
        self.kind.extended_value()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

/// Mutable view of a channel together with its registration record.
pub struct ChannelMut<'a, O: ChangeObserver> {
    channel: &'a mut Channel,
    record: &'a mut ChannelRecord,
    observer: &'a mut O,
}

impl<'a, O: ChangeObserver> ChannelMut<'a, O> {
    pub(crate) fn new(channel: &'a mut Channel, record: &'a mut ChannelRecord, observer: &'a mut O) -> Self {
        Self {
            channel,
            record,
            observer,
        }
    }

    pub fn id(&self) -> ChannelId {
        self.channel.id
    }

    pub fn channel(&self) -> &Channel {
        &*self.channel
    }

    pub fn record(&self) -> &ChannelRecord {
        &*self.record
    }

    // ── Change-detecting primitive ────────────────────────────

    /// Store `value` if it differs from the current bytes.
    ///
    /// Returns `true` (and marks the channel dirty) on change.
    pub fn try_set_value(&mut self, value: &ChannelValue) -> bool {
        self.commit(value, ValueChange::Raw(*value))
    }

    fn commit(&mut self, value: &ChannelValue, change: ValueChange) -> bool {
        if self.channel.value == *value {
            return false;
        }
        self.store(value);
        self.observer.value_changed(self.channel.id, &change);
        true
    }

    fn store(&mut self, value: &ChannelValue) {
        self.channel.value = *value;
        self.record.value = *value;
        self.channel.mark_dirty();
    }

    // ── Typed setters ─────────────────────────────────────────

    pub fn set_double(&mut self, value: f64) -> bool {
        self.commit(&codec::encode_double(value), ValueChange::Double(value))
    }

    pub fn set_float(&mut self, value: f32) -> bool {
        self.commit(&codec::encode_float(value), ValueChange::Float(value))
    }

    pub fn set_temperature_humidity(&mut self, temperature: f64, humidity: f64) -> bool {
        self.commit(
            &codec::encode_temperature_humidity(temperature, humidity),
            ValueChange::TemperatureHumidity {
                temperature,
                humidity,
            },
        )
    }

    pub fn set_integer(&mut self, value: i32) -> bool {
        self.commit(&codec::encode_integer(value), ValueChange::Integer(value))
    }

    pub fn set_bool(&mut self, value: bool) -> bool {
        self.commit(&codec::encode_bool(value), ValueChange::Bool(value))
    }

    pub fn set_rgbw(&mut self, red: u8, green: u8, blue: u8, color_brightness: u8, brightness: u8) -> bool {
        self.commit(
            &codec::encode_rgbw(red, green, blue, color_brightness, brightness),
            ValueChange::Rgbw {
                red,
                green,
                blue,
                color_brightness,
                brightness,
            },
        )
    }

    /// Publish a new electricity meter reading.
    ///
    /// Writes the condensed standard value and always marks the channel
    /// dirty, even when the reading is identical to the previous one.
    /// On a meter channel the reading is kept as the extended value.
    pub fn set_electricity_meter(&mut self, reading: &ElectricityMeterReading) {
        let value = meter::standard_value(reading);
        self.store(&value);

        match &mut self.channel.kind {
            ChannelKind::ElectricityMeter(current) => current.clone_from(reading),
            ChannelKind::Binary
            | ChannelKind::Numeric
            | ChannelKind::Integer
            | ChannelKind::TemperatureHumidity
            | ChannelKind::Rgbw => debug!(
                "Channel({}) is not a meter; extended reading dropped",
                self.channel.id
            ),
        }

        let (flags, total_forward_active_energy) = meter::decode_standard_value(&value);
        self.observer.value_changed(
            self.channel.id,
            &ValueChange::ElectricityMeter {
                flags,
                total_forward_active_energy,
            },
        );
    }

    // ── Dirty flag ────────────────────────────────────────────

    /// Force the channel to be sent on the next dispatch cycle.
    pub fn mark_dirty(&mut self) {
        self.channel.mark_dirty();
    }

    pub fn clear_dirty(&mut self) {
        self.channel.clear_dirty();
    }

    // ── Registration metadata ─────────────────────────────────

    pub fn set_type(&mut self, channel_type: i32) {
        self.record.channel_type = channel_type;
    }

    pub fn channel_type(&self) -> i32 {
        self.record.channel_type
    }

    pub fn set_default(&mut self, default: i32) {
        self.record.default = default;
    }

    /// OR `flag` into the capability flags.
    pub fn set_flag(&mut self, flag: u32) {
        self.record.flags |= flag;
    }

    pub fn set_func_list(&mut self, functions: u32) {
        self.record.func_list = functions;
    }
}
