//! Protocol constants shared with the registration record layout.
//!
//! Sizes and type codes here are fixed by the companion wire protocol;
//! changing any of them breaks compatibility with the controller.

/// Maximum number of channels a device may register.
pub const MAX_CHANNELS: usize = 32;

/// Width of the primary channel value in bytes.
pub const VALUE_SIZE: usize = 8;

/// Maximum size of an extended value payload in bytes.
pub const EXTENDED_VALUE_SIZE: usize = 1024;

/// Number of measurement samples carried by an electricity-meter reading.
pub const EM_MEASUREMENT_COUNT: usize = 5;

/// Encoded primary channel value.
pub type ChannelValue = [u8; VALUE_SIZE];

/// Channel type codes written into [`ChannelRecord::channel_type`](crate::registration::ChannelRecord).
pub struct ChannelType;

impl ChannelType {
    pub const UNSET: i32 = 0;
    pub const SENSOR_NO: i32 = 1000;
    pub const SENSOR_NC: i32 = 1010;
    pub const DISTANCE_SENSOR: i32 = 1020;
    pub const RELAY: i32 = 2900;
    pub const THERMOMETER: i32 = 3034;
    pub const HUMIDITY_SENSOR: i32 = 3036;
    pub const HUMIDITY_AND_TEMP_SENSOR: i32 = 3038;
    pub const WIND_SENSOR: i32 = 3042;
    pub const PRESSURE_SENSOR: i32 = 3044;
    pub const DIMMER: i32 = 4000;
    pub const RGB_LED_CONTROLLER: i32 = 4010;
    pub const DIMMER_AND_RGB_LED: i32 = 4020;
    pub const ELECTRICITY_METER: i32 = 5000;
    pub const IMPULSE_COUNTER: i32 = 5010;
}

/// Extended value type tags.
pub const EV_TYPE_ELECTRICITY_METER_MEASUREMENT_V1: u8 = 10;

// Electricity meter `measured_values` bits.
pub const EM_VAR_FREQ: u32 = 0x0001;
pub const EM_VAR_VOLTAGE: u32 = 0x0002;
pub const EM_VAR_CURRENT: u32 = 0x0004;
pub const EM_VAR_POWER_ACTIVE: u32 = 0x0008;
pub const EM_VAR_POWER_REACTIVE: u32 = 0x0010;
pub const EM_VAR_POWER_APPARENT: u32 = 0x0020;
pub const EM_VAR_POWER_FACTOR: u32 = 0x0040;
pub const EM_VAR_PHASE_ANGLE: u32 = 0x0080;
pub const EM_VAR_FORWARD_ACTIVE_ENERGY: u32 = 0x0100;
pub const EM_VAR_REVERSE_ACTIVE_ENERGY: u32 = 0x0200;
pub const EM_VAR_FORWARD_REACTIVE_ENERGY: u32 = 0x0400;
pub const EM_VAR_REVERSE_REACTIVE_ENERGY: u32 = 0x0800;

// Electricity meter standard value flags.
pub const EM_VALUE_FLAG_PHASE1_ON: u8 = 0x01;
pub const EM_VALUE_FLAG_PHASE2_ON: u8 = 0x02;
pub const EM_VALUE_FLAG_PHASE3_ON: u8 = 0x04;

/// Phase flags indexed by phase number.
pub const EM_PHASE_FLAGS: [u8; 3] = [
    EM_VALUE_FLAG_PHASE1_ON,
    EM_VALUE_FLAG_PHASE2_ON,
    EM_VALUE_FLAG_PHASE3_ON,
];

/// Kind-specific payload too large for the primary value buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedValue {
    /// One of the `EV_TYPE_*` tags.
    pub value_type: u8,
    /// Packed payload bytes.
    pub payload: heapless::Vec<u8, EXTENDED_VALUE_SIZE>,
}

impl ExtendedValue {
    /// Payload length in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
