//! Primary value codec.
//!
//! Every channel value travels as a fixed 8-byte buffer. The meaning of
//! the bytes depends on the channel's logical type:
//!
//! ```text
//!            0    1    2    3    4    5    6    7
//! double   │ IEEE-754 f64, little-endian              │
//! temp/hum │ temp × 1000 (i32 LE) │ hum × 1000 (i32 LE)│
//! integer  │ i32 LE              │ 0 …                │
//! bool     │ 0/1│ 0 …                                 │
//! rgbw     │ br │ cbr│ blue│ grn│ red│ 0 │ 0 │ 0       │
//! ```
//!
//! The RGBW byte order is reversed relative to argument order; the
//! controller decodes exactly this layout.

use crate::proto::{ChannelValue, VALUE_SIZE};

/// Encode an 8-byte double.
pub fn encode_double(value: f64) -> ChannelValue {
    value.to_le_bytes()
}

/// Encode a 4-byte float by widening it into the 8-byte double layout.
///
/// Targets without a native 8-byte double still have to put a full
/// double on the wire.
pub fn encode_float(value: f32) -> ChannelValue {
    float_to_double_packed(value)
}

/// Widen an `f32` into the little-endian bytes of the equivalent `f64`.
pub fn float_to_double_packed(value: f32) -> ChannelValue {
    f64::from(value).to_le_bytes()
}

/// Encode a temperature/humidity pair as two fixed-point (× 1000) i32s.
pub fn encode_temperature_humidity(temperature: f64, humidity: f64) -> ChannelValue {
    let mut out = [0u8; VALUE_SIZE];
    let t = (temperature * 1000.0) as i32;
    let h = (humidity * 1000.0) as i32;
    out[..4].copy_from_slice(&t.to_le_bytes());
    out[4..].copy_from_slice(&h.to_le_bytes());
    out
}

/// Encode an integer into the low four bytes.
pub fn encode_integer(value: i32) -> ChannelValue {
    let mut out = [0u8; VALUE_SIZE];
    out[..4].copy_from_slice(&value.to_le_bytes());
    out
}

/// Encode a boolean into byte 0.
pub fn encode_bool(value: bool) -> ChannelValue {
    let mut out = [0u8; VALUE_SIZE];
    out[0] = u8::from(value);
    out
}

/// Encode an RGB colour with colour brightness and overall brightness.
pub fn encode_rgbw(red: u8, green: u8, blue: u8, color_brightness: u8, brightness: u8) -> ChannelValue {
    let mut out = [0u8; VALUE_SIZE];
    out[0] = brightness;
    out[1] = color_brightness;
    out[2] = blue;
    out[3] = green;
    out[4] = red;
    out
}

/// Decode a temperature/humidity pair (inverse of
/// [`encode_temperature_humidity`], at 0.001 resolution).
pub fn decode_temperature_humidity(value: &ChannelValue) -> (f64, f64) {
    let t = i32::from_le_bytes([value[0], value[1], value[2], value[3]]);
    let h = i32::from_le_bytes([value[4], value[5], value[6], value[7]]);
    (f64::from(t) / 1000.0, f64::from(h) / 1000.0)
}

/// Decode a double value.
pub fn decode_double(value: &ChannelValue) -> f64 {
    f64::from_le_bytes(*value)
}
