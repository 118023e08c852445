//! Electricity meter readings.
//!
//! A meter reading is far larger than the 8-byte primary value, so it
//! travels twice: a condensed standard value (total energy + phase flags)
//! in the primary buffer, and the full reading as an extended value.
//!
//! Standard value layout (packed, little-endian):
//! ```text
//! ┌───────┬──────────────────────────────┬───────────┐
//! │ flags │ total_forward_active_energy  │ 0  0  0   │
//! │  u8   │ u32 (0.01 kWh)               │           │
//! └───────┴──────────────────────────────┴───────────┘
//! ```
//!
//! Energy counters are in 0.00001 kWh, hence the division by 1000.

use heapless::{Deque, Vec};

use crate::error::{Error, Result};
use crate::proto::{
    ChannelValue, EM_MEASUREMENT_COUNT, EM_PHASE_FLAGS, EM_VAR_VOLTAGE,
    EV_TYPE_ELECTRICITY_METER_MEASUREMENT_V1, EXTENDED_VALUE_SIZE, ExtendedValue, VALUE_SIZE,
};

/// One sample of per-phase measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Measurement {
    /// 0.01 Hz
    pub freq: u16,
    /// 0.01 V
    pub voltage: [u16; 3],
    /// 0.001 A
    pub current: [u16; 3],
    /// 0.00001 W
    pub power_active: [i32; 3],
    /// 0.00001 var
    pub power_reactive: [i32; 3],
    /// 0.00001 VA
    pub power_apparent: [i32; 3],
    /// 0.001
    pub power_factor: [i16; 3],
    /// 0.1 degree
    pub phase_angle: [i16; 3],
}

/// Full electricity meter reading (extended value, V1 layout).
#[derive(Debug, Clone, Default)]
pub struct ElectricityMeterReading {
    pub total_forward_active_energy: [u64; 3],
    pub total_reverse_active_energy: [u64; 3],
    pub total_forward_reactive_energy: [u64; 3],
    pub total_reverse_reactive_energy: [u64; 3],
    pub total_cost: i32,
    pub price_per_unit: i32,
    pub currency: [u8; 3],
    /// `EM_VAR_*` bitmask of the quantities the meter actually measures.
    pub measured_values: u32,
    /// Seconds covered by the measurement history.
    pub period: u32,
    /// Measurement history, oldest first.
    pub measurements: Deque<Measurement, EM_MEASUREMENT_COUNT>,
}

impl PartialEq for ElectricityMeterReading {
    fn eq(&self, other: &Self) -> bool {
        self.total_forward_active_energy == other.total_forward_active_energy
            && self.total_reverse_active_energy == other.total_reverse_active_energy
            && self.total_forward_reactive_energy == other.total_forward_reactive_energy
            && self.total_reverse_reactive_energy == other.total_reverse_reactive_energy
            && self.total_cost == other.total_cost
            && self.price_per_unit == other.price_per_unit
            && self.currency == other.currency
            && self.measured_values == other.measured_values
            && self.period == other.period
            && self.measurements.iter().eq(other.measurements.iter())
    }
}

impl Eq for ElectricityMeterReading {}

impl ElectricityMeterReading {
    /// Append a sample, evicting the oldest when the history is full.
    pub fn push_measurement(&mut self, m: Measurement) {
        if let Err(m) = self.measurements.push_back(m) {
            self.measurements.pop_front();
            let pushed = self.measurements.push_back(m);
            debug_assert!(pushed.is_ok(), "eviction frees a slot");
        }
    }

    /// Most recent sample, if any.
    pub fn last_measurement(&self) -> Option<&Measurement> {
        self.measurements.back()
    }

    /// Phase-on flags derived from the most recent voltage sample.
    ///
    /// Zero unless the meter reports voltage and at least one sample exists.
    pub fn phase_flags(&self) -> u8 {
        if self.measured_values & EM_VAR_VOLTAGE == 0 {
            return 0;
        }
        let Some(m) = self.last_measurement() else {
            return 0;
        };
        m.voltage
            .iter()
            .zip(EM_PHASE_FLAGS)
            .filter(|(v, _)| **v > 0)
            .fold(0, |flags, (_, bit)| flags | bit)
    }

    /// Sum of the forward active energy counters in 0.01 kWh.
    pub fn total_forward_active_energy(&self) -> u32 {
        let sum = self
            .total_forward_active_energy
            .iter()
            .fold(0u64, |acc, e| acc.wrapping_add(*e));
        (sum / 1000) as u32
    }
}

/// Condense a reading into the 8-byte standard value.
pub fn standard_value(reading: &ElectricityMeterReading) -> ChannelValue {
    let mut out = [0u8; VALUE_SIZE];
    out[0] = reading.phase_flags();
    out[1..5].copy_from_slice(&reading.total_forward_active_energy().to_le_bytes());
    out
}

/// Split a standard value back into `(flags, total_forward_active_energy)`.
pub fn decode_standard_value(value: &ChannelValue) -> (u8, u32) {
    (value[0], u32::from_le_bytes([value[1], value[2], value[3], value[4]]))
}

/// Fixed part of the packed V1 layout, before the measurement array.
pub const HEADER_LEN: usize = 4 * 3 * 8 + 4 + 4 + 3 + 4 + 4 + 1;
/// One packed measurement.
pub const MEASUREMENT_LEN: usize = 2 + 6 + 6 + 3 * 12 + 6 + 6;

const _: () = assert!(
    HEADER_LEN + EM_MEASUREMENT_COUNT * MEASUREMENT_LEN <= EXTENDED_VALUE_SIZE,
    "a full meter reading must fit one extended value"
);

/// Pack a reading into its extended value.
///
/// Only the first `measurements.len()` samples are written; the controller
/// reads `m_count` to know how many follow.
pub fn encode_extended(reading: &ElectricityMeterReading) -> Result<ExtendedValue> {
    let mut w = PackedWriter::default();

    for counters in [
        &reading.total_forward_active_energy,
        &reading.total_reverse_active_energy,
        &reading.total_forward_reactive_energy,
        &reading.total_reverse_reactive_energy,
    ] {
        for c in counters {
            w.put(&c.to_le_bytes())?;
        }
    }
    w.put(&reading.total_cost.to_le_bytes())?;
    w.put(&reading.price_per_unit.to_le_bytes())?;
    w.put(&reading.currency)?;
    w.put(&reading.measured_values.to_le_bytes())?;
    w.put(&reading.period.to_le_bytes())?;
    w.put(&[reading.measurements.len() as u8])?;

    for m in reading.measurements.iter() {
        w.put(&m.freq.to_le_bytes())?;
        for v in m.voltage {
            w.put(&v.to_le_bytes())?;
        }
        for c in m.current {
            w.put(&c.to_le_bytes())?;
        }
        for group in [&m.power_active, &m.power_reactive, &m.power_apparent] {
            for p in group {
                w.put(&p.to_le_bytes())?;
            }
        }
        for group in [&m.power_factor, &m.phase_angle] {
            for p in group {
                w.put(&p.to_le_bytes())?;
            }
        }
    }

    Ok(ExtendedValue {
        value_type: EV_TYPE_ELECTRICITY_METER_MEASUREMENT_V1,
        payload: w.buf,
    })
}

#[derive(Default)]
struct PackedWriter {
    buf: Vec<u8, EXTENDED_VALUE_SIZE>,
}

impl PackedWriter {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf
            .extend_from_slice(bytes)
            .map_err(|()| Error::ExtendedValueOverflow)
    }
}
