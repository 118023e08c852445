//! Fuzz target: value writes and meter encoding
//!
//! Treats the input as a stream of 9-byte commands `(op, value[8])` applied
//! to a small registry, and as raw meter samples.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A write reports a change exactly when the stored bytes differ
//! - The channel value and its registration record never diverge
//! - The packed meter payload always fits the extended value buffer
//!
//! cargo fuzz run fuzz_channel_values

#![no_main]

use chanval::app::ports::{NoopObserver, NullTransport};
use chanval::meter::{self, ElectricityMeterReading, Measurement};
use chanval::proto::EXTENDED_VALUE_SIZE;
use chanval::{ChannelId, ChannelKind, ChannelRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reg: ChannelRegistry<NoopObserver, 4> = ChannelRegistry::with_observer(NoopObserver);
    for kind in [
        ChannelKind::Numeric,
        ChannelKind::Rgbw,
        ChannelKind::TemperatureHumidity,
        ChannelKind::electricity_meter(),
    ] {
        reg.register(kind).unwrap();
    }

    let mut reading = ElectricityMeterReading::default();

    for chunk in data.chunks_exact(9) {
        let op = chunk[0];
        let value: [u8; 8] = chunk[1..].try_into().unwrap();
        let id = ChannelId::new(op % 4);

        match op >> 6 {
            0 | 1 => {
                let before = *reg.channel(id).unwrap().value();
                let changed = reg.channel_mut(id).unwrap().try_set_value(&value);
                assert_eq!(changed, before != value);
            }
            2 => {
                reading.measured_values = u32::from(value[0]);
                reading.total_forward_active_energy[usize::from(value[1] % 3)] =
                    u64::from_le_bytes(value);
                reading.push_measurement(Measurement {
                    voltage: [
                        u16::from_le_bytes([value[2], value[3]]),
                        u16::from_le_bytes([value[4], value[5]]),
                        u16::from_le_bytes([value[6], value[7]]),
                    ],
                    ..Default::default()
                });
                reg.channel_mut(id).unwrap().set_electricity_meter(&reading);
            }
            _ => reg.send_update(id, &mut NullTransport).unwrap(),
        }

        let channel = reg.channel(id).unwrap();
        let record = reg.registration().record(id.number()).unwrap();
        assert_eq!(channel.value(), &record.value);
    }

    let ext = meter::encode_extended(&reading).unwrap();
    assert!(ext.size() <= EXTENDED_VALUE_SIZE);
});
