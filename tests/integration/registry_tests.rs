//! Integration tests for registration, setters and change detection.

use super::mock_transport::RecordingObserver;

use chanval::app::events::ValueChange;
use chanval::meter::{ElectricityMeterReading, Measurement};
use chanval::proto::{
    EM_VALUE_FLAG_PHASE1_ON, EM_VALUE_FLAG_PHASE2_ON, EM_VALUE_FLAG_PHASE3_ON, EM_VAR_VOLTAGE,
    MAX_CHANNELS,
};
use chanval::{ChannelKind, ChannelRegistry, Error};

type Registry = ChannelRegistry<RecordingObserver>;

fn registry() -> Registry {
    ChannelRegistry::with_observer(RecordingObserver::default())
}

fn meter_reading(voltage: [u16; 3]) -> ElectricityMeterReading {
    let mut r = ElectricityMeterReading {
        total_forward_active_energy: [1000, 2000, 3000],
        measured_values: EM_VAR_VOLTAGE,
        ..Default::default()
    };
    r.push_measurement(Measurement {
        voltage,
        ..Default::default()
    });
    r
}

// ── Registration ──────────────────────────────────────────────

#[test]
fn full_registry_has_dense_indices() {
    let mut reg = registry();
    for expected in 0..MAX_CHANNELS {
        let id = reg.register(ChannelKind::Numeric).unwrap();
        assert_eq!(id.number() as usize, expected);
    }
    assert_eq!(reg.count(), MAX_CHANNELS);

    let order: Vec<usize> = reg.iter().map(|c| c.id().number() as usize).collect();
    assert_eq!(order, (0..MAX_CHANNELS).collect::<Vec<_>>());
}

#[test]
fn channel_past_capacity_is_not_counted() {
    let mut reg = registry();
    for _ in 0..MAX_CHANNELS {
        reg.register(ChannelKind::Binary).unwrap();
    }

    assert_eq!(reg.register(ChannelKind::Binary), Err(Error::CapacityExceeded));
    assert_eq!(reg.count(), MAX_CHANNELS);
    assert_eq!(reg.registration().channel_count(), MAX_CHANNELS);
    assert!(reg.limit_exceeded());
}

// ── Change detection ──────────────────────────────────────────

#[test]
fn identical_write_is_unchanged() {
    let mut reg = registry();
    let id = reg.register(ChannelKind::Numeric).unwrap();
    let bytes = 42.0f64.to_le_bytes();

    assert!(reg.channel_mut(id).unwrap().try_set_value(&bytes));
    assert!(reg.channel(id).unwrap().is_dirty());
    assert!(!reg.channel_mut(id).unwrap().try_set_value(&bytes));
    assert!(reg.channel(id).unwrap().is_dirty());

    assert_eq!(reg.observer().changes.len(), 1, "observer only sees real changes");
}

#[test]
fn value_is_mirrored_into_registration_record() {
    let mut reg = registry();
    let id = reg.register(ChannelKind::TemperatureHumidity).unwrap();
    reg.channel_mut(id).unwrap().set_temperature_humidity(21.5, 55.2);

    let record = reg.registration().record(id.number()).unwrap();
    assert_eq!(&record.value[..4], &21_500i32.to_le_bytes());
    assert_eq!(&record.value[4..], &55_200i32.to_le_bytes());
    assert_eq!(reg.channel(id).unwrap().value(), &record.value);
}

#[test]
fn rgbw_setter_layout() {
    let mut reg = registry();
    let id = reg.register(ChannelKind::Rgbw).unwrap();
    assert!(reg.channel_mut(id).unwrap().set_rgbw(10, 20, 30, 40, 50));
    assert_eq!(reg.channel(id).unwrap().value(), &[50, 40, 30, 20, 10, 0, 0, 0]);

    let (ch, change) = reg.observer().changes[0];
    assert_eq!(ch, id.number());
    assert!(matches!(change, ValueChange::Rgbw { red: 10, brightness: 50, .. }));
}

#[test]
fn meter_setter_totals_flags_and_always_dirty() {
    let mut reg = registry();
    let id = reg.register(ChannelKind::electricity_meter()).unwrap();
    let reading = meter_reading([5, 0, 7]);

    reg.channel_mut(id).unwrap().set_electricity_meter(&reading);
    reg.send_update(id, &mut chanval::app::ports::NullTransport).unwrap();
    assert!(!reg.channel(id).unwrap().is_dirty());

    reg.channel_mut(id).unwrap().set_electricity_meter(&reading);
    assert!(reg.channel(id).unwrap().is_dirty());

    let value = reg.channel(id).unwrap().value();
    let flags = value[0];
    assert_eq!(flags & EM_VALUE_FLAG_PHASE1_ON, EM_VALUE_FLAG_PHASE1_ON);
    assert_eq!(flags & EM_VALUE_FLAG_PHASE2_ON, 0);
    assert_eq!(flags & EM_VALUE_FLAG_PHASE3_ON, EM_VALUE_FLAG_PHASE3_ON);
    assert_eq!(u32::from_le_bytes([value[1], value[2], value[3], value[4]]), 6);
}

// ── Bulk clear ────────────────────────────────────────────────

#[test]
fn clear_all_dirty_exempts_extended_channels() {
    let mut reg = registry();
    let relay = reg.register(ChannelKind::Binary).unwrap();
    let dimmer = reg.register(ChannelKind::Rgbw).unwrap();
    let idle = reg.register(ChannelKind::Integer).unwrap();
    let meter = reg.register(ChannelKind::electricity_meter()).unwrap();

    reg.channel_mut(relay).unwrap().set_bool(true);
    reg.channel_mut(dimmer).unwrap().set_rgbw(1, 2, 3, 4, 5);
    reg.channel_mut(meter)
        .unwrap()
        .set_electricity_meter(&meter_reading([230, 230, 230]));

    reg.clear_all_dirty();

    for id in [relay, dimmer, idle] {
        assert!(!reg.channel(id).unwrap().is_dirty(), "channel {id} should be clean");
    }
    assert!(reg.channel(meter).unwrap().is_dirty());

    // A clean extended channel stays clean.
    reg.send_update(meter, &mut chanval::app::ports::NullTransport).unwrap();
    reg.clear_all_dirty();
    assert!(!reg.channel(meter).unwrap().is_dirty());
}
