//! Integration tests for the dispatch cycle in `ChannelService`.

use super::mock_transport::{MockTransport, RecordingObserver};

use chanval::app::service::ChannelService;
use chanval::config::CoreConfig;
use chanval::meter::ElectricityMeterReading;
use chanval::{ChannelId, ChannelKind, ChannelRegistry};

type Service = ChannelService<RecordingObserver, 8>;

/// Relay, thermometer, dimmer, meter.
fn device(config: CoreConfig) -> (Service, [ChannelId; 4]) {
    let mut reg = ChannelRegistry::with_observer(RecordingObserver::default());
    let ids = [
        reg.register(ChannelKind::Binary).unwrap(),
        reg.register(ChannelKind::TemperatureHumidity).unwrap(),
        reg.register(ChannelKind::Rgbw).unwrap(),
        reg.register(ChannelKind::electricity_meter()).unwrap(),
    ];
    (ChannelService::new(reg, config), ids)
}

fn touch_all(svc: &mut Service, ids: [ChannelId; 4], step: u8) {
    let reg = svc.registry_mut();
    reg.channel_mut(ids[0]).unwrap().set_bool(step % 2 == 1);
    reg.channel_mut(ids[1])
        .unwrap()
        .set_temperature_humidity(20.0 + f64::from(step), 50.0);
    reg.channel_mut(ids[2]).unwrap().set_rgbw(step, 0, 0, 100, 100);
    reg.channel_mut(ids[3])
        .unwrap()
        .set_electricity_meter(&ElectricityMeterReading::default());
}

#[test]
fn first_cycle_after_connect_sends_only_extended() {
    let (mut svc, ids) = device(CoreConfig::default());
    touch_all(&mut svc, ids, 1);

    let mut transport = MockTransport::new();
    svc.on_connected();
    assert_eq!(svc.tick(0, &mut transport), 1);

    assert_eq!(transport.value_channels(), vec![ids[3].number()]);
    assert_eq!(transport.extended_count(), 1);
    assert_eq!(svc.registry().dirty_count(), 0);
}

#[test]
fn disconnected_link_holds_updates() {
    let (mut svc, ids) = device(CoreConfig::default());
    svc.on_connected();
    svc.on_disconnected();
    touch_all(&mut svc, ids, 1);

    let mut transport = MockTransport::new();
    assert_eq!(svc.tick(10_000, &mut transport), 0);
    assert!(transport.calls.is_empty());
    assert_eq!(svc.registry().dirty_count(), 4);

    svc.on_connected();
    assert_eq!(svc.tick(10_000, &mut transport), 1, "only the meter survives the bulk clear");
}

#[test]
fn capped_cycles_rotate_in_registration_order() {
    let (mut svc, ids) = device(CoreConfig {
        max_updates_per_cycle: 2,
        clear_on_connect: false,
        ..CoreConfig::default()
    });
    svc.on_connected();

    let mut transport = MockTransport::new();
    touch_all(&mut svc, ids, 1);
    assert_eq!(svc.dispatch_dirty(&mut transport), 2);
    touch_all(&mut svc, ids, 2);
    assert_eq!(svc.dispatch_dirty(&mut transport), 2);

    assert_eq!(transport.value_channels(), vec![0, 1, 2, 3]);
    // Channels 0 and 1 were touched again after their first send.
    assert_eq!(svc.registry().dirty_count(), 2);
}

#[test]
fn unchanged_values_are_not_resent() {
    let (mut svc, ids) = device(CoreConfig {
        clear_on_connect: false,
        ..CoreConfig::default()
    });
    svc.on_connected();

    let mut transport = MockTransport::new();
    touch_all(&mut svc, ids, 3);
    assert_eq!(svc.tick(0, &mut transport), 4);

    touch_all(&mut svc, ids, 3);
    assert_eq!(svc.tick(100, &mut transport), 1, "meter writes are always dirty");
    assert_eq!(svc.cycle_count(), 2);
    assert_eq!(svc.updates_sent(), 5);
}

#[test]
fn observer_sees_each_accepted_change() {
    let (mut svc, ids) = device(CoreConfig::default());
    touch_all(&mut svc, ids, 1);
    touch_all(&mut svc, ids, 1);

    // Three deduplicated simple writes plus two meter writes.
    let changes = &svc.registry().observer().changes;
    assert_eq!(changes.len(), 5);
    assert_eq!(changes[0].0, ids[0].number());
}
