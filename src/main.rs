//! Host simulation of a small device.
//!
//! Registers a relay, a thermo-hygrometer, an RGBW dimmer and a
//! three-phase electricity meter, feeds them synthetic readings and runs
//! the dispatch cycle into the outbox, printing whatever the link task
//! would have sent.
//!
//! Usage: `chanval-sim [config.json]`

use anyhow::{Context, Result};
use log::info;

use chanval::adapters::outbox::{self, Notification, OutboxTransport, OUTBOX};
use chanval::app::service::ChannelService;
use chanval::config::CoreConfig;
use chanval::meter::{ElectricityMeterReading, Measurement};
use chanval::proto::EM_VAR_VOLTAGE;
use chanval::{ChannelKind, ChannelRegistry};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            CoreConfig::from_json(&json).with_context(|| format!("parsing {path}"))?
        }
        None => CoreConfig::default(),
    };
    info!("Dispatch config: {:?}", config);

    // ── 1. Static topology ────────────────────────────────────
    let mut registry: ChannelRegistry = ChannelRegistry::new();
    let relay = registry.register(ChannelKind::Binary)?;
    let climate = registry.register(ChannelKind::TemperatureHumidity)?;
    let dimmer = registry.register(ChannelKind::Rgbw)?;
    let meter = registry.register(ChannelKind::electricity_meter())?;

    let mut service = ChannelService::new(registry, config);
    let mut transport = OutboxTransport::new(&OUTBOX);
    service.on_connected();

    // ── 2. Simulated driver updates + dispatch ────────────────
    let mut reading = ElectricityMeterReading {
        measured_values: EM_VAR_VOLTAGE,
        ..Default::default()
    };
    let interval = u64::from(service.config().dispatch_interval_ms);

    for step in 0u16..5 {
        let now_ms = u64::from(step) * interval;
        let reg = service.registry_mut();

        reg.try_channel_mut(relay)?.set_bool(step % 2 == 1);
        reg.try_channel_mut(climate)?
            .set_temperature_humidity(21.5 + f64::from(step) * 0.1, 55.2);
        reg.try_channel_mut(dimmer)?
            .set_rgbw(255, (step * 40) as u8, 0, 100, 80);

        reading.total_forward_active_energy = [u64::from(step) * 1_500; 3];
        reading.push_measurement(Measurement {
            voltage: [23_000, 0, 23_100 - step * 10],
            ..Default::default()
        });
        reg.try_channel_mut(meter)?.set_electricity_meter(&reading);

        let sent = service.tick(now_ms, &mut transport);
        info!("t={}ms: {} channel(s) dispatched", now_ms, sent);

        outbox::drain(&OUTBOX, |n| match n {
            Notification::ValueChanged { channel, value } => {
                info!("  -> value    ch={} {:02X?}", channel, value);
            }
            Notification::ExtendedValueChanged { channel, value } => {
                info!("  -> extended ch={} {} bytes", channel, value.size());
            }
        });
    }

    info!(
        "Done: {} cycles, {} updates, {} dropped",
        service.cycle_count(),
        service.updates_sent(),
        transport.dropped()
    );
    Ok(())
}
