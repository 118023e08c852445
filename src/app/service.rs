//! Channel service: the dispatch cycle.
//!
//! [`ChannelService`] owns the registry and the dispatch configuration and
//! decides *when* dirty channels go out. The transport is injected at the
//! call site, so the whole cycle is testable with a recording mock.
//!
//! ```text
//!  drivers ──▶ registry_mut().channel_mut(id).set_*()
//!                          │
//!  main loop ──▶ tick(now_ms, transport)
//!                 ├─ link down?          → nothing
//!                 ├─ before next slot?   → nothing
//!                 └─ send_update() for each dirty channel (capped)
//! ```

use log::{debug, info};

use crate::adapters::log_sink::LogObserver;
use crate::config::{ConfigError, CoreConfig};
use crate::dispatch;
use crate::proto::MAX_CHANNELS;
use crate::registry::ChannelRegistry;

use super::ports::{ChangeObserver, ValueTransport};

// ───────────────────────────────────────────────────────────────
// ChannelService
// ───────────────────────────────────────────────────────────────

pub struct ChannelService<O: ChangeObserver = LogObserver, const N: usize = MAX_CHANNELS> {
    registry: ChannelRegistry<O, N>,
    config: CoreConfig,
    connected: bool,
    /// Earliest time (ms) the next cycle may run.
    next_communication_ms: u64,
    /// Where a capped cycle resumes so trailing channels are not starved.
    cursor: usize,
    cycles: u64,
    updates_sent: u64,
}

impl<O: ChangeObserver, const N: usize> ChannelService<O, N> {
    pub fn new(registry: ChannelRegistry<O, N>, config: CoreConfig) -> Self {
        Self {
            registry,
            config,
            connected: false,
            next_communication_ms: 0,
            cursor: 0,
            cycles: 0,
            updates_sent: 0,
        }
    }

    // ── Link lifecycle ────────────────────────────────────────

    /// The controller link is up and registration has completed.
    ///
    /// Registration already carried every current value, so simple
    /// channels are bulk-cleared; extended channels still go out on the
    /// first cycle.
    pub fn on_connected(&mut self) {
        if self.config.clear_on_connect {
            self.registry.clear_all_dirty();
        }
        self.connected = true;
        self.next_communication_ms = 0;
        info!(
            "ChannelService connected, {} channel(s), {} pending",
            self.registry.count(),
            self.registry.dirty_count()
        );
    }

    pub fn on_disconnected(&mut self) {
        self.connected = false;
        info!("ChannelService disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one dispatch cycle if the link is up and the interval elapsed.
    /// Returns the number of channels sent.
    pub fn tick<T: ValueTransport>(&mut self, now_ms: u64, transport: &mut T) -> usize {
        if !self.connected || now_ms < self.next_communication_ms {
            return 0;
        }
        self.next_communication_ms = now_ms.saturating_add(u64::from(self.config.dispatch_interval_ms));
        self.dispatch_dirty(transport)
    }

    /// Send every dirty channel now, ignoring the interval.
    /// Honours `max_updates_per_cycle`.
    pub fn dispatch_dirty<T: ValueTransport>(&mut self, transport: &mut T) -> usize {
        let limit = match self.config.max_updates_per_cycle {
            0 => usize::MAX,
            n => n as usize,
        };
        let start = if limit == usize::MAX { 0 } else { self.cursor };

        let channels = self.registry.channels_mut();
        let len = channels.len();
        let mut sent = 0;

        for step in 0..len {
            if sent >= limit {
                break;
            }
            let i = (start + step) % len;
            let channel = &mut channels[i];
            if channel.is_dirty() {
                dispatch::send_update(transport, channel);
                sent += 1;
                self.cursor = (i + 1) % len;
            }
        }

        self.cycles += 1;
        self.updates_sent += sent as u64;
        if sent > 0 {
            debug!("Dispatch cycle {}: {} update(s)", self.cycles, sent);
        }
        sent
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn registry(&self) -> &ChannelRegistry<O, N> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ChannelRegistry<O, N> {
        &mut self.registry
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Validate and apply a new configuration. Takes effect on the next tick.
    pub fn update_config(&mut self, config: CoreConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        info!("Dispatch configuration updated");
        Ok(())
    }

    /// Cycles run since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Total `send_update` calls since startup.
    pub fn updates_sent(&self) -> u64 {
        self.updates_sent
    }
}
