//! Channel value subsystem.
//!
//! Channels are the sensor/actuator endpoints of a device. Each one owns
//! an 8-byte encoded value, a dirty flag and a slot in the registration
//! record array; a periodic dispatch cycle pushes dirty channels to the
//! transport.
//!
//! ```text
//!  driver ──▶ ChannelMut::set_* ──▶ codec ──▶ try_set_value ──▶ dirty
//!                                                                  │
//!  transport ◀── dispatch::send_update ◀── ChannelService::tick ◀──┘
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod channel;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod meter;
pub mod proto;
pub mod registration;
pub mod registry;

pub use channel::{Channel, ChannelId, ChannelKind, ChannelMut};
pub use error::{Error, Result};
pub use registry::ChannelRegistry;
