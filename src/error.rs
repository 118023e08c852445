//! Unified error types for the channel subsystem.
//!
//! All variants are `Copy` so they pass through the registry and dispatch
//! layers without allocation.

use core::fmt;

use crate::channel::ChannelId;

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The registry already holds its maximum number of channels.
    CapacityExceeded,
    /// No channel is registered under this index.
    UnknownChannel(ChannelId),
    /// An extended value payload would not fit its buffer.
    ExtendedValueOverflow,
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "channel limit exceeded"),
            Self::UnknownChannel(id) => write!(f, "unknown channel {id}"),
            Self::ExtendedValueOverflow => write!(f, "extended value overflow"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
