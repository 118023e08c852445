//! Application core: port traits, change events and the dispatch service.
//!
//! All interaction with the controller link and diagnostics happens
//! through the **port traits** in [`ports`], keeping this layer testable
//! without a real transport.

pub mod events;
pub mod ports;
pub mod service;
