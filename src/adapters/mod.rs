//! Concrete implementations of the port traits.
//!
//! | Adapter    | Implements      | Connects to                    |
//! |------------|-----------------|--------------------------------|
//! | `log_sink` | ChangeObserver  | `log` facade (debug records)   |
//! |            | ValueTransport  | `log` facade (bring-up)        |
//! | `outbox`   | ValueTransport  | static `embassy-sync` channel  |

pub mod log_sink;
pub mod outbox;
