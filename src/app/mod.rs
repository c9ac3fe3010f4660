//! Application core — pure domain logic, zero I/O.
//!
//! Business rules for the fireplace controller: the per-tick
//! safety/timer/arbiter pipeline and remote command intake.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod shared;
