//! Fireplace controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod arbiter;
pub mod clock;
pub mod config;
pub mod error;
pub mod pins;
pub mod safety;
pub mod state;
pub mod status;
pub mod ticker;
pub mod timer;

// Hardware-facing modules; each falls back to simulation off-target.
pub mod adapters;
pub mod drivers;
pub mod sensors;
