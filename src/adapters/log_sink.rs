//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART console at 115200 baud in production).  Each
//! event is one line: `TAG | key=value ...`.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { min_mv, max_mv } => {
                info!("START | band={}..={}mV", min_mv, max_mv);
            }
            AppEvent::SafetyChanged { safe, mv } => {
                if *safe {
                    info!("SAFETY | in_band mv={}", mv);
                } else {
                    warn!("SAFETY | out_of_band mv={}", mv);
                }
            }
            AppEvent::BypassChanged(on) => {
                warn!("BYPASS | {}", if *on { "engaged" } else { "released" });
            }
            AppEvent::WallSwitchChanged(on) => {
                info!("SWITCH | wall={}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::ValveChanged { energized, reason } => {
                info!(
                    "VALVE | {} reason={:?}",
                    if *energized { "OPEN" } else { "CLOSED" },
                    reason
                );
            }
            AppEvent::DesiredChanged(on) => {
                info!("INTENT | desired_on={}", on);
            }
            AppEvent::TimerArmed { minutes, deadline } => {
                info!(
                    "TIMER | armed minutes={} deadline_ms={}",
                    minutes,
                    deadline.as_millis()
                );
            }
            AppEvent::TimerCancelled => {
                info!("TIMER | cancelled");
            }
            AppEvent::TimerExpired => {
                info!("TIMER | expired");
            }
        }
    }
}
