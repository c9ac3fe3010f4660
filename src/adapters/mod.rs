//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements           | Connects to                |
//! |------------|----------------------|----------------------------|
//! | `hardware` | InputPort            | ESP32 ADC1, GPIO inputs    |
//! |            | ActuatorPort         | Valve + LED output pins    |
//! | `log_sink` | EventSink            | Serial log output          |
//! | `time`     | TimePort             | ESP32 system timer         |
//! | `wifi`     | StationLink          | ESP-IDF WiFi STA           |
//! | `mdns`     | n/a                  | ESP-IDF mDNS responder     |
//! | `http`     | n/a                  | ESP-IDF httpd              |

pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod mdns;
pub mod time;
pub mod wifi;
