//! Controller configuration parameters
//!
//! All tunable parameters for the fireplace controller.  Values are
//! compiled in; nothing is persisted across power loss.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::safety::SafetyBand;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Safety ---
    /// Lowest thermocouple reading (mV) that proves the pilot flame.
    pub safety_min_mv: i32,
    /// Highest plausible thermocouple reading (mV); above this the
    /// signal is treated as a wiring fault, not a flame.
    pub safety_max_mv: i32,

    // --- Timing ---
    /// Control loop period (milliseconds)
    pub tick_interval_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,

    // --- Network ---
    /// mDNS hostname, advertised as `<hostname>.local`
    pub hostname: heapless::String<24>,
    /// HTTP listen port
    pub http_port: u16,
    pub network: NetworkConfig,
}

/// Station-mode network settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// `false` = DHCP
    pub use_static_ip: bool,
    pub static_ip: [u8; 4],
    pub gateway: [u8; 4],
    pub subnet: [u8; 4],
    pub dns: [u8; 4],
    /// Connection attempts before falling back to offline mode.
    pub connect_attempts: u8,
    /// Delay between attempts (milliseconds).
    pub connect_retry_ms: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            use_static_ip: true,
            static_ip: [192, 168, 4, 52],
            gateway: [192, 168, 4, 1],
            subnet: [255, 255, 255, 0],
            dns: [8, 8, 8, 8],
            connect_attempts: 20,
            connect_retry_ms: 500,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let mut hostname = heapless::String::new();
        // "fireplace" always fits in 24 bytes.
        let _ = hostname.push_str("fireplace");

        Self {
            // Safety
            safety_min_mv: 150,
            safety_max_mv: 500,

            // Timing
            tick_interval_ms: 10,       // 100 Hz
            watchdog_timeout_ms: 10_000,

            // Network
            hostname,
            http_port: 80,
            network: NetworkConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// The configured safety band.
    pub fn safety_band(&self) -> SafetyBand {
        SafetyBand::new(self.safety_min_mv, self.safety_max_mv)
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.safety_min_mv <= 0 {
            return Err(ConfigError::Validation("safety_min_mv must be positive"));
        }
        if self.safety_min_mv > self.safety_max_mv {
            return Err(ConfigError::Validation(
                "safety_min_mv must not exceed safety_max_mv",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Validation("tick_interval_ms must be non-zero"));
        }
        if self.watchdog_timeout_ms <= self.tick_interval_ms {
            return Err(ConfigError::Validation(
                "watchdog_timeout_ms must exceed tick_interval_ms",
            ));
        }
        if self.hostname.is_empty() {
            return Err(ConfigError::Validation("hostname must not be empty"));
        }
        if self.network.connect_attempts == 0 {
            return Err(ConfigError::Validation("connect_attempts must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let c = ControllerConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.safety_min_mv, 150);
        assert_eq!(c.safety_max_mv, 500);
        assert_eq!(c.hostname.as_str(), "fireplace");
        assert_eq!(c.http_port, 80);
    }

    #[test]
    fn inverted_band_is_rejected() {
        let c = ControllerConfig {
            safety_min_mv: 600,
            ..ControllerConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let c = ControllerConfig {
            tick_interval_ms: 0,
            ..ControllerConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn watchdog_must_outlast_a_tick() {
        let c = ControllerConfig {
            tick_interval_ms: 20_000,
            ..ControllerConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn empty_hostname_is_rejected() {
        let c = ControllerConfig {
            hostname: heapless::String::new(),
            ..ControllerConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let c = ControllerConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: ControllerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn band_matches_fields() {
        let c = ControllerConfig::default();
        let band = c.safety_band();
        assert_eq!(band.min_mv(), c.safety_min_mv);
        assert_eq!(band.max_mv(), c.safety_max_mv);
    }
}
