//! WiFi station-mode adapter.
//!
//! Brings the station link up at boot with a bounded retry budget.  If
//! the budget runs out the firmware carries on in **offline mode**: the
//! control loop, the safety interlock and the bypass all keep working,
//! only remote commands are unavailable.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: [`EspStation`] drives `esp_idf_svc::wifi`,
//!   optionally with a fixed IPv4 configuration.
//! - **all other targets**: [`SimStation`] succeeds or fails on demand.
//!
//! Credentials come from the build environment (`FIREPLACE_WIFI_SSID`,
//! `FIREPLACE_WIFI_PASS`) and never reach the controller core.

use core::time::Duration;

use log::{info, warn};

use crate::config::NetworkConfig;
use crate::error::CommsError;

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

/// One association attempt against the configured access point.
pub trait StationLink {
    /// Try to associate and obtain an address.  Blocking.
    fn try_connect(&mut self) -> Result<(), CommsError>;

    /// IPv4 address once connected.
    fn ip(&self) -> Option<[u8; 4]>;
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Connected { attempts: u8, ip: Option<[u8; 4]> },
    /// Retry budget exhausted or no credentials; running local-only.
    Offline,
}

impl WifiState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

// ───────────────────────────────────────────────────────────────
// Credentials + validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), CommsError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(CommsError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), CommsError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(CommsError::InvalidPassword);
    }
    Ok(())
}

#[derive(Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
}

impl core::fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl WifiCredentials {
    pub fn new(ssid: &str, password: &str) -> Result<Self, CommsError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        let mut s = heapless::String::new();
        s.push_str(ssid).map_err(|()| CommsError::InvalidSsid)?;
        let mut p = heapless::String::new();
        p.push_str(password).map_err(|()| CommsError::InvalidPassword)?;
        Ok(Self {
            ssid: s,
            password: p,
        })
    }

    /// Credentials baked in at build time.
    pub fn from_build_env() -> Result<Self, CommsError> {
        match option_env!("FIREPLACE_WIFI_SSID") {
            Some(ssid) if !ssid.is_empty() => {
                Self::new(ssid, option_env!("FIREPLACE_WIFI_PASS").unwrap_or(""))
            }
            _ => Err(CommsError::NoCredentials),
        }
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// Bring-up
// ───────────────────────────────────────────────────────────────

/// Try `link` up to `network.connect_attempts` times, sleeping
/// `connect_retry_ms` between attempts.  Never fails: exhaustion yields
/// [`WifiState::Offline`].
pub fn bring_up(
    link: &mut impl StationLink,
    network: &NetworkConfig,
    mut sleep: impl FnMut(Duration),
) -> WifiState {
    let attempts = network.connect_attempts.max(1);
    let delay = Duration::from_millis(u64::from(network.connect_retry_ms));

    for attempt in 1..=attempts {
        match link.try_connect() {
            Ok(()) => {
                let ip = link.ip();
                info!("WiFi: connected on attempt {attempt}/{attempts}, ip={ip:?}");
                return WifiState::Connected {
                    attempts: attempt,
                    ip,
                };
            }
            Err(e) => {
                info!("WiFi: attempt {attempt}/{attempts} failed ({e})");
                if attempt < attempts {
                    sleep(delay);
                }
            }
        }
    }

    warn!("WiFi: connection failed, continuing in offline mode");
    WifiState::Offline
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// Simulated station: fails the first `fail_first` attempts.
#[derive(Debug, Default)]
pub struct SimStation {
    fail_first: u32,
    calls: u32,
}

impl SimStation {
    pub fn new(fail_first: u32) -> Self {
        Self {
            fail_first,
            calls: 0,
        }
    }

    /// Never connects.
    pub fn unreachable() -> Self {
        Self::new(u32::MAX)
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl StationLink for SimStation {
    fn try_connect(&mut self) -> Result<(), CommsError> {
        self.calls = self.calls.saturating_add(1);
        if self.calls <= self.fail_first {
            return Err(CommsError::WifiConnectFailed);
        }
        Ok(())
    }

    fn ip(&self) -> Option<[u8; 4]> {
        (self.calls > self.fail_first).then_some([127, 0, 0, 1])
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF station
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp::EspStation;

#[cfg(target_os = "espidf")]
mod esp {
    use std::net::Ipv4Addr;

    use anyhow::{Context, anyhow};
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::ipv4::{
        ClientConfiguration as IpClientConfiguration, ClientSettings as IpClientSettings,
        Configuration as IpConfiguration, Mask, Subnet,
    };
    use esp_idf_svc::netif::{EspNetif, NetifConfiguration};
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
    use log::{info, warn};

    use super::{StationLink, WifiCredentials};
    use crate::config::NetworkConfig;
    use crate::error::CommsError;

    fn ipv4(o: [u8; 4]) -> Ipv4Addr {
        Ipv4Addr::new(o[0], o[1], o[2], o[3])
    }

    fn build_sta_netif(network: &NetworkConfig) -> anyhow::Result<Option<EspNetif>> {
        if !network.use_static_ip {
            return Ok(None);
        }
        let mask_ip = ipv4(network.subnet);
        let mask =
            Mask::try_from(mask_ip).map_err(|_| anyhow!("invalid subnet mask: {}", mask_ip))?;

        let conf = NetifConfiguration {
            ip_configuration: Some(IpConfiguration::Client(IpClientConfiguration::Fixed(
                IpClientSettings {
                    ip: ipv4(network.static_ip),
                    subnet: Subnet {
                        gateway: ipv4(network.gateway),
                        mask,
                    },
                    dns: Some(ipv4(network.dns)),
                    secondary_dns: None,
                },
            ))),
            ..NetifConfiguration::wifi_default_client()
        };
        Ok(Some(EspNetif::new_with_conf(&conf)?))
    }

    /// Station driver.  Must outlive the HTTP server and mDNS responder.
    pub struct EspStation {
        wifi: BlockingWifi<EspWifi<'static>>,
    }

    impl EspStation {
        /// Create the driver, apply the static IP (if configured) and the
        /// credentials, and start the radio.  Does not associate yet.
        pub fn new(
            modem: Modem,
            sys_loop: EspSystemEventLoop,
            nvs: EspDefaultNvsPartition,
            network: &NetworkConfig,
            creds: &WifiCredentials,
        ) -> anyhow::Result<Self> {
            let mut esp_wifi = EspWifi::new(modem, sys_loop.clone(), Some(nvs))?;

            match build_sta_netif(network) {
                Ok(Some(netif)) => {
                    esp_wifi
                        .swap_netif_sta(netif)
                        .context("failed to apply static IP netif configuration")?;
                    info!("WiFi: static IP {}", ipv4(network.static_ip));
                }
                Ok(None) => info!("WiFi: using DHCP"),
                Err(e) => {
                    warn!("WiFi: {} ({e:#}); falling back to DHCP", CommsError::StaticIpRejected);
                }
            }

            let mut wifi = BlockingWifi::wrap(esp_wifi, sys_loop)?;
            wifi.set_configuration(&Configuration::Client(ClientConfiguration {
                ssid: creds
                    .ssid()
                    .try_into()
                    .map_err(|_| anyhow!("{}", CommsError::InvalidSsid))?,
                password: creds
                    .password()
                    .try_into()
                    .map_err(|_| anyhow!("{}", CommsError::InvalidPassword))?,
                auth_method: if creds.is_open() {
                    AuthMethod::None
                } else {
                    AuthMethod::WPA2Personal
                },
                ..Default::default()
            }))?;
            wifi.start()?;
            info!("WiFi: started, connecting to '{}'", creds.ssid());

            Ok(Self { wifi })
        }
    }

    impl StationLink for EspStation {
        fn try_connect(&mut self) -> Result<(), CommsError> {
            self.wifi
                .connect()
                .and_then(|()| self.wifi.wait_netif_up())
                .map_err(|e| {
                    warn!("WiFi: {e}");
                    // A half-open association blocks the next attempt.
                    let _ = self.wifi.disconnect();
                    CommsError::WifiConnectFailed
                })
        }

        fn ip(&self) -> Option<[u8; 4]> {
            self.wifi
                .wifi()
                .sta_netif()
                .get_ip_info()
                .ok()
                .map(|info| info.ip.octets())
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_ssid() {
        assert_eq!(
            WifiCredentials::new("", "password123"),
            Err(CommsError::InvalidSsid)
        );
    }

    #[test]
    fn rejects_non_printable_ssid() {
        assert_eq!(
            WifiCredentials::new("Home\nNet", "password123"),
            Err(CommsError::InvalidSsid)
        );
    }

    #[test]
    fn rejects_short_password() {
        assert_eq!(
            WifiCredentials::new("MyNet", "short"),
            Err(CommsError::InvalidPassword)
        );
    }

    #[test]
    fn accepts_open_network() {
        let c = WifiCredentials::new("OpenCafe", "").unwrap();
        assert!(c.is_open());
    }

    #[test]
    fn debug_redacts_password() {
        let c = WifiCredentials::new("HomeWiFi", "mysecret8").unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("HomeWiFi"));
        assert!(!dbg.contains("mysecret8"));
    }

    #[test]
    fn connects_after_transient_failures() {
        let mut link = SimStation::new(3);
        let mut slept = Vec::new();
        let state = bring_up(&mut link, &NetworkConfig::default(), |d| slept.push(d));

        assert_eq!(
            state,
            WifiState::Connected {
                attempts: 4,
                ip: Some([127, 0, 0, 1])
            }
        );
        assert_eq!(slept.len(), 3);
        assert!(slept.iter().all(|d| *d == Duration::from_millis(500)));
    }

    #[test]
    fn exhausted_budget_goes_offline() {
        let mut link = SimStation::unreachable();
        let mut sleeps = 0;
        let state = bring_up(&mut link, &NetworkConfig::default(), |_| sleeps += 1);

        assert_eq!(state, WifiState::Offline);
        assert!(!state.is_connected());
        assert_eq!(link.calls(), 20);
        assert_eq!(sleeps, 19);
    }
}
