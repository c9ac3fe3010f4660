//! mDNS name announcement.
//!
//! Publishes `<hostname>.local` and an `_http._tcp` service record for the
//! control page, so the fireplace is reachable without knowing its IP.
//! Uses the raw ESP-IDF mDNS component on ESP-IDF and is a no-op on
//! simulation targets.
//!
//! Start only after the station link is up.  Failure is logged and the
//! controller keeps running; the device is then reachable by IP only.

use log::info;

use crate::error::CommsError;

const SERVICE_TYPE: &str = "_http";
const SERVICE_PROTO: &str = "_tcp";
const INSTANCE_NAME: &str = "Fireplace Controller";

/// mDNS advertisement adapter.
pub struct MdnsAdapter {
    hostname: heapless::String<24>,
    port: u16,
    active: bool,
}

impl MdnsAdapter {
    pub fn new(hostname: heapless::String<24>, port: u16) -> Self {
        Self {
            hostname,
            port,
            active: false,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Whether mDNS is currently advertising.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start hostname + service advertisement.  Idempotent.
    pub fn start(&mut self) -> Result<(), CommsError> {
        if self.active {
            return Ok(());
        }
        self.platform_start()?;
        self.active = true;
        info!(
            "mDNS: advertising {}.local ({}.{} port {})",
            self.hostname, SERVICE_TYPE, SERVICE_PROTO, self.port
        );
        Ok(())
    }

    /// Stop advertisement.  Idempotent.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.platform_stop();
        self.active = false;
        info!("mDNS: stopped");
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&self) -> Result<(), CommsError> {
        use esp_idf_svc::sys::*;

        fn check(ret: esp_err_t) -> Result<(), CommsError> {
            if ret == ESP_OK as i32 {
                Ok(())
            } else {
                Err(CommsError::MdnsFailed(ret))
            }
        }

        let mut hostname_buf = [0u8; 25];
        let hb = self.hostname.as_bytes();
        hostname_buf[..hb.len()].copy_from_slice(hb);

        let mut instance_buf = [0u8; 32];
        instance_buf[..INSTANCE_NAME.len()].copy_from_slice(INSTANCE_NAME.as_bytes());

        // SAFETY: every pointer passed below references a NUL-terminated
        // buffer that outlives the call; the mDNS component copies them.
        unsafe {
            check(mdns_init())?;
            check(mdns_hostname_set(hostname_buf.as_ptr().cast()))?;
            check(mdns_instance_name_set(instance_buf.as_ptr().cast()))?;
            check(mdns_service_add(
                core::ptr::null(),
                b"_http\0".as_ptr().cast(),
                b"_tcp\0".as_ptr().cast(),
                self.port,
                core::ptr::null_mut(),
                0,
            ))?;
            check(mdns_service_txt_item_set(
                b"_http\0".as_ptr().cast(),
                b"_tcp\0".as_ptr().cast(),
                b"version\0".as_ptr().cast(),
                concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast(),
            ))?;
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&self) -> Result<(), CommsError> {
        info!(
            "mDNS(sim): registered {}.local '{}' v={}",
            self.hostname,
            INSTANCE_NAME,
            env!("CARGO_PKG_VERSION")
        );
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_stop(&self) {
        // SAFETY: only called after a successful mdns_init().
        unsafe {
            esp_idf_svc::sys::mdns_free();
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_stop(&self) {
        info!("mDNS(sim): unregistered");
    }
}
