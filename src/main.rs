//! Fireplace controller firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter    LogEventSink   Esp32Time    EspStation   │
//! │  (Input+Actuator)   (EventSink)    (TimePort)   (WiFi STA)   │
//! │  MdnsAdapter        http::start_server                       │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  SharedController ─▶ AppService (pure logic)           │  │
//! │  │  Safety · Timer · Arbiter · Status                     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The control thread is started before the network so the valve is
//! under arbitration (and the bypass works) while WiFi is still retrying.
#![deny(unused_must_use)]

use core::time::Duration;

use anyhow::{Result, anyhow};
use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{error, info, warn};

use fireplace::adapters::hardware::HardwareAdapter;
use fireplace::adapters::http;
use fireplace::adapters::log_sink::LogEventSink;
use fireplace::adapters::mdns::MdnsAdapter;
use fireplace::adapters::time::Esp32TimeAdapter;
use fireplace::adapters::wifi::{self, EspStation, WifiCredentials, WifiState};
use fireplace::app::service::AppService;
use fireplace::app::shared::SharedController;
use fireplace::clock::TimePort;
use fireplace::config::ControllerConfig;
use fireplace::drivers::indicator::Indicator;
use fireplace::drivers::task_pin::{self, Core};
use fireplace::drivers::valve::Valve;
use fireplace::drivers::watchdog::Watchdog;
use fireplace::drivers::hw_init;
use fireplace::error::{Error, InitError};
use fireplace::pins;
use fireplace::sensors::SensorHub;
use fireplace::ticker::FixedRateTicker;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Fireplace Controller v{:<14}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = ControllerConfig::default();
    config.validate().map_err(Error::from)?;

    // ── 2. Outputs LOW before anything else ───────────────────
    let peripherals = Peripherals::take()?;
    // SAFETY: these GPIOs are not handed out through `peripherals.pins`
    // anywhere else in the firmware.
    let valve_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::VALVE_OUTPUT_GPIO) })?;
    let led_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::ONBOARD_LED_GPIO) })?;
    let valve = Valve::new(valve_pin);
    let indicator = Indicator::new(led_pin);

    // ── 3. Inputs ─────────────────────────────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;
    let mut hw = HardwareAdapter::new(SensorHub::from_pins(), valve, indicator);

    // ── 4. Controller + control thread ────────────────────────
    let mut sink = LogEventSink::new();
    let mut service = AppService::new(config.clone());
    service.start(&mut sink);
    let ctrl = SharedController::new(service);

    let period = Duration::from_millis(u64::from(config.tick_interval_ms));
    let wdt_timeout = config.watchdog_timeout_ms;
    let loop_ctrl = ctrl.clone();
    let control = task_pin::spawn_on_core(Core::App, 5, 8, "control\0", move || {
        let watchdog = Watchdog::subscribe(wdt_timeout);
        let clock = Esp32TimeAdapter::new();
        let mut ticker = FixedRateTicker::new(period, clock.now());
        loop {
            loop_ctrl.tick(clock.now(), &mut hw, &mut sink);
            watchdog.feed();
            ticker.wait(&clock);
        }
    })
    .map_err(|e| {
        error!("{}: {e}", InitError::Thread);
        Error::from(InitError::Thread)
    })?;

    // ── 5. Network (best effort) ──────────────────────────────
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut _station = None;
    let wifi_state = match WifiCredentials::from_build_env() {
        Ok(creds) => {
            match EspStation::new(peripherals.modem, sys_loop, nvs, &config.network, &creds) {
                Ok(mut station) => {
                    let state = wifi::bring_up(&mut station, &config.network, std::thread::sleep);
                    _station = Some(station);
                    state
                }
                Err(e) => {
                    warn!("WiFi init failed ({e:#}), continuing in offline mode");
                    WifiState::Offline
                }
            }
        }
        Err(e) => {
            warn!("WiFi: {e}, continuing in offline mode");
            WifiState::Offline
        }
    };

    let mut mdns = MdnsAdapter::new(config.hostname.clone(), config.http_port);
    if wifi_state.is_connected() {
        if let Err(e) = mdns.start() {
            warn!("{e}; reachable by IP only");
        }
    }

    let _server = match http::start_server(ctrl, config.http_port) {
        Ok(server) => Some(server),
        Err(e) => {
            warn!("{} ({e:#}); local control only", fireplace::error::CommsError::HttpServerFailed);
            None
        }
    };

    info!("System ready ({:?}).", wifi_state);

    // The control thread never returns; if it dies, let the runtime reboot.
    control
        .join()
        .map_err(|_| anyhow!("control thread terminated"))?;
    Ok(())
}
