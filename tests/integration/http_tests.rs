//! HTTP routing against a live controller.
//!
//! `respond` is the whole request path minus the socket, so these tests
//! drive it with raw request targets the way a browser would send them.

use crate::mock_hw::{CollectSink, MockHardware};

use fireplace::adapters::http::{INDEX_HTML, respond};
use fireplace::app::service::AppService;
use fireplace::app::shared::SharedController;
use fireplace::clock::Instant;
use fireplace::config::ControllerConfig;

fn ctrl() -> SharedController {
    SharedController::new(AppService::new(ControllerConfig::default()))
}

fn ms(v: u64) -> Instant {
    Instant::from_millis(v)
}

#[test]
fn landing_page_polls_status_and_links_control() {
    let r = respond("/", &ctrl(), ms(0));
    assert_eq!(r.status, 200);
    assert!(r.body.contains("/status"));
    assert!(r.body.contains("/control?"));
    assert_eq!(r.body, INDEX_HTML);
}

#[test]
fn fresh_controller_status_document() {
    let r = respond("/status", &ctrl(), ms(0));
    assert_eq!(r.content_type, "application/json");
    assert_eq!(
        r.body,
        r#"{"active":false,"safety":false,"thermo_mv":0,"wall_switch":false,"valve_state":0,"led_state":0,"bypass_state":0,"timer_left":0}"#
    );
}

#[test]
fn control_then_tick_then_status() {
    let c = ctrl();
    let mut hw = MockHardware::lit();
    let mut sink = CollectSink::new();

    assert_eq!(respond("/control?state=off&timer=5", &c, ms(0)).body, "OK");
    c.tick(ms(10), &mut hw, &mut sink);

    let v: serde_json::Value =
        serde_json::from_str(&respond("/status", &c, ms(1_000)).body).unwrap();
    assert_eq!(v["active"], true);
    assert_eq!(v["safety"], true);
    assert_eq!(v["thermo_mv"], 300);
    assert_eq!(v["valve_state"], 1);
    assert_eq!(v["timer_left"], 299);
}

#[test]
fn status_query_string_is_ignored() {
    let c = ctrl();
    let plain = respond("/status", &c, ms(0));
    assert_eq!(respond("/status?state=on", &c, ms(0)), plain);
    assert!(!c.state().desired_on);
}

#[test]
fn control_without_parameters_is_a_no_op() {
    let c = ctrl();
    let before = c.state();
    let r = respond("/control", &c, ms(0));
    assert_eq!(r.body, "OK");
    assert_eq!(c.state(), before);
}

#[test]
fn repeated_keys_first_wins() {
    let c = ctrl();
    respond("/control?state=on&state=off", &c, ms(0));
    assert!(c.state().desired_on);
}

#[test]
fn unknown_routes_are_not_found() {
    let c = ctrl();
    for uri in ["/index.html", "/status/", "/controls?state=on", "/api/status"] {
        let r = respond(uri, &c, ms(0));
        assert_eq!(r.status, 404, "{uri}");
        assert_eq!(r.body, "Not found");
    }
    assert!(!c.state().desired_on);
}
