//! Integration tests for the tick pipeline and command intake.
//!
//! inputs → safety → timer → arbiter → actuators, driven through
//! `SharedController` exactly as the control thread and HTTP handler do.

use crate::mock_hw::{ActuatorCall, CollectSink, MockHardware};

use fireplace::adapters::hardware::SimHardware;
use fireplace::app::commands::{ControlRequest, TimerChange};
use fireplace::app::events::AppEvent;
use fireplace::app::service::AppService;
use fireplace::app::shared::SharedController;
use fireplace::arbiter::DecisionReason;
use fireplace::clock::Instant;
use fireplace::config::ControllerConfig;
use fireplace::sensors::{sim_set_bypass, sim_set_thermocouple_mv, sim_set_wall_switch};

fn make_ctrl() -> (SharedController, CollectSink) {
    let mut sink = CollectSink::new();
    let mut app = AppService::new(ControllerConfig::default());
    app.start(&mut sink);
    (SharedController::new(app), sink)
}

fn ms(v: u64) -> Instant {
    Instant::from_millis(v)
}

fn command(ctrl: &SharedController, query: &str, now: Instant, sink: &mut CollectSink) {
    ctrl.handle_command(&ControlRequest::from_query(query), now, sink);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_reports_band_and_first_tick_closes_valve() {
    let (ctrl, sink) = make_ctrl();
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            min_mv: 150,
            max_mv: 500
        }]
    );

    let mut sink = CollectSink::new();
    let mut hw = MockHardware::new();
    let d = ctrl.tick(ms(0), &mut hw, &mut sink);

    assert!(!d.energize);
    assert_eq!(hw.calls, vec![ActuatorCall::Apply(false)]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ValveChanged { energized: false, .. })),
        1,
        "initial valve level is always reported"
    );
}

// ── Timer expiry boundary ─────────────────────────────────────

#[test]
fn timer_expires_strictly_after_deadline() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit();

    command(&ctrl, "timer=10", ms(0), &mut sink);
    ctrl.tick(ms(10), &mut hw, &mut sink);
    assert!(hw.valve_on());

    ctrl.tick(ms(599_000), &mut hw, &mut sink);
    let s = ctrl.status(ms(599_000));
    assert!(s.active);
    assert_eq!(s.timer_left, 1);

    // Exactly at the deadline: still armed, nothing left to show.
    ctrl.tick(ms(600_000), &mut hw, &mut sink);
    let s = ctrl.status(ms(600_000));
    assert!(s.active);
    assert_eq!(s.timer_left, 0);
    assert!(ctrl.state().timer.is_armed());

    ctrl.tick(ms(600_001), &mut hw, &mut sink);
    let s = ctrl.status(ms(600_001));
    assert!(!s.active);
    assert_eq!(s.timer_left, 0);
    assert!(!ctrl.state().desired_on);
    assert!(!hw.valve_on());

    ctrl.tick(ms(600_011), &mut hw, &mut sink);
    assert_eq!(sink.count(|e| *e == AppEvent::TimerExpired), 1);
}

#[test]
fn rearming_replaces_the_deadline() {
    let (ctrl, mut sink) = make_ctrl();
    command(&ctrl, "timer=30", ms(0), &mut sink);
    command(&ctrl, "timer=1", ms(1_000), &mut sink);
    assert_eq!(ctrl.state().timer_deadline(), Some(ms(61_000)));
}

#[test]
fn timer_expiry_while_bypass_held_keeps_valve_open() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit();
    command(&ctrl, "timer=1", ms(0), &mut sink);
    hw.set_bypass(true);

    ctrl.tick(ms(60_001), &mut hw, &mut sink);
    assert!(!ctrl.state().desired_on);
    assert!(hw.valve_on(), "bypass still wins after the timer fires");
}

// ── Arbiter through the pipeline ──────────────────────────────

#[test]
fn bypass_energizes_with_no_flame_and_no_request() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::new();
    hw.set_mv(0);
    hw.set_bypass(true);

    let d = ctrl.tick(ms(0), &mut hw, &mut sink);
    assert!(d.energize);
    assert_eq!(d.reason, DecisionReason::Bypass);

    let s = ctrl.status(ms(0));
    assert!(s.active);
    assert!(!s.safety);
    assert_eq!((s.valve_state, s.led_state, s.bypass_state), (1, 1, 1));
}

#[test]
fn bypass_release_closes_valve_on_next_tick() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::new();
    hw.set_bypass(true);
    ctrl.tick(ms(0), &mut hw, &mut sink);
    hw.set_bypass(false);
    ctrl.tick(ms(10), &mut hw, &mut sink);

    assert!(!hw.valve_on());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::BypassChanged(_))),
        2,
        "one edge per transition"
    );
}

#[test]
fn flame_loss_closes_valve_but_keeps_intent() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit();
    command(&ctrl, "state=on", ms(0), &mut sink);
    ctrl.tick(ms(10), &mut hw, &mut sink);
    assert!(hw.valve_on());

    hw.set_mv(40);
    let d = ctrl.tick(ms(20), &mut hw, &mut sink);
    assert!(!d.energize);
    assert_eq!(d.reason, DecisionReason::Unsafe);
    assert!(ctrl.state().desired_on);

    // Pilot relit: the standing request is honoured again.
    hw.set_mv(300);
    assert!(ctrl.tick(ms(30), &mut hw, &mut sink).energize);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SafetyChanged { safe: false, mv: 40 })),
        1
    );
}

#[test]
fn band_is_inclusive_at_both_ends() {
    for (mv, safe) in [(149, false), (150, true), (500, true), (501, false)] {
        let (ctrl, mut sink) = make_ctrl();
        let mut hw = MockHardware::new();
        hw.set_mv(mv);
        command(&ctrl, "state=on", ms(0), &mut sink);
        let d = ctrl.tick(ms(10), &mut hw, &mut sink);

        assert_eq!(d.energize, safe, "{mv} mV");
        let s = ctrl.status(ms(10));
        assert_eq!(s.safety, safe, "{mv} mV");
        assert_eq!(s.thermo_mv, mv);
    }
}

#[test]
fn wall_switch_is_reported_but_does_not_drive_valve() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit();
    hw.set_wall_switch(true);
    ctrl.tick(ms(0), &mut hw, &mut sink);

    assert!(!hw.valve_on());
    assert!(ctrl.status(ms(0)).wall_switch);
    assert_eq!(sink.count(|e| *e == AppEvent::WallSwitchChanged(true)), 1);
}

#[test]
fn valve_event_only_on_change() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit();
    for t in 0..5 {
        ctrl.tick(ms(t * 10), &mut hw, &mut sink);
    }
    command(&ctrl, "state=on", ms(50), &mut sink);
    for t in 6..10 {
        ctrl.tick(ms(t * 10), &mut hw, &mut sink);
    }
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ValveChanged { .. })),
        2
    );
    assert_eq!(hw.calls.len(), 9, "outputs are written every tick");
}

#[test]
fn status_reflects_pin_readback_not_command() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit().stuck_valve(false);
    command(&ctrl, "state=on", ms(0), &mut sink);
    ctrl.tick(ms(10), &mut hw, &mut sink);

    let s = ctrl.status(ms(10));
    assert!(s.active);
    assert_eq!(s.valve_state, 0);
    assert_eq!(s.led_state, 1);
}

// ── Command intake ────────────────────────────────────────────

#[test]
fn off_then_timer_turns_on() {
    let (ctrl, mut sink) = make_ctrl();
    let outcome = ctrl.handle_command(
        &ControlRequest::from_query("state=off&timer=5"),
        ms(1_000),
        &mut sink,
    );

    assert!(outcome.desired_after);
    assert_eq!(
        outcome.timer,
        TimerChange::Armed {
            minutes: 5,
            deadline: ms(301_000)
        }
    );
    assert_eq!(ctrl.status(ms(1_000)).timer_left, 300);
}

#[test]
fn off_is_idempotent() {
    let (ctrl, mut sink) = make_ctrl();
    command(&ctrl, "timer=20", ms(0), &mut sink);
    command(&ctrl, "state=off", ms(5), &mut sink);
    let once = ctrl.state();
    command(&ctrl, "state=off", ms(5), &mut sink);

    assert_eq!(ctrl.state(), once);
    assert!(!once.desired_on);
    assert!(!once.timer.is_armed());
    assert_eq!(sink.count(|e| *e == AppEvent::TimerCancelled), 1);
}

#[test]
fn manual_on_cancels_pending_timer() {
    let (ctrl, mut sink) = make_ctrl();
    command(&ctrl, "timer=20", ms(0), &mut sink);
    command(&ctrl, "state=on", ms(5), &mut sink);

    let st = ctrl.state();
    assert!(st.desired_on);
    assert_eq!(st.timer_deadline(), None);

    // Runs until told otherwise.
    let mut hw = MockHardware::lit();
    ctrl.tick(ms(1_200_001), &mut hw, &mut sink);
    assert!(hw.valve_on());
}

#[test]
fn zero_or_negative_timer_cancels_but_keeps_intent() {
    for q in ["timer=0", "timer=-3"] {
        let (ctrl, mut sink) = make_ctrl();
        command(&ctrl, "timer=20", ms(0), &mut sink);
        command(&ctrl, q, ms(5), &mut sink);
        let st = ctrl.state();
        assert!(st.desired_on, "{q}");
        assert!(!st.timer.is_armed(), "{q}");
    }
}

#[test]
fn garbage_parameters_change_nothing() {
    let (ctrl, mut sink) = make_ctrl();
    command(&ctrl, "timer=20", ms(0), &mut sink);
    let before = ctrl.state();
    let outcome = ctrl.handle_command(
        &ControlRequest::from_query("state=ON&timer=soon"),
        ms(5),
        &mut sink,
    );

    assert_eq!(ctrl.state(), before);
    assert_eq!(outcome.ignored.len(), 2);
}

#[test]
fn commands_do_not_touch_actuators() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit();
    ctrl.tick(ms(0), &mut hw, &mut sink);
    let calls = hw.calls.len();

    command(&ctrl, "state=on", ms(5), &mut sink);
    assert_eq!(hw.calls.len(), calls);
    assert!(!ctrl.status(ms(5)).active, "valve follows on the next tick");

    ctrl.tick(ms(10), &mut hw, &mut sink);
    assert!(ctrl.status(ms(10)).active);
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_is_pure() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = MockHardware::lit();
    command(&ctrl, "timer=2", ms(0), &mut sink);
    ctrl.tick(ms(10), &mut hw, &mut sink);

    let before = ctrl.state();
    let a = ctrl.status(ms(30_000));
    let b = ctrl.status(ms(30_000));
    assert_eq!(a, b);
    assert_eq!(a.to_json(), b.to_json());
    assert_eq!(ctrl.state(), before);
    assert_eq!(a.timer_left, 90);
}

// ── Simulated hardware end to end ─────────────────────────────

/// Single test: the simulation inputs are process-wide atomics.
#[test]
fn simulated_hardware_full_cycle() {
    let (ctrl, mut sink) = make_ctrl();
    let mut hw = SimHardware::simulated();

    sim_set_thermocouple_mv(320);
    sim_set_wall_switch(false);
    sim_set_bypass(false);
    command(&ctrl, "state=on", ms(0), &mut sink);
    assert!(ctrl.tick(ms(10), &mut hw, &mut sink).energize);
    let s = ctrl.status(ms(10));
    assert_eq!((s.thermo_mv, s.valve_state, s.led_state), (320, 1, 1));

    sim_set_thermocouple_mv(90);
    assert!(!ctrl.tick(ms(20), &mut hw, &mut sink).energize);
    assert_eq!(ctrl.status(ms(20)).valve_state, 0);

    sim_set_bypass(true);
    sim_set_wall_switch(true);
    assert!(ctrl.tick(ms(30), &mut hw, &mut sink).energize);
    let s = ctrl.status(ms(30));
    assert_eq!((s.bypass_state, s.valve_state), (1, 1));
    assert!(s.wall_switch);

    sim_set_bypass(false);
    sim_set_wall_switch(false);
    sim_set_thermocouple_mv(0);
    assert!(!ctrl.tick(ms(40), &mut hw, &mut sink).energize);
}
