//! Fuzz target: `/control` query handling
//!
//! Feeds arbitrary query strings through `ControlRequest::from_query` and
//! applies the result to a controller state.  Asserts the command path
//! never panics, never touches the safety flag, and leaves the timer and
//! intent consistent with what was parsed.
//!
//! cargo fuzz run fuzz_control_query

#![no_main]

use libfuzzer_sys::fuzz_target;
use fireplace::app::commands::{ControlRequest, StateToken, TimerArg, TimerChange};
use fireplace::clock::Instant;
use fireplace::state::ControllerState;

fuzz_target!(|data: &[u8]| {
    let Ok(query) = core::str::from_utf8(data) else {
        return;
    };

    let req = ControlRequest::from_query(query);
    let _ = req.to_string();

    let mut state = ControllerState::default();
    state.is_safe = true;
    state.safety_mv = 300;
    let now = Instant::from_secs(3_600);
    let before = state.clone();

    let outcome = req.apply(&mut state, now);

    // Commands never write sensor-derived fields.
    assert_eq!(state.is_safe, before.is_safe);
    assert_eq!(state.safety_mv, before.safety_mv);
    assert_eq!(state.valve_energized, before.valve_energized);

    match req.timer {
        Some(TimerArg::Minutes(n)) if n > 0 => {
            assert!(state.desired_on, "positive timer implies on");
            assert!(matches!(outcome.timer, TimerChange::Armed { .. }));
            assert!(state.timer_deadline().is_some_and(|d| d > now));
        }
        _ => {
            assert!(!state.timer.is_armed(), "nothing else arms a timer");
            match req.state {
                Some(StateToken::On) => assert!(state.desired_on),
                Some(StateToken::Off) => assert!(!state.desired_on),
                _ => assert_eq!(state.desired_on, before.desired_on),
            }
        }
    }
    assert_eq!(outcome.desired_after, state.desired_on);
});
