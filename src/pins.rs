//! GPIO / peripheral pin assignments for the fireplace controller board.
//!
//! Single source of truth.  Every driver references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Thermocouple (analog, ADC1)
// ---------------------------------------------------------------------------

/// Thermocouple / thermopile sense line.  ADC1 channel 6 on the ESP32.
pub const THERMOCOUPLE_GPIO: i32 = 34;
/// ADC1 channel number for [`THERMOCOUPLE_GPIO`].
pub const THERMOCOUPLE_ADC1_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// Discrete inputs (active HIGH, internal pull-down)
// ---------------------------------------------------------------------------

/// Wall switch.  RTC-capable pin; advisory only, does not gate the valve.
pub const WALL_SWITCH_GPIO: i32 = 33;
/// Master bypass.  HIGH forces the valve open.
pub const MASTER_BYPASS_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Gas valve driver.  HIGH = valve energised (gas flows).
pub const VALVE_OUTPUT_GPIO: i32 = 17;
/// Onboard LED.  Mirrors the valve output.
pub const ONBOARD_LED_GPIO: i32 = 2;
