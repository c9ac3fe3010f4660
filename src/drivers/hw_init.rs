//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC1 oneshot unit (with calibration, for millivolt
//! readings) and the two discrete inputs using raw ESP-IDF sys calls.
//! Called once from `main()` before the control thread starts.  The
//! outputs are owned by `PinDriver`s built in `main()`.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::{info, warn};

use crate::error::InitError;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), InitError> {
    // SAFETY: Called once from main() before the control thread exists.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), InitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot + calibration) ───────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut ADC1_CALI: adc_cali_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), InitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(InitError::Adc(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe {
        adc_oneshot_config_channel(ADC1_HANDLE, pins::THERMOCOUPLE_ADC1_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 {
        return Err(InitError::Adc(ret));
    }

    let cali_cfg = adc_cali_line_fitting_config_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        ..Default::default()
    };
    // SAFETY: ADC1_CALI is only written here, once at boot.
    let ret = unsafe { adc_cali_create_scheme_line_fitting(&cali_cfg, &raw mut ADC1_CALI) };
    if ret != ESP_OK as i32 {
        return Err(InitError::AdcCalibration(ret));
    }

    info!(
        "hw_init: ADC1 CH{} configured (thermocouple, GPIO{})",
        pins::THERMOCOUPLE_ADC1_CHANNEL,
        pins::THERMOCOUPLE_GPIO
    );
    Ok(())
}

/// Calibrated millivolt reading of an ADC1 channel.  A failed read
/// returns 0 mV, which is outside any sane safety band.
#[cfg(target_os = "espidf")]
pub fn adc1_read_mv(channel: u32) -> i32 {
    let mut raw: i32 = 0;
    let mut mv: i32 = 0;
    // SAFETY: both handles are written once in init_adc() before the
    // control thread starts; only that thread calls this function.
    unsafe {
        if adc_oneshot_read(ADC1_HANDLE, channel, &mut raw) != ESP_OK as i32 {
            warn!("ADC1 CH{channel}: read failed");
            return 0;
        }
        if adc_cali_raw_to_voltage(ADC1_CALI, raw, &mut mv) != ESP_OK as i32 {
            warn!("ADC1 CH{channel}: calibration failed (raw={raw})");
            return 0;
        }
    }
    mv
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read_mv(_channel: u32) -> i32 {
    0
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), InitError> {
    // Both inputs are active HIGH; pull-down keeps a floating wire LOW.
    for &pin in &[pins::WALL_SWITCH_GPIO, pins::MASTER_BYPASS_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(InitError::Gpio(ret));
        }
    }

    info!("hw_init: GPIO inputs configured (pull-down)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    false
}
