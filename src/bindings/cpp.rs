#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::config::TapDetectorConfig;
use crate::processing::TapProcessor;

use std::os::raw::c_void;

/// Builds a processor and returns an opaque handle, or null if the
/// configuration is invalid. A `required_tap_count` of 0 selects single-tap
/// mode and `tap_timeout` is then ignored.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn create_tap_processor(
    window_size: usize,
    threshold: f64,
    separation: f64,
    dt: f64,
    tau: f64,
    required_tap_count: u32,
    tap_timeout: f64,
    refractory_period: f64,
) -> *mut c_void {
    let mut config = TapDetectorConfig {
        window_size,
        threshold,
        separation,
        dt,
        tau,
        refractory_period,
        multi_tap: None,
    };
    if required_tap_count > 0 {
        config = config.with_multi_tap(required_tap_count, tap_timeout);
    }

    match TapProcessor::new(config) {
        Ok(processor) => Box::into_raw(Box::new(processor)) as *mut c_void,
        Err(e) => {
            log::warn!("create_tap_processor: {}", e);
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "C" fn delete_tap_processor(processor_ptr: *mut c_void) {
    if !processor_ptr.is_null() {
        unsafe {
            drop(Box::from_raw(processor_ptr as *mut TapProcessor));
        }
    }
}

/// Returns 0 for no event, 1 for a tap, 2 for a completed multi-tap and -1
/// for a null handle.
#[no_mangle]
pub extern "C" fn tap_processor_process_sample(
    processor_ptr: *mut c_void,
    raw_sample: f64,
    timestamp: f64,
) -> i32 {
    if processor_ptr.is_null() {
        return -1;
    }
    let processor = unsafe { &mut *(processor_ptr as *mut TapProcessor) };
    processor.process_sample(raw_sample, timestamp).code()
}

#[no_mangle]
pub extern "C" fn tap_processor_reset(processor_ptr: *mut c_void) {
    if processor_ptr.is_null() {
        return;
    }
    let processor = unsafe { &mut *(processor_ptr as *mut TapProcessor) };
    processor.reset();
}

/// Last filtered value, NaN for a null handle.
#[no_mangle]
pub extern "C" fn tap_processor_filtered_sample(processor_ptr: *const c_void) -> f64 {
    if processor_ptr.is_null() {
        return f64::NAN;
    }
    let processor = unsafe { &*(processor_ptr as *const TapProcessor) };
    processor.filtered_sample()
}
