//! FFI bindings for bodyweight
//!
//! C-compatible functions for calling the BMI assessment from other languages.
//! Strings returned by these functions are allocated by Rust and must be freed
//! by the caller using `bmi_free_string`.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use crate::body_weight::BodyWeight;
use crate::report::assess;
use crate::units::UnitSystem;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn unit_system(imperial: i32) -> UnitSystem {
    if imperial != 0 {
        UnitSystem::Imperial
    } else {
        UnitSystem::Metric
    }
}

/// Assess a height and weight and return the report as JSON.
///
/// `imperial` is non-zero for inches and pounds, zero for centimeters and
/// kilograms.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `bmi_free_string`.
/// - Returns NULL on error; call `bmi_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn bmi_assess(height: f64, weight: f64, imperial: i32) -> *mut c_char {
    clear_last_error();

    match assess(height, weight, unit_system(imperial)).and_then(|report| report.to_json()) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Check whether a goal weight is healthy for the given person.
///
/// `target` is in the same units as `weight`.
///
/// # Safety
/// - Returns 1 if healthy, 0 if not, -1 on invalid input; call
///   `bmi_last_error` for the reason.
#[no_mangle]
pub unsafe extern "C" fn bmi_is_target_weight_healthy(
    height: f64,
    weight: f64,
    imperial: i32,
    target: f64,
) -> i32 {
    clear_last_error();

    match BodyWeight::new(height, weight, unit_system(imperial)) {
        Ok(body_weight) => i32::from(body_weight.is_target_weight_healthy(target)),
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to the last error message, or NULL if no error.
/// - The returned string is valid until the next bodyweight function call on
///   this thread.
/// - Do NOT free this pointer.
#[no_mangle]
pub unsafe extern "C" fn bmi_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Free a string returned by bodyweight functions.
///
/// # Safety
/// - `s` must be a pointer returned by a bodyweight function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn bmi_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the bodyweight library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn bmi_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
