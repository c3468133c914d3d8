//! C FFI Bindings for Mobile Host Integration
//!
//! This module exposes the shake detector to mobile platforms via C ABI.
//! The host forwards each accelerometer callback to `shake_engine_on_sample`
//! and either reads the returned flag or registers a callback.
//!
//! Memory Safety:
//! - The engine instance must be freed with `shake_engine_destroy()`
//! - NULL checks are performed on all inputs
//!
//! Thread Safety:
//! - The engine is NOT thread-safe. Deliver samples from one thread.
//! - The shake callback runs synchronously on the delivering thread.

use std::os::raw::{c_char, c_void};
use std::ptr;

use tracing::warn;

use crate::config::ShakeConfig;
use crate::shake_filter::{OnShakeListener, ShakeDetector};

// ============================================================================
// OPAQUE HANDLE TYPES
// ============================================================================

/// Host callback invoked on every accepted shake.
pub type ShakeCallback = extern "C" fn(user_data: *mut c_void);

/// Listener that forwards to an optional C callback.
pub struct CallbackListener {
    callback: Option<ShakeCallback>,
    user_data: *mut c_void,
}

impl OnShakeListener for CallbackListener {
    fn on_shake(&mut self) {
        if let Some(callback) = self.callback {
            callback(self.user_data);
        }
    }
}

/// Opaque handle to a shake engine.
pub struct ShakeEngine {
    detector: ShakeDetector<CallbackListener>,
}

/// Result status codes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeStatus {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer provided.
    NullPointer = 1,
}

/// Tuning passed from the host.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ShakeEngineConfig {
    /// Minimum net force for a shake (m/s²).
    pub threshold: f32,
    /// Minimum spacing between shakes (ms).
    pub debounce_ms: u64,
    /// Value subtracted from each axis (m/s²).
    pub gravity: f32,
}

impl From<ShakeEngineConfig> for ShakeConfig {
    fn from(config: ShakeEngineConfig) -> Self {
        ShakeConfig {
            threshold: config.threshold,
            debounce_ms: config.debounce_ms,
            gravity: config.gravity,
        }
    }
}

// ============================================================================
// ENGINE LIFECYCLE
// ============================================================================

/// Create a new shake engine.
///
/// # Safety
/// - `config` must be NULL or a valid pointer to ShakeEngineConfig.
/// - The returned pointer must be freed with `shake_engine_destroy()`.
///
/// # Returns
/// - Pointer to ShakeEngine on success. A NULL `config` uses defaults.
/// - NULL if the configuration is invalid.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_create(config: *const ShakeEngineConfig) -> *mut ShakeEngine {
    let config = if config.is_null() {
        ShakeConfig::default()
    } else {
        ShakeConfig::from(*config)
    };

    if let Err(e) = config.validate() {
        warn!("rejecting shake engine config: {}", e);
        return ptr::null_mut();
    }

    let listener = CallbackListener {
        callback: None,
        user_data: ptr::null_mut(),
    };

    Box::into_raw(Box::new(ShakeEngine {
        detector: ShakeDetector::with_config(config, listener),
    }))
}

/// Destroy a shake engine.
///
/// # Safety
/// - `engine` must be a valid pointer from `shake_engine_create()`.
/// - Must not be called more than once for the same pointer.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_destroy(engine: *mut ShakeEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Forget the last shake.
///
/// # Safety
/// - `engine` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_reset(engine: *mut ShakeEngine) -> ShakeStatus {
    if engine.is_null() {
        return ShakeStatus::NullPointer;
    }

    (*engine).detector.reset();
    ShakeStatus::Ok
}

/// Register (or clear, with a NULL callback) the shake callback.
///
/// # Safety
/// - `engine` must be a valid pointer.
/// - `user_data` is passed back untouched and must stay valid while set.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_set_listener(
    engine: *mut ShakeEngine,
    callback: Option<ShakeCallback>,
    user_data: *mut c_void,
) -> ShakeStatus {
    if engine.is_null() {
        return ShakeStatus::NullPointer;
    }

    let listener = (*engine).detector.listener_mut();
    listener.callback = callback;
    listener.user_data = user_data;
    ShakeStatus::Ok
}

// ============================================================================
// SAMPLE PROCESSING
// ============================================================================

/// Process a single accelerometer sample.
///
/// # Safety
/// - `engine` must be a valid pointer.
/// - `accepted` must be NULL or a valid pointer; it receives 1 if the
///   sample was accepted as a shake and 0 otherwise.
///
/// # Parameters
/// - `timestamp_ms`: Sample time in milliseconds.
/// - `accel_x/y/z`: Accelerometer readings in m/s², gravity included.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_on_sample(
    engine: *mut ShakeEngine,
    timestamp_ms: u64,
    accel_x: f32,
    accel_y: f32,
    accel_z: f32,
    accepted: *mut i32,
) -> ShakeStatus {
    if engine.is_null() {
        return ShakeStatus::NullPointer;
    }

    let shook = (*engine)
        .detector
        .on_sample(accel_x, accel_y, accel_z, timestamp_ms);

    if !accepted.is_null() {
        *accepted = i32::from(shook);
    }
    ShakeStatus::Ok
}

/// Timestamp of the last accepted shake, 0 if none.
///
/// # Safety
/// - `engine` must be a valid pointer.
///
/// # Returns
/// - 0 on NULL.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_last_shake_ms(engine: *const ShakeEngine) -> u64 {
    if engine.is_null() {
        return 0;
    }
    (*engine).detector.filter().last_shake_ms()
}

/// Number of shakes accepted since creation or reset, -1 on NULL.
///
/// # Safety
/// - `engine` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_shake_count(engine: *const ShakeEngine) -> i64 {
    if engine.is_null() {
        return -1;
    }
    count_for_c((*engine).detector.filter().accepted_count())
}

/// Counts saturate at `i64::MAX` so they never go negative and collide with
/// the -1 NULL sentinel.
fn count_for_c(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

// ============================================================================
// VERSION INFO
// ============================================================================

/// Get the library version string.
///
/// # Returns
/// - Static string, do NOT free.
#[no_mangle]
pub extern "C" fn shake_version() -> *const c_char {
    static VERSION: &[u8] = b"shake-sensing/0.1.0\0";
    VERSION.as_ptr() as *const c_char
}

// ============================================================================
// TESTS
// ============================================================================
