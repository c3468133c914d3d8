//! Shake Sensing Library
//!
//! Detects deliberate shakes in a raw accelerometer stream. Each sample is
//! reduced to a net force by subtracting gravity from every axis; samples at
//! or above a threshold count as shakes, debounced so that one physical shake
//! fires a listener once.
//!
//! # Design
//!
//! - **Host-driven**: the platform delivers samples on one thread and calls
//!   in synchronously. Nothing blocks and nothing is shared.
//! - **Tiny state**: the filter remembers only when it last fired.
//! - **No failure modes**: odd input (NaN, overflow) simply does not fire.
//!
//! # Example
//!
//! ```
//! use shake_sensing::ShakeDetector;
//!
//! let mut shakes = 0;
//! let mut detector = ShakeDetector::new(|| shakes += 1);
//!
//! detector.on_sample(29.8, 9.8, 9.8, 0);     // shake
//! detector.on_sample(29.8, 9.8, 9.8, 500);   // debounced
//! detector.on_sample(29.8, 9.8, 9.8, 1_500); // shake
//! drop(detector);
//!
//! assert_eq!(shakes, 2);
//! ```

pub mod config;
pub mod error;
pub mod ffi;
pub mod replay;
pub mod shake_filter;
pub mod source;
pub mod types;


// Re-export commonly used types
pub use config::ShakeConfig;
pub use error::{ConfigError, ReplayError, Result, ShakeError};
pub use shake_filter::{OnShakeListener, ShakeDetector, ShakeFilter};
pub use source::{pump, MotionSampleSource, RecordedSource};
pub use types::{AccelerationSample, ShakeEvent, ShakeFilterState, TimedSample};
