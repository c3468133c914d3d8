//! Core data types for shake detection.
//!
//! Samples are ephemeral: the filter reads them and keeps nothing but the
//! timestamp of the last accepted shake. All acceleration values are in m/s²,
//! device frame, gravity included.

/// A single raw accelerometer reading.
///
/// Design note: f32 matches what mobile sensor APIs deliver. Precision beyond
/// that is not needed for a threshold decision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelerationSample {
    /// X axis acceleration in m/s².
    pub x: f32,
    /// Y axis acceleration in m/s².
    pub y: f32,
    /// Z axis acceleration in m/s².
    pub z: f32,
}

impl AccelerationSample {
    /// Creates a new sample from the three axis readings.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a sample from an `[x, y, z]` array.
    pub fn from_array(accel: [f32; 3]) -> Self {
        Self::new(accel[0], accel[1], accel[2])
    }

    /// Returns the readings as an `[x, y, z]` array.
    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Subtract `gravity` from every axis independently.
    ///
    /// This does not account for device orientation: the same scalar is
    /// removed from x, y and z. A device lying still therefore reads as
    /// zero force only when each axis happens to read `gravity`.
    pub fn gravity_compensated(&self, gravity: f32) -> [f32; 3] {
        [self.x - gravity, self.y - gravity, self.z - gravity]
    }

    /// Euclidean norm of the gravity-compensated vector (m/s²).
    ///
    /// NaN inputs propagate to a NaN result.
    pub fn net_force(&self, gravity: f32) -> f32 {
        let [gx, gy, gz] = self.gravity_compensated(gravity);
        (gx * gx + gy * gy + gz * gz).sqrt()
    }
}

impl From<[f32; 3]> for AccelerationSample {
    fn from(accel: [f32; 3]) -> Self {
        Self::from_array(accel)
    }
}

/// A sample paired with the time it was delivered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    /// Delivery time in milliseconds (wall clock or monotonic, host's choice).
    pub timestamp_ms: u64,
    /// The accelerometer reading delivered at `timestamp_ms`.
    pub sample: AccelerationSample,
}

impl TimedSample {
    /// Creates a timestamped sample from the three axis readings.
    pub fn new(timestamp_ms: u64, x: f32, y: f32, z: f32) -> Self {
        Self {
            timestamp_ms,
            sample: AccelerationSample::new(x, y, z),
        }
    }
}

/// Mutable state of a shake filter.
///
/// The last shake time never decreases and only moves when a shake is
/// accepted. `None` means no shake has been accepted yet, so the first
/// qualifying sample is never debounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShakeFilterState {
    pub last_shake: Option<u64>,
}

impl ShakeFilterState {
    /// Timestamp of the last accepted shake, 0 until the first one.
    pub fn last_shake_ms(&self) -> u64 {
        self.last_shake.unwrap_or(0)
    }
}

/// Record of an accepted shake.
///
/// The live notification to listeners carries no arguments; this type is for
/// batch processing and offline replay where the caller wants to see what
/// fired and when.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeEvent {
    /// Time the shake was accepted (ms).
    pub timestamp_ms: u64,
    /// Net force of the triggering sample (m/s²).
    pub net_force: f32,
}
