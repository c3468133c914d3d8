//! Shake Detection Module.
//!
//! Turns a stream of accelerometer samples into discrete shake events:
//! - Gravity bias removed by subtracting a scalar from each axis
//! - Net force taken as the Euclidean norm of what remains
//! - Samples below the threshold are ignored outright
//! - Qualifying samples are debounced against the last accepted shake
//!
//! The filter keeps a single timestamp of state and never fails. Sample
//! delivery is serialized by the host, so nothing here is synchronized.

use tracing::{debug, trace};

use crate::config::ShakeConfig;
use crate::types::{AccelerationSample, ShakeEvent, ShakeFilterState, TimedSample};

/// Receiver for accepted shakes.
///
/// Any `FnMut()` closure is a listener.
pub trait OnShakeListener {
    fn on_shake(&mut self);
}

impl<F: FnMut()> OnShakeListener for F {
    fn on_shake(&mut self) {
        self()
    }
}

/// Threshold-and-debounce shake filter.
#[derive(Debug, Clone)]
pub struct ShakeFilter {
    config: ShakeConfig,
    state: ShakeFilterState,
    accepted_count: u64,
}

impl ShakeFilter {
    /// Create a new filter with the given configuration.
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            state: ShakeFilterState::default(),
            accepted_count: 0,
        }
    }

    /// Decide whether `sample`, observed at `now_ms`, is a new shake.
    ///
    /// Returns true and records `now_ms` as the last shake time when the
    /// net force reaches the threshold and either no shake has been accepted
    /// yet or strictly more than the debounce interval has passed since the
    /// previous one. A NaN force never compares as reaching the threshold.
    pub fn process_sample(&mut self, sample: &AccelerationSample, now_ms: u64) -> bool {
        let net_force = self.net_force(sample);
        if net_force.is_nan() || net_force < self.config.threshold {
            return false;
        }

        if let Some(last) = self.state.last_shake {
            let ready_at = last.saturating_add(self.config.debounce_ms);
            if now_ms <= ready_at {
                trace!(now_ms, ready_at, net_force, "shake candidate debounced");
                return false;
            }
        }

        self.state.last_shake = Some(now_ms);
        self.accepted_count += 1;
        debug!(timestamp_ms = now_ms, net_force, "shake accepted");
        true
    }

    /// Net force of a sample under this filter's gravity setting (m/s²).
    pub fn net_force(&self, sample: &AccelerationSample) -> f32 {
        sample.net_force(self.config.gravity)
    }

    pub fn state(&self) -> ShakeFilterState {
        self.state
    }

    /// Timestamp of the last accepted shake, 0 if none yet.
    pub fn last_shake_ms(&self) -> u64 {
        self.state.last_shake_ms()
    }

    /// Number of shakes accepted since creation or the last reset.
    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    /// Forget the last shake, as if the filter were freshly created.
    pub fn reset(&mut self) {
        self.state = ShakeFilterState::default();
        self.accepted_count = 0;
    }
}

impl Default for ShakeFilter {
    fn default() -> Self {
        Self::new(ShakeConfig::default())
    }
}

/// A shake filter wired to a listener.
///
/// This is the inbound surface a sensor callback calls into: one call per
/// delivered sample, with the listener invoked synchronously on acceptance.
pub struct ShakeDetector<L: OnShakeListener> {
    filter: ShakeFilter,
    listener: L,
}

impl<L: OnShakeListener> ShakeDetector<L> {
    /// Create a detector with default tuning.
    pub fn new(listener: L) -> Self {
        Self::with_config(ShakeConfig::default(), listener)
    }

    pub fn with_config(config: ShakeConfig, listener: L) -> Self {
        Self {
            filter: ShakeFilter::new(config),
            listener,
        }
    }

    /// Feed one raw reading. Returns true if it fired the listener.
    pub fn on_sample(&mut self, x: f32, y: f32, z: f32, timestamp_ms: u64) -> bool {
        self.process(&AccelerationSample::new(x, y, z), timestamp_ms)
    }

    /// Feed one timestamped sample. Returns true if it fired the listener.
    pub fn process_timed(&mut self, timed: &TimedSample) -> bool {
        self.process(&timed.sample, timed.timestamp_ms)
    }

    /// Process samples in order, firing the listener for each accepted shake
    /// and returning a record of every one.
    pub fn process_batch(&mut self, samples: &[TimedSample]) -> Vec<ShakeEvent> {
        let mut events = Vec::new();
        for timed in samples {
            if self.process_timed(timed) {
                events.push(ShakeEvent {
                    timestamp_ms: timed.timestamp_ms,
                    net_force: self.filter.net_force(&timed.sample),
                });
            }
        }
        events
    }

    pub fn filter(&self) -> &ShakeFilter {
        &self.filter
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }

    fn process(&mut self, sample: &AccelerationSample, timestamp_ms: u64) -> bool {
        let accepted = self.filter.process_sample(sample, timestamp_ms);
        if accepted {
            self.listener.on_shake();
        }
        accepted
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample whose net force is `force` along x under 9.8 gravity.
    fn shake_with_force(force: f32) -> AccelerationSample {
        AccelerationSample::new(9.8 + force, 9.8, 9.8)
    }

    #[test]
    fn test_filter_creation() {
        let filter = ShakeFilter::default();
        assert_eq!(filter.last_shake_ms(), 0);
        assert_eq!(filter.accepted_count(), 0);
        assert_eq!(filter.config(), &ShakeConfig::default());
    }

    #[test]
    fn test_weak_motion_never_fires() {
        let mut filter = ShakeFilter::default();
        for t in [0, 5_000, 10_000, 1_000_000] {
            assert!(!filter.process_sample(&shake_with_force(16.9), t));
        }
        assert_eq!(filter.last_shake_ms(), 0);
    }

    #[test]
    fn test_stationary_device_never_fires() {
        let mut filter = ShakeFilter::default();
        assert!(!filter.process_sample(&AccelerationSample::new(9.8, 9.8, 9.8), 5_000));
    }

    #[test]
    fn test_first_shake_accepted_and_recorded() {
        let mut filter = ShakeFilter::default();
        assert!(filter.process_sample(&shake_with_force(20.0), 5_000));
        assert_eq!(filter.last_shake_ms(), 5_000);
        assert_eq!(filter.state().last_shake, Some(5_000));
        assert_eq!(filter.accepted_count(), 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut filter = ShakeFilter::default();
        assert_eq!(filter.net_force(&shake_with_force(17.0)), 17.0);
        assert!(filter.process_sample(&shake_with_force(17.0), 5_000));
    }

    #[test]
    fn test_debounce_boundary_is_exclusive() {
        let mut filter = ShakeFilter::default();
        let sample = shake_with_force(20.0);
        assert!(filter.process_sample(&sample, 10_000));

        assert!(!filter.process_sample(&sample, 10_999));
        assert!(!filter.process_sample(&sample, 11_000));
        assert_eq!(filter.last_shake_ms(), 10_000);

        assert!(filter.process_sample(&sample, 11_001));
        assert_eq!(filter.last_shake_ms(), 11_001);
    }

    #[test]
    fn test_first_shake_at_time_zero() {
        let mut filter = ShakeFilter::default();
        assert!(filter.process_sample(&shake_with_force(20.0), 0));
        assert_eq!(filter.state().last_shake, Some(0));
        assert!(!filter.process_sample(&shake_with_force(20.0), 1_000));
        assert!(filter.process_sample(&shake_with_force(20.0), 1_001));
    }

    #[test]
    fn test_rejected_candidate_does_not_extend_window() {
        let mut filter = ShakeFilter::default();
        let sample = shake_with_force(20.0);
        assert!(filter.process_sample(&sample, 2_000));
        assert!(!filter.process_sample(&sample, 2_900));
        // Window measured from 2000, not from the debounced 2900.
        assert!(filter.process_sample(&sample, 3_001));
    }

    #[test]
    fn test_nan_suppresses_shake() {
        let mut filter = ShakeFilter::default();
        let sample = AccelerationSample::new(f32::NAN, 9.8, 9.8);
        assert!(!filter.process_sample(&sample, 5_000));
        assert_eq!(filter.last_shake_ms(), 0);
    }

    #[test]
    fn test_saturating_debounce_near_max() {
        let mut filter = ShakeFilter::default();
        let sample = shake_with_force(20.0);
        assert!(filter.process_sample(&sample, u64::MAX - 10));
        assert!(!filter.process_sample(&sample, u64::MAX));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = ShakeFilter::default();
        assert!(filter.process_sample(&shake_with_force(20.0), 5_000));
        filter.reset();
        assert_eq!(filter.last_shake_ms(), 0);
        assert_eq!(filter.accepted_count(), 0);
        assert!(filter.process_sample(&shake_with_force(20.0), 5_100));
    }

    #[test]
    fn test_custom_config() {
        let config = ShakeConfig {
            threshold: 5.0,
            debounce_ms: 100,
            gravity: 0.0,
        };
        let mut filter = ShakeFilter::new(config);
        assert!(filter.process_sample(&AccelerationSample::new(3.0, 4.0, 0.0), 200));
        assert!(!filter.process_sample(&AccelerationSample::new(3.0, 4.0, 0.0), 300));
        assert!(filter.process_sample(&AccelerationSample::new(3.0, 4.0, 0.0), 301));
    }

    #[test]
    fn test_zero_debounce_requires_strictly_later_timestamp() {
        let config = ShakeConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        let mut filter = ShakeFilter::new(config);
        let sample = shake_with_force(20.0);
        assert!(filter.process_sample(&sample, 5));
        assert!(!filter.process_sample(&sample, 5));
        assert!(filter.process_sample(&sample, 6));
        assert_eq!(filter.accepted_count(), 2);
    }

    #[test]
    fn test_detector_fires_listener() {
        let mut fired = 0;
        {
            let mut detector = ShakeDetector::new(|| fired += 1);
            assert!(detector.on_sample(30.0, 9.8, 9.8, 5_000));
            assert!(!detector.on_sample(30.0, 9.8, 9.8, 5_500));
            assert!(!detector.on_sample(9.8, 9.8, 9.8, 7_000));
            assert!(detector.on_sample(30.0, 9.8, 9.8, 7_000));
        }
        assert_eq!(fired, 2);
    }

    struct CountingListener {
        shakes: u32,
    }

    impl OnShakeListener for CountingListener {
        fn on_shake(&mut self) {
            self.shakes += 1;
        }
    }

    #[test]
    fn test_detector_with_struct_listener() {
        let mut detector = ShakeDetector::new(CountingListener { shakes: 0 });
        detector.on_sample(30.0, 9.8, 9.8, 5_000);
        assert_eq!(detector.listener().shakes, 1);

        detector.listener_mut().shakes = 0;
        detector.reset();
        assert_eq!(detector.filter().last_shake_ms(), 0);
    }

    #[test]
    fn test_process_batch_records_events() {
        let mut detector = ShakeDetector::new(|| {});
        let samples = vec![
            TimedSample::new(2_000, 9.8 + 20.0, 9.8, 9.8),
            TimedSample::new(2_500, 9.8 + 20.0, 9.8, 9.8),
            TimedSample::new(3_500, 9.8 + 20.0, 9.8, 9.8),
        ];

        let events = detector.process_batch(&samples);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp_ms, 2_000);
        assert_eq!(events[1].timestamp_ms, 3_500);
        assert_eq!(events[0].net_force, 20.0);
    }
}
