//! Sample source lifecycle.
//!
//! The host owns the real sensor subscription. This module models it as an
//! explicit `start()`/`stop()` pair driven from the host's foreground and
//! background hooks, so no global state is needed to know whether samples
//! should flow.

use tracing::debug;

use crate::shake_filter::{OnShakeListener, ShakeDetector};
use crate::types::TimedSample;

/// Something that delivers timestamped accelerometer samples while active.
pub trait MotionSampleSource {
    /// Begin delivering samples. Calling it while active is a no-op.
    fn start(&mut self);

    /// Stop delivering samples. Calling it while stopped is a no-op.
    fn stop(&mut self);

    fn is_active(&self) -> bool;

    /// Next available sample, or `None` if stopped or nothing is pending.
    fn poll(&mut self) -> Option<TimedSample>;
}

/// An in-memory recording played back through the source lifecycle.
///
/// Stopping suspends playback at the current position; starting again
/// resumes from there.
#[derive(Debug, Clone, Default)]
pub struct RecordedSource {
    samples: Vec<TimedSample>,
    position: usize,
    active: bool,
}

impl RecordedSource {
    /// Create a stopped source over `samples`.
    pub fn new(samples: Vec<TimedSample>) -> Self {
        Self {
            samples,
            position: 0,
            active: false,
        }
    }

    /// Samples not yet delivered.
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }

    /// Rewind to the first sample. Does not change the active flag.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl MotionSampleSource for RecordedSource {
    fn start(&mut self) {
        if !self.active {
            debug!(remaining = self.remaining(), "recorded source started");
            self.active = true;
        }
    }

    fn stop(&mut self) {
        if self.active {
            debug!(remaining = self.remaining(), "recorded source stopped");
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn poll(&mut self) -> Option<TimedSample> {
        if !self.active {
            return None;
        }
        let sample = self.samples.get(self.position).copied()?;
        self.position += 1;
        Some(sample)
    }
}

/// Drain every sample a source has available into `detector`.
///
/// Delivery is synchronous and in order. Returns the number of samples
/// processed; zero if the source is stopped.
pub fn pump<S, L>(source: &mut S, detector: &mut ShakeDetector<L>) -> usize
where
    S: MotionSampleSource + ?Sized,
    L: OnShakeListener,
{
    let mut processed = 0;
    while let Some(timed) = source.poll() {
        detector.process_timed(&timed);
        processed += 1;
    }
    processed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> Vec<TimedSample> {
        vec![
            TimedSample::new(0, 30.0, 9.8, 9.8),
            TimedSample::new(500, 30.0, 9.8, 9.8),
            TimedSample::new(1_500, 30.0, 9.8, 9.8),
        ]
    }

    #[test]
    fn test_stopped_source_delivers_nothing() {
        let mut source = RecordedSource::new(recording());
        assert!(!source.is_active());
        assert_eq!(source.poll(), None);
        assert_eq!(source.remaining(), 3);
    }

    #[test]
    fn test_start_stop_are_idempotent() {
        let mut source = RecordedSource::new(recording());
        source.start();
        source.start();
        assert!(source.is_active());
        source.stop();
        source.stop();
        assert!(!source.is_active());
    }

    #[test]
    fn test_stop_suspends_and_resume_continues() {
        let mut source = RecordedSource::new(recording());
        source.start();
        assert_eq!(source.poll().map(|s| s.timestamp_ms), Some(0));

        source.stop();
        assert_eq!(source.poll(), None);

        source.start();
        assert_eq!(source.poll().map(|s| s.timestamp_ms), Some(500));
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_pump_runs_detector() {
        let mut shakes = 0;
        let mut source = RecordedSource::new(recording());
        {
            let mut detector = ShakeDetector::new(|| shakes += 1);

            assert_eq!(pump(&mut source, &mut detector), 0);

            source.start();
            assert_eq!(pump(&mut source, &mut detector), 3);
            assert!(source.is_exhausted());
        }
        assert_eq!(shakes, 2);
    }

    #[test]
    fn test_rewind() {
        let mut source = RecordedSource::new(recording());
        source.start();
        while source.poll().is_some() {}
        source.rewind();
        assert_eq!(source.remaining(), 3);
        assert!(source.is_active());
    }

    #[test]
    fn test_pump_through_trait_object() {
        let mut source: Box<dyn MotionSampleSource> = Box::new(RecordedSource::new(recording()));
        let mut detector = ShakeDetector::new(|| {});
        source.start();
        assert_eq!(pump(source.as_mut(), &mut detector), 3);
        assert_eq!(detector.filter().accepted_count(), 2);
    }
}
