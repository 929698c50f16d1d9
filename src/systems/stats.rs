//! Frame statistics
//!
//! Counts drawn frames and reports the frame rate together with the latest
//! particle and link counts once per interval.

use std::time::{Duration, Instant};
use swarmfield_core::FrameReport;

/// One statistics sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsSample {
    pub fps: f64,
    pub particles: usize,
    pub links: usize,
}

impl std::fmt::Display for StatsSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0} fps | {} particles | {} links",
            self.fps, self.particles, self.links
        )
    }
}

/// Aggregates frame reports into periodic samples
#[derive(Debug)]
pub struct FrameStats {
    interval: Duration,
    frames_since_last_sample: usize,
    last_sample_at: Instant,
    latest: Option<StatsSample>,
}

impl FrameStats {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            frames_since_last_sample: 0,
            last_sample_at: now,
            latest: None,
        }
    }

    /// Record a drawn frame; returns a new sample once the interval has elapsed
    pub fn record(&mut self, report: FrameReport, now: Instant) -> Option<StatsSample> {
        self.frames_since_last_sample += 1;

        let elapsed = now.saturating_duration_since(self.last_sample_at);
        if elapsed < self.interval || elapsed.is_zero() {
            return None;
        }

        let sample = StatsSample {
            fps: self.frames_since_last_sample as f64 / elapsed.as_secs_f64(),
            particles: report.particles,
            links: report.links,
        };
        self.frames_since_last_sample = 0;
        self.last_sample_at = now;
        self.latest = Some(sample);

        log::debug!("{}", sample);
        Some(sample)
    }

    /// Most recent sample, if any interval has completed
    pub fn latest(&self) -> Option<StatsSample> {
        self.latest
    }

    /// Start a fresh interval, e.g. after the field was remounted
    pub fn reset(&mut self, now: Instant) {
        self.frames_since_last_sample = 0;
        self.last_sample_at = now;
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(particles: usize, links: usize) -> FrameReport {
        FrameReport { particles, links }
    }

    #[test]
    fn test_no_sample_before_interval() {
        let start = Instant::now();
        let mut stats = FrameStats::new(Duration::from_secs(1), start);
        for i in 1..10 {
            let now = start + Duration::from_millis(i * 100);
            assert_eq!(stats.record(report(40, 12), now), None);
        }
        assert_eq!(stats.latest(), None);
    }

    #[test]
    fn test_sample_after_interval() {
        let start = Instant::now();
        let mut stats = FrameStats::new(Duration::from_secs(1), start);
        for i in 1..60 {
            stats.record(report(40, 12), start + Duration::from_millis(i * 16));
        }
        let sample = stats
            .record(report(40, 15), start + Duration::from_secs(2))
            .expect("interval elapsed");

        // 60 frames over 2 seconds
        assert!((sample.fps - 30.0).abs() < 1e-9);
        assert_eq!(sample.particles, 40);
        assert_eq!(sample.links, 15);
        assert_eq!(stats.latest(), Some(sample));
    }

    #[test]
    fn test_reset_clears_latest() {
        let start = Instant::now();
        let mut stats = FrameStats::new(Duration::from_millis(10), start);
        stats.record(report(1, 0), start + Duration::from_millis(20));
        assert!(stats.latest().is_some());

        stats.reset(start + Duration::from_millis(30));
        assert_eq!(stats.latest(), None);
    }

    #[test]
    fn test_sample_display() {
        let sample = StatsSample {
            fps: 59.6,
            particles: 153,
            links: 87,
        };
        assert_eq!(sample.to_string(), "60 fps | 153 particles | 87 links");
    }
}
