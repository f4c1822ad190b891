use std::time::{Duration, Instant};

/// Decides when the next playback frame is due
///
/// The deadline is re-armed with the interval in force when a frame fires,
/// so a speed change applies from the following wait onward.
#[derive(Debug, Clone)]
pub struct FramePacer {
    next_due: Instant,
}

impl FramePacer {
    /// First frame is due immediately
    pub fn new(now: Instant) -> Self {
        Self { next_due: now }
    }

    /// Returns true when a frame should run at `now`, and schedules the next one
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + interval;
        true
    }

    pub fn deadline(&self) -> Instant {
        self.next_due
    }
}

/// Target frame rate for a given step interval in milliseconds
pub fn target_fps(interval_ms: f64) -> f64 {
    if interval_ms <= 0.0 {
        return 0.0;
    }
    1000.0 / interval_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_due_immediately() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(start);
        assert!(pacer.poll(start, Duration::from_millis(200)));
        assert_eq!(pacer.deadline(), start + Duration::from_millis(200));
    }

    #[test]
    fn test_waits_for_interval() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(start);
        let interval = Duration::from_millis(100);
        assert!(pacer.poll(start, interval));

        assert!(!pacer.poll(start + Duration::from_millis(50), interval));
        assert_eq!(pacer.deadline(), start + interval);
        assert!(pacer.poll(start + Duration::from_millis(100), interval));
    }

    #[test]
    fn test_speed_change_applies_to_next_wait() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(start);
        assert!(pacer.poll(start, Duration::from_millis(1000)));

        // Faster setting does not shorten the wait already armed
        assert!(!pacer.poll(start + Duration::from_millis(20), Duration::from_millis(10)));

        let fired_at = start + Duration::from_millis(1000);
        assert!(pacer.poll(fired_at, Duration::from_millis(10)));
        assert_eq!(pacer.deadline(), fired_at + Duration::from_millis(10));
    }

    #[test]
    fn test_target_fps() {
        assert_eq!(target_fps(200.0), 5.0);
        assert_eq!(target_fps(10.0), 100.0);
        assert_eq!(target_fps(0.0), 0.0);
    }
}
