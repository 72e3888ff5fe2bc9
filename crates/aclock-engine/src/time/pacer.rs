use std::time::{Duration, Instant};

/// Monotonic frame scheduler.
///
/// Deadlines advance by whole intervals from the previous deadline, so frame
/// spacing does not drift with render time. A frame presented after its
/// successor's deadline has already passed schedules the next one a full
/// interval from now instead of bursting to catch up.
///
/// An unpaced scheduler (`interval = None`) treats every wakeup as due.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval: interval.filter(|d| !d.is_zero()),
            next: None,
        }
    }

    /// Builds a pacer targeting `fps` frames per second.
    ///
    /// Non-positive or non-finite rates disable pacing.
    pub fn from_fps(fps: f32) -> Self {
        Self::new(Self::interval_for_fps(fps))
    }

    /// Frame interval for a target rate, `None` when the rate is unusable or
    /// its interval does not fit a `Duration`.
    pub fn interval_for_fps(fps: f32) -> Option<Duration> {
        if !(fps.is_finite() && fps > 0.0) {
            return None;
        }
        Duration::try_from_secs_f64(1.0 / fps as f64).ok()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Instant at which the next frame is due; `None` means "now".
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_none_or(|deadline| now >= deadline)
    }

    /// Records a presented frame and schedules the next deadline.
    pub fn mark_presented(&mut self, now: Instant) {
        let Some(interval) = self.interval else {
            self.next = None;
            return;
        };

        let mut next = self.next.map_or(now + interval, |d| d + interval);
        if next <= now {
            next = now + interval;
        }
        self.next = Some(next);
    }

    /// Forgets the pending deadline so the next wakeup renders immediately.
    pub fn reset(&mut self) {
        self.next = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fresh_pacer_is_due_immediately() {
        let pacer = FramePacer::new(Some(16 * MS));
        assert!(pacer.is_due(Instant::now()));
        assert_eq!(pacer.next_deadline(), None);
    }

    #[test]
    fn deadlines_advance_by_whole_intervals() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(Some(10 * MS));

        pacer.mark_presented(t0);
        assert_eq!(pacer.next_deadline(), Some(t0 + 10 * MS));
        assert!(!pacer.is_due(t0 + 9 * MS));
        assert!(pacer.is_due(t0 + 10 * MS));

        // Rendering took a little longer; the schedule does not drift.
        pacer.mark_presented(t0 + 12 * MS);
        assert_eq!(pacer.next_deadline(), Some(t0 + 20 * MS));
    }

    #[test]
    fn stall_does_not_cause_a_burst() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(Some(10 * MS));
        pacer.mark_presented(t0);

        let late = t0 + 95 * MS;
        pacer.mark_presented(late);
        assert_eq!(pacer.next_deadline(), Some(late + 10 * MS));
        assert!(!pacer.is_due(late + MS));
    }

    #[test]
    fn deadlines_are_monotonic() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(Some(7 * MS));
        let mut prev = None;
        for step in [0u32, 3, 7, 15, 16, 40, 41, 100] {
            pacer.mark_presented(t0 + step * MS);
            let next = pacer.next_deadline();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn unpaced_is_always_due() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(None);
        pacer.mark_presented(t0);
        assert!(pacer.is_due(t0));
        assert_eq!(pacer.next_deadline(), None);
    }

    #[test]
    fn fps_conversion() {
        assert_eq!(FramePacer::interval_for_fps(0.0), None);
        assert_eq!(FramePacer::interval_for_fps(-5.0), None);
        assert_eq!(FramePacer::interval_for_fps(f32::INFINITY), None);
        assert_eq!(FramePacer::interval_for_fps(1e-20), None);
        assert_eq!(FramePacer::interval_for_fps(f32::MIN_POSITIVE), None);
        assert_eq!(FramePacer::from_fps(50.0).interval(), Some(20 * MS));
    }

    #[test]
    fn zero_interval_disables_pacing() {
        assert_eq!(FramePacer::new(Some(Duration::ZERO)).interval(), None);
    }
}
