//! Resize debouncer - coalesces rapid viewport-width changes.
//!
//! Window resizing produces a width reading every frame. Instead of
//! re-laying-out the chart on each one:
//! 1. Each new reading re-arms a pending timer with the latest value
//! 2. After a quiet period with no new readings, the final value fires
//!
//! Polled from the update loop; dropping the owner drops any pending timer.

use std::time::{Duration, Instant};

/// Quiet period required before a resize is applied.
pub const RESIZE_DEBOUNCE_MS: u64 = 800;

/// Timer-based coalescer for viewport-width updates.
///
/// # Usage
/// ```ignore
/// // On every raw width reading:
/// debouncer.schedule(width);
///
/// // In update loop:
/// if let Some(width) = debouncer.tick() {
///     apply_resize(width);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period before the pending value fires
    delay: Duration,
    /// Pending update: (value, trigger_time)
    pending: Option<(i32, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl Debouncer {
    /// Create with custom delay
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            pending: None,
        }
    }

    /// Get current delay in milliseconds
    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }

    /// Schedule a value to fire after the quiet period.
    /// If one is already pending, resets the timer (debounce behavior).
    pub fn schedule(&mut self, value: i32) {
        let trigger_at = Instant::now() + self.delay;
        self.pending = Some((value, trigger_at));
        log::trace!(
            "Debouncer: scheduled value {} in {}ms",
            value,
            self.delay.as_millis()
        );
    }

    /// Cancel any pending update
    pub fn cancel(&mut self) {
        if self.pending.is_some() {
            log::trace!("Debouncer: cancelled pending update");
        }
        self.pending = None;
    }

    /// Check if the pending value should fire now.
    /// Returns Some(value) if the quiet period has elapsed, None otherwise.
    /// Clears the pending state when it fires.
    pub fn tick(&mut self) -> Option<i32> {
        let Some((value, trigger_at)) = self.pending else {
            return None;
        };

        if Instant::now() >= trigger_at {
            self.pending = None;
            log::trace!("Debouncer: firing value {}", value);
            Some(value)
        } else {
            None
        }
    }

    /// Check if there's a pending update
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Get the pending value (if any)
    pub fn pending_value(&self) -> Option<i32> {
        self.pending.map(|(value, _)| value)
    }

    /// Time left until the pending value is due. Zero when overdue,
    /// None when nothing is pending. Lets the shell schedule a wake-up
    /// instead of repainting every frame.
    pub fn time_until_due(&self) -> Option<Duration> {
        self.pending
            .map(|(_, trigger_at)| trigger_at.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_no_trigger() {
        let mut debouncer = Debouncer::new(100);

        debouncer.schedule(1280);
        assert!(debouncer.is_pending());

        // Should not fire immediately
        assert!(debouncer.tick().is_none());
    }

    #[test]
    fn test_trigger_after_delay() {
        let mut debouncer = Debouncer::new(10); // 10ms

        debouncer.schedule(1280);
        std::thread::sleep(Duration::from_millis(15));

        // Should fire after delay
        assert_eq!(debouncer.tick(), Some(1280));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_debounce_resets_timer() {
        let mut debouncer = Debouncer::new(50);

        debouncer.schedule(800);
        std::thread::sleep(Duration::from_millis(30));

        // Re-schedule with a new value - resets timer
        debouncer.schedule(1024);

        // Should not fire yet (timer reset)
        assert!(debouncer.tick().is_none());
        assert_eq!(debouncer.pending_value(), Some(1024));
    }

    #[test]
    fn test_burst_fires_once_with_final_value() {
        let mut debouncer = Debouncer::new(20);

        // Rapid-fire readings: only the last survives
        for width in [640, 800, 1024, 1280, 1440] {
            debouncer.schedule(width);
            assert!(debouncer.tick().is_none());
        }
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(debouncer.tick(), Some(1440));
        // Nothing left to fire
        assert_eq!(debouncer.tick(), None);
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = Debouncer::new(10);

        debouncer.schedule(1920);
        debouncer.cancel();
        std::thread::sleep(Duration::from_millis(15));

        assert!(debouncer.tick().is_none());
        assert!(debouncer.time_until_due().is_none());
    }
}
