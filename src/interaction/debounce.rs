use std::time::{Duration, Instant};

use tracing::trace;

/// Single-slot debounce.
///
/// Scheduling replaces any pending action (last write wins, no queueing);
/// the action becomes due once `delay` has elapsed since it was scheduled.
/// The host drives time by calling [`EventTrigger::take_due`] from its event
/// loop, so nothing here blocks or spawns.
#[derive(Debug, Clone)]
pub struct EventTrigger<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> EventTrigger<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedules `action`, discarding whatever was pending.
    ///
    /// Returns `true` when a pending action was superseded.
    pub fn schedule(&mut self, now: Instant, action: T) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some((now + self.delay, action));
        trace!(superseded, delay_ms = self.delay.as_millis() as u64, "event trigger scheduled");
        superseded
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending action fires.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Takes the pending action if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, action)| action),
            _ => None,
        }
    }

    /// Takes the pending action regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, action)| action)
    }

    /// Drops the pending action without firing it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_schedule_replaces_pending_action() {
        let start = Instant::now();
        let mut trigger = EventTrigger::new(Duration::from_millis(40));

        assert!(!trigger.schedule(start, 1));
        assert!(trigger.schedule(start + Duration::from_millis(10), 2));

        assert_eq!(trigger.take_due(start + Duration::from_millis(45)), None);
        assert_eq!(trigger.take_due(start + Duration::from_millis(50)), Some(2));
        assert!(!trigger.is_pending());
    }

    #[test]
    fn flush_fires_immediately_and_only_once() {
        let mut trigger = EventTrigger::new(Duration::from_secs(5));
        trigger.schedule(Instant::now(), "redraw");
        assert_eq!(trigger.flush(), Some("redraw"));
        assert_eq!(trigger.flush(), None);
    }

    #[test]
    fn zero_delay_is_due_at_schedule_time() {
        let now = Instant::now();
        let mut trigger = EventTrigger::new(Duration::ZERO);
        trigger.schedule(now, ());
        assert_eq!(trigger.deadline(), Some(now));
        assert_eq!(trigger.take_due(now), Some(()));
    }
}
