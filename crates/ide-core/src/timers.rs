//! Host-driven timers.
//!
//! The engine never reads a clock. Pending events carry the time left until they fire and the
//! host advances them with [`TimerQueue::advance`], which makes every delayed behavior
//! deterministic under test.

use crate::clipboard::CopyTarget;
use crate::files::FileId;
use std::time::Duration;

/// Delayed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The simulated execution delay of a file's run elapsed.
    RunComplete(FileId),
    /// A copy acknowledgement should be cleared.
    ResetCopied(CopyTarget),
}

#[derive(Debug, Clone)]
struct PendingTimer {
    remaining: Duration,
    seq: u64,
    event: TimerEvent,
}

/// Pending timers ordered by deadline (ties fire in scheduling order).
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<PendingTimer>,
    next_seq: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` after `delay`.
    pub fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingTimer {
            remaining: delay,
            seq,
            event,
        });
    }

    /// Schedule `event` after `delay`, dropping any pending copy of the same event first.
    pub fn reschedule(&mut self, delay: Duration, event: TimerEvent) {
        self.cancel(event);
        self.schedule(delay, event);
    }

    /// Drop every pending timer for `event`.
    pub fn cancel(&mut self, event: TimerEvent) {
        self.pending.retain(|timer| timer.event != event);
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time until the next event fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.remaining).min()
    }

    /// Advance time by `elapsed` and return the events that became due, in firing order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerEvent> {
        let mut due = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for mut timer in self.pending.drain(..) {
            if timer.remaining <= elapsed {
                due.push(timer);
            } else {
                timer.remaining -= elapsed;
                still_pending.push(timer);
            }
        }
        self.pending = still_pending;

        due.sort_by_key(|timer| (timer.remaining, timer.seq));
        due.into_iter().map(|timer| timer.event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_fire_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(Duration::from_millis(300), TimerEvent::RunComplete(FileId::new(2)));
        queue.schedule(Duration::from_millis(100), TimerEvent::RunComplete(FileId::new(1)));

        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(100)));
        assert!(queue.advance(Duration::from_millis(50)).is_empty());
        assert_eq!(
            queue.advance(Duration::from_millis(500)),
            vec![
                TimerEvent::RunComplete(FileId::new(1)),
                TimerEvent::RunComplete(FileId::new(2)),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reschedule_replaces_pending_event() {
        let mut queue = TimerQueue::new();
        let event = TimerEvent::ResetCopied(CopyTarget::Code(FileId::new(1)));
        queue.schedule(Duration::from_millis(100), event);
        queue.reschedule(Duration::from_millis(200), event);
        assert_eq!(queue.len(), 1);

        assert!(queue.advance(Duration::from_millis(150)).is_empty());
        assert_eq!(queue.advance(Duration::from_millis(50)), vec![event]);
    }
}
