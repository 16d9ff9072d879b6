use super::errors::SimError;
use super::event::{Event, EventHandle, Wake};
use super::types::{ProcessId, SimTime};
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct ScheduledEvent {
    event: Event,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .event
            .due_time
            .total_cmp(&self.event.due_time)
            .then_with(|| other.event.sequence.cmp(&self.event.sequence))
    }
}

/// Simulated clock plus the time-ordered set of pending wake-ups.
///
/// Events due at the same instant pop in insertion order, so a run is fully
/// reproducible for a fixed seed.
pub struct EventScheduler {
    event_queue: BinaryHeap<ScheduledEvent>,
    sequence_counter: u64,
    now: SimTime,
}

impl EventScheduler {
    /// Create a scheduler with the clock at time zero
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
            now: 0.0,
        }
    }

    /// Current simulated time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule a wake-up for `target` after `delay` time units
    pub fn schedule(
        &mut self,
        target: ProcessId,
        wake: Wake,
        delay: SimTime,
    ) -> Result<EventHandle, SimError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(SimError::InvalidDelay(delay));
        }

        let handle = EventHandle {
            sequence: self.sequence_counter,
            due_time: self.now + delay,
        };
        trace!(
            "schedule #{} {:?} for {} at t={:.4}",
            handle.sequence,
            wake,
            target,
            handle.due_time
        );

        self.event_queue.push(ScheduledEvent {
            event: Event {
                due_time: handle.due_time,
                sequence: handle.sequence,
                target,
                wake,
            },
        });
        self.sequence_counter += 1;

        Ok(handle)
    }

    /// Pop the earliest pending event and move the clock to its due time
    pub fn advance(&mut self) -> Option<Event> {
        let scheduled = self.event_queue.pop()?;
        self.now = scheduled.event.due_time;
        Some(scheduled.event)
    }

    /// Like [`advance`](Self::advance), but only if the next event is due at or before `stop_time`
    pub fn advance_until(&mut self, stop_time: SimTime) -> Option<Event> {
        match self.peek_next_time() {
            Some(due) if due <= stop_time => self.advance(),
            _ => None,
        }
    }

    /// Leave the clock at exactly `stop_time`. Events due later stay pending and never fire.
    pub fn settle_at(&mut self, stop_time: SimTime) -> Result<(), SimError> {
        if !stop_time.is_finite() || stop_time < self.now {
            return Err(SimError::ContractViolation(format!(
                "cannot move clock back from {} to {}",
                self.now, stop_time
            )));
        }
        self.now = stop_time;
        Ok(())
    }

    /// Due time of the next pending event without removing it
    pub fn peek_next_time(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|scheduled| scheduled.event.due_time)
    }

    /// Number of pending events
    pub fn pending(&self) -> usize {
        self.event_queue.len()
    }

    /// Check if there are any events remaining in the queue
    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}
