// Tests for the clock and event queue
use crate::core::errors::SimError;
use crate::core::event::Wake;
use crate::core::event_scheduler::EventScheduler;
use crate::core::types::ProcessId;

fn pid(n: u64) -> ProcessId {
    ProcessId::new(n)
}

#[test]
fn test_pops_in_due_time_order() {
    let mut scheduler = EventScheduler::new();
    scheduler.schedule(pid(1), Wake::Timeout, 3.0).unwrap();
    scheduler.schedule(pid(2), Wake::Timeout, 1.0).unwrap();
    scheduler.schedule(pid(3), Wake::Timeout, 2.0).unwrap();

    let order: Vec<_> = std::iter::from_fn(|| scheduler.advance())
        .map(|event| event.target)
        .collect();
    assert_eq!(order, vec![pid(2), pid(3), pid(1)]);
    assert_eq!(scheduler.now(), 3.0);
}

#[test]
fn test_ties_break_by_insertion_order() {
    let mut scheduler = EventScheduler::new();
    for n in [5, 1, 4, 2, 3] {
        scheduler.schedule(pid(n), Wake::Start, 1.5).unwrap();
    }

    let mut sequences = Vec::new();
    let mut targets = Vec::new();
    while let Some(event) = scheduler.advance() {
        assert_eq!(event.due_time, 1.5);
        sequences.push(event.sequence);
        targets.push(event.target);
    }
    assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    assert_eq!(targets, vec![pid(5), pid(1), pid(4), pid(2), pid(3)]);
}

#[test]
fn test_delay_is_relative_to_current_time() {
    let mut scheduler = EventScheduler::new();
    scheduler.schedule(pid(1), Wake::Timeout, 2.0).unwrap();
    scheduler.advance().unwrap();

    let handle = scheduler.schedule(pid(1), Wake::Timeout, 0.5).unwrap();
    assert_eq!(handle.due_time, 2.5);
    assert_eq!(handle.sequence, 1);
}

#[test]
fn test_advance_on_empty_queue() {
    let mut scheduler = EventScheduler::new();
    assert!(scheduler.advance().is_none());
    assert_eq!(scheduler.now(), 0.0);
    assert!(!scheduler.has_events());
}

#[test]
fn test_rejects_negative_and_nan_delays() {
    let mut scheduler = EventScheduler::new();
    assert_eq!(
        scheduler.schedule(pid(1), Wake::Timeout, -0.1),
        Err(SimError::InvalidDelay(-0.1))
    );
    assert!(scheduler.schedule(pid(1), Wake::Timeout, f64::NAN).is_err());
    assert_eq!(scheduler.pending(), 0);

    // Zero is a legal delay
    assert!(scheduler.schedule(pid(1), Wake::Granted, 0.0).is_ok());
}

#[test]
fn test_advance_until_stops_at_horizon() {
    let mut scheduler = EventScheduler::new();
    scheduler.schedule(pid(1), Wake::Timeout, 1.0).unwrap();
    scheduler.schedule(pid(2), Wake::Timeout, 2.0).unwrap();
    scheduler.schedule(pid(3), Wake::Timeout, 2.5).unwrap();

    assert_eq!(scheduler.advance_until(2.0).map(|e| e.target), Some(pid(1)));
    // Due exactly at the stop time still fires
    assert_eq!(scheduler.advance_until(2.0).map(|e| e.target), Some(pid(2)));
    assert!(scheduler.advance_until(2.0).is_none());
    assert_eq!(scheduler.pending(), 1);

    scheduler.settle_at(2.2).unwrap();
    assert_eq!(scheduler.now(), 2.2);
    assert_eq!(scheduler.peek_next_time(), Some(2.5));
}

#[test]
fn test_settle_never_moves_backwards() {
    let mut scheduler = EventScheduler::new();
    scheduler.schedule(pid(1), Wake::Timeout, 4.0).unwrap();
    scheduler.advance().unwrap();
    assert!(matches!(
        scheduler.settle_at(3.0),
        Err(SimError::ContractViolation(_))
    ));
    assert_eq!(scheduler.now(), 4.0);

    assert!(scheduler.settle_at(f64::NAN).is_err());
    assert_eq!(scheduler.now(), 4.0);
}
