use super::types::{ProcessId, SimTime};

/// Reason a suspended process is being resumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// First activation of a freshly spawned process
    Start,
    /// A requested timeout has elapsed
    Timeout,
    /// The resource pool granted the requested slot
    Granted,
}

/// A scheduled wake-up: which process to resume, why, and when
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub due_time: SimTime,
    pub sequence: u64,
    pub target: ProcessId,
    pub wake: Wake,
}

/// Handle returned when an event is scheduled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventHandle {
    pub sequence: u64,
    pub due_time: SimTime,
}
