/// Logical simulated time. Non-negative and unrelated to wall-clock time.
pub type SimTime = f64;

/// Identifier of a process registered with the simulation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub(crate) u64);

impl ProcessId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Sequential task number assigned by the arrival generator, starting at 1
pub type TaskId = u64;

/// Sampling cadence of the queue monitor
pub const MONITOR_INTERVAL: SimTime = 1.0;

/// Service standard deviation as a fraction of the mean service time
pub const SERVICE_STD_DEV_RATIO: f64 = 0.1;

/// Lower bound applied to every drawn service duration
pub const MIN_SERVICE_TIME: SimTime = 0.1;
