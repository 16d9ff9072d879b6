use super::errors::SimError;
use super::event::Wake;
use super::metrics::Metrics;
use super::resource_pool::ResourcePool;
use super::types::{ProcessId, SimTime};
use rand::rngs::StdRng;

/// What a process waits for after yielding control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Suspend {
    /// Resume with [`Wake::Timeout`] after the given delay
    Timeout(SimTime),
    /// Resume with [`Wake::Granted`] once the pool hands over a slot
    Acquire,
    /// The process has finished and can be dropped
    Done,
}

/// A cooperative unit of logical execution.
///
/// Each process is a small state machine: the engine resumes it with the
/// reason it woke up, the process does its work for that instant and
/// returns its next suspension request.
pub trait Process {
    /// Short label used in log output
    fn label(&self) -> String;

    fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_>) -> Result<Suspend, SimError>;
}

/// Everything a process may touch while it runs at the current instant
pub struct ProcessContext<'a> {
    pid: ProcessId,
    now: SimTime,
    pub rng: &'a mut StdRng,
    pub metrics: &'a mut Metrics,
    pool: &'a mut ResourcePool,
    spawned: Vec<Box<dyn Process>>,
    handed_off: Option<ProcessId>,
}

impl<'a> ProcessContext<'a> {
    pub(crate) fn new(
        pid: ProcessId,
        now: SimTime,
        rng: &'a mut StdRng,
        metrics: &'a mut Metrics,
        pool: &'a mut ResourcePool,
    ) -> Self {
        Self {
            pid,
            now,
            rng,
            metrics,
            pool,
            spawned: Vec::new(),
            handed_off: None,
        }
    }

    /// Identifier of the running process
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Start another process at the current instant without waiting for it
    pub fn spawn(&mut self, process: Box<dyn Process>) {
        self.spawned.push(process);
    }

    /// Return the slot held by the running process
    pub fn release(&mut self) -> Result<(), SimError> {
        if let Some(next) = self.pool.release(self.pid)? {
            // At most one slot per process, so at most one hand-off per release
            self.handed_off = Some(next);
        }
        Ok(())
    }

    pub fn queue_depth(&self) -> usize {
        self.pool.queue_depth()
    }

    pub(crate) fn into_effects(self) -> (Vec<Box<dyn Process>>, Option<ProcessId>) {
        (self.spawned, self.handed_off)
    }
}
