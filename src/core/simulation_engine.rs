use super::errors::SimError;
use super::event::{Event, Wake};
use super::event_scheduler::EventScheduler;
use super::metrics::Metrics;
use super::process::{Process, ProcessContext, Suspend};
use super::resource_pool::{Admission, PoolSnapshot, ResourcePool};
use super::types::{ProcessId, SimTime};
use log::{debug, trace};
use rand::rngs::StdRng;
use std::collections::HashMap;

/// Observer trait for simulation events
pub trait SimulationObserver {
    /// Called when the simulated clock moves forward
    fn on_time_advance(&mut self, _old_time: SimTime, _new_time: SimTime) {}

    /// Called after each event has been dispatched
    fn on_step_complete(&mut self, time: SimTime, event: &Event, pool: PoolSnapshot);
}

/// Single-threaded dispatch loop multiplexing processes onto one control flow.
///
/// Owns the clock, the resource pool, the metrics and the random generator of
/// one run. Nothing is shared between engines.
pub struct SimulationEngine {
    scheduler: EventScheduler,
    pool: ResourcePool,
    metrics: Metrics,
    rng: StdRng,
    processes: HashMap<ProcessId, Box<dyn Process>>,
    next_pid: u64,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl SimulationEngine {
    pub fn new(capacity: usize, rng: StdRng) -> Result<Self, SimError> {
        Ok(Self {
            scheduler: EventScheduler::new(),
            pool: ResourcePool::new(capacity)?,
            metrics: Metrics::new(),
            rng,
            processes: HashMap::new(),
            next_pid: 0,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    fn notify_time_advance(&mut self, old_time: SimTime, new_time: SimTime) {
        for observer in &mut self.observers {
            observer.on_time_advance(old_time, new_time);
        }
    }

    fn notify_step_complete(&mut self, event: &Event) {
        let snapshot = self.pool.snapshot();
        let now = self.scheduler.now();
        for observer in &mut self.observers {
            observer.on_step_complete(now, event, snapshot);
        }
    }

    /// Register a process and start it at the current instant
    pub fn spawn(&mut self, process: Box<dyn Process>) -> Result<ProcessId, SimError> {
        let pid = ProcessId::new(self.next_pid);
        self.next_pid += 1;
        trace!("spawn {} as {}", process.label(), pid);

        self.processes.insert(pid, process);
        self.scheduler.schedule(pid, Wake::Start, 0.0)?;
        Ok(pid)
    }

    /// Dispatch the next pending event regardless of any horizon.
    /// Returns false when nothing was left to dispatch.
    pub fn step(&mut self) -> Result<bool, SimError> {
        let old_time = self.scheduler.now();
        match self.scheduler.advance() {
            Some(event) => {
                self.handle(old_time, event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Dispatch every event due at or before `stop_time`, then leave the clock
    /// at exactly `stop_time`. Later events remain pending and never fire.
    pub fn run_until(&mut self, stop_time: SimTime) -> Result<(), SimError> {
        if !stop_time.is_finite() {
            return Err(SimError::InvalidState(format!(
                "stop time must be finite, got {}",
                stop_time
            )));
        }
        if stop_time < self.scheduler.now() {
            return Err(SimError::InvalidState(format!(
                "stop time {} is before current time {}",
                stop_time,
                self.scheduler.now()
            )));
        }

        loop {
            let old_time = self.scheduler.now();
            match self.scheduler.advance_until(stop_time) {
                Some(event) => self.handle(old_time, event)?,
                None => break,
            }
        }

        let old_time = self.scheduler.now();
        self.scheduler.settle_at(stop_time)?;
        if old_time != stop_time {
            self.notify_time_advance(old_time, stop_time);
        }
        Ok(())
    }

    fn handle(&mut self, old_time: SimTime, event: Event) -> Result<(), SimError> {
        if old_time != event.due_time {
            self.notify_time_advance(old_time, event.due_time);
        }
        self.dispatch(&event)?;
        self.notify_step_complete(&event);
        Ok(())
    }

    /// Resume the target process and act on its suspension request
    fn dispatch(&mut self, event: &Event) -> Result<(), SimError> {
        let pid = event.target;
        let mut process = self.processes.remove(&pid).ok_or_else(|| {
            SimError::ContractViolation(format!("event #{} targets unknown {}", event.sequence, pid))
        })?;
        debug!(
            "t={:.4} #{} {:?} -> {}",
            event.due_time,
            event.sequence,
            event.wake,
            process.label()
        );

        let mut ctx = ProcessContext::new(
            pid,
            self.scheduler.now(),
            &mut self.rng,
            &mut self.metrics,
            &mut self.pool,
        );
        let suspend = process.resume(event.wake, &mut ctx)?;
        let (spawned, handed_off) = ctx.into_effects();

        // The freed slot already belongs to the next waiter; it resumes at this instant
        if let Some(next) = handed_off {
            self.scheduler.schedule(next, Wake::Granted, 0.0)?;
        }
        for child in spawned {
            self.spawn(child)?;
        }

        match suspend {
            Suspend::Timeout(delay) => {
                self.scheduler.schedule(pid, Wake::Timeout, delay)?;
                self.processes.insert(pid, process);
            }
            Suspend::Acquire => {
                if self.pool.acquire(pid)? == Admission::Granted {
                    self.scheduler.schedule(pid, Wake::Granted, 0.0)?;
                }
                self.processes.insert(pid, process);
            }
            Suspend::Done => {
                trace!("{} finished", process.label());
            }
        }
        Ok(())
    }

    /// Get current simulation time
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Number of live (not yet finished) processes
    pub fn live_processes(&self) -> usize {
        self.processes.len()
    }

    /// Check if there are pending events in the scheduler
    pub fn has_pending_events(&self) -> bool {
        self.scheduler.has_events()
    }

    /// Consume the engine, keeping the recorded metrics and the generator
    pub fn into_parts(self) -> (Metrics, StdRng) {
        (self.metrics, self.rng)
    }
}
