use super::errors::SimError;
use super::types::ProcessId;
use log::debug;
use std::collections::{HashSet, VecDeque};

/// Point-in-time view of a pool, handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub capacity: usize,
    pub in_use: usize,
    pub queue_depth: usize,
}

/// Outcome of an acquisition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A slot was free and nobody was ahead in line
    Granted,
    /// The requester joined the wait-list at the given position (0 = head)
    Queued(usize),
}

/// Capacity-bounded pool of execution slots with strict FIFO admission.
///
/// The pool only does bookkeeping. Resuming a granted requester is the
/// engine's job.
pub struct ResourcePool {
    capacity: usize,
    holders: HashSet<ProcessId>,
    waiting: VecDeque<ProcessId>,
}

impl ResourcePool {
    pub fn new(capacity: usize) -> Result<Self, SimError> {
        if capacity == 0 {
            return Err(SimError::InvalidConfig(
                "pool capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            holders: HashSet::with_capacity(capacity),
            waiting: VecDeque::new(),
        })
    }

    /// Request a slot for `requester`
    pub fn acquire(&mut self, requester: ProcessId) -> Result<Admission, SimError> {
        // A waiting requester is suspended and cannot ask twice
        if self.holders.contains(&requester) {
            return Err(SimError::ContractViolation(format!(
                "{} already holds a slot",
                requester
            )));
        }

        // A free slot is only taken directly when nobody is ahead in line
        if self.holders.len() < self.capacity && self.waiting.is_empty() {
            self.holders.insert(requester);
            debug!("pool: {} granted ({}/{})", requester, self.in_use(), self.capacity);
            return Ok(Admission::Granted);
        }

        self.waiting.push_back(requester);
        debug!("pool: {} queued at depth {}", requester, self.waiting.len());
        Ok(Admission::Queued(self.waiting.len() - 1))
    }

    /// Return the slot held by `holder`. If someone is waiting, the slot passes
    /// straight to the head of the line and that requester is returned.
    pub fn release(&mut self, holder: ProcessId) -> Result<Option<ProcessId>, SimError> {
        if !self.holders.remove(&holder) {
            return Err(SimError::ContractViolation(format!(
                "{} released a slot it never acquired",
                holder
            )));
        }

        let next = self.waiting.pop_front();
        if let Some(next) = next {
            self.holders.insert(next);
            debug!("pool: slot handed from {} to {}", holder, next);
        }
        Ok(next)
    }

    /// Number of requesters still waiting for a slot
    pub fn queue_depth(&self) -> usize {
        self.waiting.len()
    }

    pub fn in_use(&self) -> usize {
        self.holders.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            capacity: self.capacity,
            in_use: self.in_use(),
            queue_depth: self.queue_depth(),
        }
    }
}
