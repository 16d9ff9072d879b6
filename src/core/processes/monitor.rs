use crate::core::errors::SimError;
use crate::core::event::Wake;
use crate::core::process::{Process, ProcessContext, Suspend};
use crate::core::types::{SimTime, MONITOR_INTERVAL};

/// Samples the pool wait-list on a fixed cadence, starting at time zero
pub struct QueueMonitor {
    interval: SimTime,
}

impl QueueMonitor {
    pub fn new() -> Self {
        Self {
            interval: MONITOR_INTERVAL,
        }
    }
}

impl Default for QueueMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Process for QueueMonitor {
    fn label(&self) -> String {
        "QueueMonitor".to_string()
    }

    fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_>) -> Result<Suspend, SimError> {
        if wake == Wake::Granted {
            return Err(SimError::ContractViolation(
                "queue monitor never requests a slot".to_string(),
            ));
        }

        let depth = ctx.queue_depth();
        let now = ctx.now();
        ctx.metrics.record_queue_sample(now, depth);
        Ok(Suspend::Timeout(self.interval))
    }
}
