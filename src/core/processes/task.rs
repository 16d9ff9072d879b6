use crate::core::errors::SimError;
use crate::core::event::Wake;
use crate::core::metrics::TaskRecord;
use crate::core::process::{Process, ProcessContext, Suspend};
use crate::core::types::{SimTime, TaskId, MIN_SERVICE_TIME};
use log::debug;
use rand_distr::{Distribution, Normal};

#[derive(Debug, Clone, Copy, PartialEq)]
enum TaskPhase {
    Created,
    AwaitingSlot {
        arrival_time: SimTime,
    },
    InService {
        arrival_time: SimTime,
        service_start_time: SimTime,
        service_duration: SimTime,
    },
    Finished,
}

/// A single task: arrive, wait for a slot, get served, leave.
pub struct TaskProcess {
    task_id: TaskId,
    service_time: Normal<f64>,
    phase: TaskPhase,
}

impl TaskProcess {
    pub fn new(task_id: TaskId, service_time: Normal<f64>) -> Self {
        Self {
            task_id,
            service_time,
            phase: TaskPhase::Created,
        }
    }
}

impl Process for TaskProcess {
    fn label(&self) -> String {
        format!("Task-{}", self.task_id)
    }

    fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_>) -> Result<Suspend, SimError> {
        match (self.phase, wake) {
            (TaskPhase::Created, Wake::Start) => {
                self.phase = TaskPhase::AwaitingSlot {
                    arrival_time: ctx.now(),
                };
                Ok(Suspend::Acquire)
            }
            (TaskPhase::AwaitingSlot { arrival_time }, Wake::Granted) => {
                ctx.metrics.record_admission();

                // Drawn at admission, not at arrival
                let drawn = self.service_time.sample(&mut *ctx.rng);
                let service_duration = drawn.max(MIN_SERVICE_TIME);

                self.phase = TaskPhase::InService {
                    arrival_time,
                    service_start_time: ctx.now(),
                    service_duration,
                };
                Ok(Suspend::Timeout(service_duration))
            }
            (
                TaskPhase::InService {
                    arrival_time,
                    service_start_time,
                    service_duration,
                },
                Wake::Timeout,
            ) => {
                let record = TaskRecord {
                    task_id: self.task_id,
                    arrival_time,
                    service_start_time,
                    service_duration,
                    completion_time: ctx.now(),
                };
                debug!(
                    "Task-{} done: waited {:.3}, turnaround {:.3}",
                    self.task_id,
                    record.wait_time(),
                    record.turnaround_time()
                );

                // Bookkeeping first: the release may resume a waiter at this same instant
                ctx.metrics.record_completion(record);
                ctx.release()?;

                self.phase = TaskPhase::Finished;
                Ok(Suspend::Done)
            }
            (phase, wake) => Err(SimError::ContractViolation(format!(
                "Task-{} woke with {:?} while in {:?}",
                self.task_id, wake, phase
            ))),
        }
    }
}
