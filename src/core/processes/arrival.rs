use super::task::TaskProcess;
use crate::core::config::ScenarioConfig;
use crate::core::errors::SimError;
use crate::core::event::Wake;
use crate::core::process::{Process, ProcessContext, Suspend};
use crate::core::types::{TaskId, SERVICE_STD_DEV_RATIO};
use log::debug;
use rand_distr::{Distribution, Exp, Normal};

/// Poisson arrival stream: exponential gaps, one fire-and-forget task per arrival
pub struct ArrivalGenerator {
    inter_arrival: Exp<f64>,
    service_time: Normal<f64>,
    last_task_id: TaskId,
}

impl ArrivalGenerator {
    pub fn new(config: &ScenarioConfig) -> Result<Self, SimError> {
        let inter_arrival = Exp::new(config.arrival_rate).map_err(|e| {
            SimError::InvalidConfig(format!("arrival rate {}: {}", config.arrival_rate, e))
        })?;
        let service_time = Normal::new(
            config.avg_service_time,
            config.avg_service_time * SERVICE_STD_DEV_RATIO,
        )
        .map_err(|e| {
            SimError::InvalidConfig(format!(
                "average service time {}: {}",
                config.avg_service_time, e
            ))
        })?;

        Ok(Self {
            inter_arrival,
            service_time,
            last_task_id: 0,
        })
    }

    /// Number of tasks spawned so far
    pub fn tasks_spawned(&self) -> TaskId {
        self.last_task_id
    }
}

impl Process for ArrivalGenerator {
    fn label(&self) -> String {
        "ArrivalGenerator".to_string()
    }

    fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_>) -> Result<Suspend, SimError> {
        match wake {
            Wake::Start => {}
            Wake::Timeout => {
                self.last_task_id += 1;
                debug!("Task-{} arrives at t={:.4}", self.last_task_id, ctx.now());
                ctx.spawn(Box::new(TaskProcess::new(
                    self.last_task_id,
                    self.service_time,
                )));
            }
            Wake::Granted => {
                return Err(SimError::ContractViolation(
                    "arrival generator never requests a slot".to_string(),
                ))
            }
        }

        let gap = self.inter_arrival.sample(&mut *ctx.rng);
        Ok(Suspend::Timeout(gap))
    }
}
