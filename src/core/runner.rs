use super::config::ScenarioConfig;
use super::errors::SimError;
use super::metrics::{Metrics, SummaryStatistics};
use super::processes::{ArrivalGenerator, QueueMonitor};
use super::simulation_engine::{SimulationEngine, SimulationObserver};
use log::{info, warn};
use rand::rngs::StdRng;
use serde::Serialize;

/// Lifecycle of a [`SimulationRunner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Configured,
    Running,
    Completed,
}

/// Everything one scenario produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub config: ScenarioConfig,
    pub summary: SummaryStatistics,
    pub metrics: Metrics,
}

/// Wires the processes of one scenario together and drives them to the horizon
pub struct SimulationRunner {
    name: String,
    config: ScenarioConfig,
    engine: SimulationEngine,
    state: RunnerState,
    summary: Option<SummaryStatistics>,
}

impl SimulationRunner {
    /// Validate `config` and prepare a fresh run. Fails before any time advances.
    pub fn new(name: &str, config: ScenarioConfig, rng: StdRng) -> Result<Self, SimError> {
        config.validate()?;
        let engine = SimulationEngine::new(config.capacity, rng)?;
        Ok(Self {
            name: name.to_string(),
            config,
            engine,
            state: RunnerState::Configured,
            summary: None,
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) -> Result<(), SimError> {
        if self.state != RunnerState::Configured {
            return Err(SimError::InvalidState(
                "observers must be added before the run starts".to_string(),
            ));
        }
        self.engine.add_observer(observer);
        Ok(())
    }

    /// Run the scenario to its horizon and derive the summary
    pub fn run(&mut self) -> Result<&SummaryStatistics, SimError> {
        if self.state != RunnerState::Configured {
            return Err(SimError::InvalidState(format!(
                "scenario '{}' already {:?}",
                self.name, self.state
            )));
        }

        info!(
            "[{}] starting: capacity={}, arrival_rate={}, avg_service_time={}, horizon={}",
            self.name,
            self.config.capacity,
            self.config.arrival_rate,
            self.config.avg_service_time,
            self.config.horizon
        );

        self.state = RunnerState::Running;
        self.engine.spawn(Box::new(ArrivalGenerator::new(&self.config)?))?;
        self.engine.spawn(Box::new(QueueMonitor::new()))?;
        self.engine.run_until(self.config.horizon)?;
        self.state = RunnerState::Completed;

        let metrics = self.engine.metrics();
        if metrics.tasks_completed == 0 {
            warn!("[{}] no task completed before the horizon", self.name);
        }
        let summary = metrics.summarize(self.config.capacity, self.config.horizon);
        info!(
            "[{}] completed {} tasks, avg wait {:.2}, utilization {:.1}%",
            self.name, summary.tasks_completed, summary.avg_wait, summary.utilization
        );

        Ok(self.summary.insert(summary))
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        self.engine.metrics()
    }

    /// Summary, available once the run has completed
    pub fn summary(&self) -> Option<&SummaryStatistics> {
        self.summary.as_ref()
    }

    /// Turn a completed run into its report and hand back the random generator
    pub fn finish(self) -> Result<(ScenarioReport, StdRng), SimError> {
        let summary = match (self.state, self.summary) {
            (RunnerState::Completed, Some(summary)) => summary,
            (state, _) => {
                return Err(SimError::InvalidState(format!(
                    "scenario '{}' cannot finish while {:?}",
                    self.name, state
                )))
            }
        };

        let (metrics, rng) = self.engine.into_parts();
        let report = ScenarioReport {
            name: self.name,
            config: self.config,
            summary,
            metrics,
        };
        Ok((report, rng))
    }
}

/// Convenience wrapper: run one scenario from start to report
pub fn run_scenario(
    name: &str,
    config: ScenarioConfig,
    rng: StdRng,
) -> Result<(ScenarioReport, StdRng), SimError> {
    let mut runner = SimulationRunner::new(name, config, rng)?;
    runner.run()?;
    runner.finish()
}
