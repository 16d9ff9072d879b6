pub mod core;

// Re-export commonly used types
pub use crate::core::batch::run_batch;
pub use crate::core::config::{BatchConfig, ConcurrencyMode, NamedScenario, ScenarioConfig, SeedPolicy};
pub use crate::core::errors::SimError;
pub use crate::core::metrics::{Metrics, QueueSample, SummaryStatistics, TaskRecord};
pub use crate::core::runner::{run_scenario, RunnerState, ScenarioReport, SimulationRunner};
pub use crate::core::types::SimTime;
