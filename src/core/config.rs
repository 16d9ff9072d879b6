//! Configuration for queueing-network scenarios
//!
//! A [`ScenarioConfig`] fixes the parameters of a single run. A [`BatchConfig`]
//! groups named scenarios with the shared horizon, seed and execution settings.

use super::errors::SimError;
use super::types::SimTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of one simulation run. Immutable once the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Number of concurrent execution slots
    pub capacity: usize,
    /// Mean arrivals per unit time
    pub arrival_rate: f64,
    /// Mean service duration
    pub avg_service_time: f64,
    /// Simulated stop time
    pub horizon: SimTime,
}

impl ScenarioConfig {
    pub fn new(capacity: usize, arrival_rate: f64, avg_service_time: f64, horizon: SimTime) -> Self {
        Self {
            capacity,
            arrival_rate,
            avg_service_time,
            horizon,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_arrival_rate(mut self, rate: f64) -> Self {
        self.arrival_rate = rate;
        self
    }

    pub fn with_avg_service_time(mut self, avg: f64) -> Self {
        self.avg_service_time = avg;
        self
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.horizon = horizon;
        self
    }

    /// Reject any non-positive or non-finite parameter
    pub fn validate(&self) -> Result<(), SimError> {
        if self.capacity == 0 {
            return Err(SimError::InvalidConfig(
                "capacity must be a positive integer".to_string(),
            ));
        }
        check_positive("arrival_rate", self.arrival_rate)?;
        check_positive("avg_service_time", self.avg_service_time)?;
        check_positive("horizon", self.horizon)?;
        Ok(())
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!(
            "{} must be positive and finite, got {}",
            field, value
        )))
    }
}

/// A scenario as written in a batch file; the horizon comes from the batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub capacity: usize,
    pub arrival_rate: f64,
    pub avg_service_time: f64,
}

impl NamedScenario {
    pub fn new(name: &str, capacity: usize, arrival_rate: f64, avg_service_time: f64) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            arrival_rate,
            avg_service_time,
        }
    }
}

/// How random generators are seeded across a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Seed once and carry the generator from scenario to scenario in order
    #[default]
    Shared,
    /// Seed each scenario from `random_seed` and its name, independent of batch order
    PerScenario,
}

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Scenarios run one after another on the calling thread
    #[default]
    Sequential,
    /// Scenarios run concurrently on a Rayon pool; each run stays single-threaded
    Rayon,
}

/// A batch of named scenarios sharing one horizon and seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub horizon: SimTime,
    pub random_seed: u64,
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    #[serde(default)]
    pub concurrency_mode: ConcurrencyMode,
    /// Only relevant when concurrency_mode is Rayon
    #[serde(default)]
    pub thread_pool_size: Option<usize>,
    pub scenarios: Vec<NamedScenario>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            horizon: 100.0,
            random_seed: 42,
            seed_policy: SeedPolicy::default(),
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
            scenarios: vec![
                NamedScenario::new("Light Load", 4, 1.0, 2.0),
                NamedScenario::new("Heavy Load", 4, 3.0, 2.0),
                NamedScenario::new("Scaled Pool", 8, 3.0, 2.0),
            ],
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a batch from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SimError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SimError> {
        serde_json::from_str(text)
            .map_err(|e| SimError::InvalidConfig(format!("malformed batch config: {}", e)))
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    pub fn with_scenarios(mut self, scenarios: Vec<NamedScenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Scenario configs in execution order, with the batch horizon applied
    pub fn scenario_configs(&self) -> Vec<(String, ScenarioConfig)> {
        self.scenarios
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    ScenarioConfig::new(s.capacity, s.arrival_rate, s.avg_service_time, self.horizon),
                )
            })
            .collect()
    }

    /// Validate every scenario plus the batch-level settings
    pub fn validate(&self) -> Result<(), SimError> {
        if self.concurrency_mode == ConcurrencyMode::Rayon && self.seed_policy == SeedPolicy::Shared {
            return Err(SimError::InvalidConfig(
                "rayon execution needs per-scenario seeding; a shared generator is inherently sequential"
                    .to_string(),
            ));
        }
        if self.thread_pool_size == Some(0) {
            return Err(SimError::InvalidConfig(
                "thread_pool_size must be positive".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for (name, scenario) in self.scenario_configs() {
            if !seen.insert(name.clone()) {
                return Err(SimError::InvalidConfig(format!(
                    "duplicate scenario name '{}'",
                    name
                )));
            }
            scenario
                .validate()
                .map_err(|e| SimError::InvalidConfig(format!("scenario '{}': {}", name, e)))?;
        }
        Ok(())
    }
}
