use super::config::{BatchConfig, ConcurrencyMode, SeedPolicy};
use super::errors::SimError;
use super::runner::{run_scenario, ScenarioReport};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Run every scenario of `batch` and return the reports in scenario order.
///
/// The whole batch is validated before the first scenario starts.
pub fn run_batch(batch: &BatchConfig) -> Result<Vec<ScenarioReport>, SimError> {
    batch.validate()?;
    info!(
        "running {} scenarios (seed {}, {:?}, {:?})",
        batch.scenarios.len(),
        batch.random_seed,
        batch.seed_policy,
        batch.concurrency_mode
    );

    match (batch.seed_policy, batch.concurrency_mode) {
        (SeedPolicy::Shared, _) => run_shared(batch),
        (SeedPolicy::PerScenario, ConcurrencyMode::Sequential) => run_independent(batch),
        (SeedPolicy::PerScenario, ConcurrencyMode::Rayon) => run_parallel(batch),
    }
}

/// Seed for the scenario called `name` under [`SeedPolicy::PerScenario`].
///
/// Depends only on the base seed and the name (FNV-1a), never on the
/// scenario's position in the batch.
pub fn scenario_seed(base: u64, name: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = name.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    base ^ hash
}

fn run_shared(batch: &BatchConfig) -> Result<Vec<ScenarioReport>, SimError> {
    let mut rng = StdRng::seed_from_u64(batch.random_seed);
    let mut reports = Vec::with_capacity(batch.scenarios.len());

    for (name, config) in batch.scenario_configs() {
        let (report, returned) = run_scenario(&name, config, rng)?;
        rng = returned;
        reports.push(report);
    }
    Ok(reports)
}

fn run_independent(batch: &BatchConfig) -> Result<Vec<ScenarioReport>, SimError> {
    batch
        .scenario_configs()
        .into_iter()
        .map(|(name, config)| {
            let rng = StdRng::seed_from_u64(scenario_seed(batch.random_seed, &name));
            run_scenario(&name, config, rng).map(|(report, _)| report)
        })
        .collect()
}

fn run_parallel(batch: &BatchConfig) -> Result<Vec<ScenarioReport>, SimError> {
    let scenarios = batch.scenario_configs();
    let job = || {
        scenarios
            .par_iter()
            .map(|(name, config)| {
                let rng = StdRng::seed_from_u64(scenario_seed(batch.random_seed, name));
                run_scenario(name, *config, rng).map(|(report, _)| report)
            })
            .collect::<Result<Vec<_>, SimError>>()
    };

    match batch.thread_pool_size {
        Some(size) => rayon::ThreadPoolBuilder::new()
            .num_threads(size)
            .build()
            .map_err(|e| SimError::InvalidConfig(format!("cannot build thread pool: {}", e)))?
            .install(job),
        None => job(),
    }
}
