pub mod batch;
pub mod config;
pub mod errors;
pub mod event;
pub mod event_scheduler;
pub mod metrics;
pub mod process;
pub mod processes;
pub mod resource_pool;
pub mod runner;
pub mod simulation_engine;
pub mod types;

#[cfg(test)]
mod tests;
