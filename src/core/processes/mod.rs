pub mod arrival;
pub mod monitor;
pub mod task;

pub use arrival::ArrivalGenerator;
pub use monitor::QueueMonitor;
pub use task::TaskProcess;
