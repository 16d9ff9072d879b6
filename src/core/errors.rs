/// Errors raised by the simulation engine
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Scenario or batch parameters outside their valid domain
    InvalidConfig(String),
    /// Internal consistency breach, e.g. releasing a slot that was never acquired
    ContractViolation(String),
    /// Attempt to schedule with a negative or non-finite delay
    InvalidDelay(f64),
    /// Runner operation invoked in the wrong lifecycle state
    InvalidState(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SimError::ContractViolation(msg) => write!(f, "Contract violation: {}", msg),
            SimError::InvalidDelay(delay) => write!(f, "Invalid delay: {}", delay),
            SimError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}
