use corner_pilot_core::parameters::ParameterError;
use corner_pilot_core::ActuatorError;

/// Errors that can occur while running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Actuator fault: {0}")]
    Actuator(#[from] ActuatorError),

    #[error("Invalid parameters: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Logger already installed: {0}")]
    Logger(String),

    #[error("Simulation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Scenario parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
