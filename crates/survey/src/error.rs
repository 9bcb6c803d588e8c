use thiserror::Error;

/// Errors produced while setting up a survey simulation.
///
/// Everything here is fatal and surfaced before any simulated time elapses.
/// Runtime scheduling outcomes (no observable target, failed time
/// allocation, propellant exhaustion) are not errors; they are modeled as
/// return values of the scheduling operations.
#[derive(Error, Debug)]
pub enum SurveyError {
    /// Configuration validation failure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Survey script file could not be read.
    #[error("failed to read survey script: {0}")]
    Io(#[from] std::io::Error),

    /// Survey script file is not valid JSON.
    #[error("survey script is not valid JSON: {0}")]
    Script(#[from] serde_json::Error),
}
