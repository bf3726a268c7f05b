//! Error type for the simulation and its host glue

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation has not been started")]
    NotStarted,
    #[error("simulation was already started")]
    AlreadyStarted,
    #[error("simulation is finished; reset it to play again")]
    Finished,
    #[error("city has {buildings} buildings, need at least {min} to place two gorillas", min = crate::consts::MIN_BUILDINGS)]
    CityTooSmall { buildings: usize },
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
    #[error("timer error: {0}")]
    Timer(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
