use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or running a bracket simulation.
///
/// Everything except `Io` and `Csv` is a configuration error: randomness
/// never produces an error outcome, only a winner.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("number of teams must be a power of two (at least 2), got {count}")]
    NotPowerOfTwo { count: usize },

    #[error("seed {seed} is assigned to more than one team")]
    DuplicateSeed { seed: u32 },

    #[error("seed {seed} is missing from the field")]
    MissingSeed { seed: u32 },

    #[error("seed {seed} is outside 1..={count}")]
    SeedOutOfRange { seed: u32, count: usize },

    #[error("team {name:?} appears more than once")]
    DuplicateTeam { name: String },

    #[error("team {name:?} has a non-finite rating {rating}")]
    InvalidRating { name: String, rating: f64 },

    #[error("noise standard deviation must be finite and non-negative, got {0}")]
    InvalidNoise(f64),

    #[error("batch size must be positive")]
    InvalidBatchSize,

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("round has an odd number of entries ({len})")]
    OddRound { len: usize },

    #[error("failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SimError {
    /// True for errors caused by bad configuration rather than I/O or
    /// the runtime environment.
    pub fn is_config(&self) -> bool {
        !matches!(self, SimError::Io(_) | SimError::Csv(_) | SimError::ThreadPool(_))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
