//! Tournament field and run settings.
//!
//! The field is loaded once (from TOML or the built-in default) and validated
//! before any simulation starts; simulations only ever borrow it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::bracket::{check_field_size, check_seeds};
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_FIELD, DEFAULT_NOISE_SD, DEFAULT_TOTAL_RUNS};
use crate::error::{Result, SimError};
use crate::ratings::RatingStore;
use crate::team::{Entry, Team};

fn default_noise_sd() -> f64 {
    DEFAULT_NOISE_SD
}

/// The seeded field plus the per-game noise level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Standard deviation of per-game rating noise; 0 disables noise
    #[serde(default = "default_noise_sd")]
    pub noise_sd: f64,

    pub teams: Vec<Team>,
}

impl TournamentConfig {
    pub fn new(teams: Vec<Team>, noise_sd: f64) -> Self {
        TournamentConfig { noise_sd, teams }
    }

    /// Built-in 16-team field.
    pub fn default_field() -> Self {
        let teams = DEFAULT_FIELD
            .iter()
            .map(|&(seed, name, rating)| Team::new(name, seed, rating))
            .collect();
        TournamentConfig::new(teams, DEFAULT_NOISE_SD)
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text).map_err(|e| SimError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_noise_sd(mut self, noise_sd: f64) -> Self {
        self.noise_sd = noise_sd;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.noise_sd.is_finite() || self.noise_sd < 0.0 {
            return Err(SimError::InvalidNoise(self.noise_sd));
        }

        let count = self.teams.len();
        check_field_size(count)?;
        check_seeds(self.teams.iter().map(|t| t.seed), count)?;

        let mut names = HashSet::with_capacity(count);
        for team in &self.teams {
            if !names.insert(team.name.as_str()) {
                return Err(SimError::DuplicateTeam {
                    name: team.name.clone(),
                });
            }
            if !team.rating.is_finite() {
                return Err(SimError::InvalidRating {
                    name: team.name.clone(),
                    rating: team.rating,
                });
            }
        }
        Ok(())
    }

    pub fn rating_store(&self) -> RatingStore {
        RatingStore::from_teams(&self.teams)
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.teams.iter().map(Team::entry).collect()
    }

    /// Seed of `name`, if it is in the field.
    pub fn seed_of(&self, name: &str) -> Option<u32> {
        self.teams.iter().find(|t| t.name == name).map(|t| t.seed)
    }
}

/// How many tournaments to simulate, and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub total_runs: u64,
    pub batch_size: u64,

    /// Master seed; `None` seeds from OS entropy
    pub seed: Option<u64>,

    /// Worker threads; `None` uses the global rayon pool
    pub threads: Option<usize>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            total_runs: DEFAULT_TOTAL_RUNS,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            threads: None,
        }
    }
}

impl SimulationSettings {
    pub fn new(total_runs: u64, batch_size: u64) -> Self {
        SimulationSettings {
            total_runs,
            batch_size,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(SimError::InvalidBatchSize);
        }
        Ok(())
    }

    /// Number of full batches and the size of the trailing partial batch.
    pub fn batch_plan(&self) -> (u64, u64) {
        (
            self.total_runs / self.batch_size,
            self.total_runs % self.batch_size,
        )
    }
}
