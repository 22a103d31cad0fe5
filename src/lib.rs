//! Bracket Sim - Monte Carlo single-elimination tournament simulator.
//!
//! Teams are paired by seed (1 vs N, 2 vs N-1, ...), every game is decided by
//! an Elo win probability with optional per-game rating noise, and champions
//! from many independent runs are tallied into a win-percentage table.
//! Python bindings are available with the `python` feature.

pub mod aggregate;
pub mod bracket;
pub mod config;
pub mod constants;
pub mod error;
pub mod ratings;
pub mod report;
pub mod team;
pub mod tournament;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use aggregate::{run_large_simulation, simulate_batch, CancelToken, SimulationSummary, Tally};
pub use bracket::seed_order;
pub use config::{SimulationSettings, TournamentConfig};
pub use constants::{DEFAULT_BATCH_SIZE, DEFAULT_NOISE_SD, DEFAULT_TOTAL_RUNS, ELO_SCALE};
pub use error::{Result, SimError};
pub use ratings::RatingStore;
pub use report::{CsvReportSink, ReportRow, ReportSink};
pub use team::{Entry, Team};
pub use tournament::{play_round, simulate_bracket, TournamentState};
pub use win_prob::{elo_win_prob, WinProbModel};
