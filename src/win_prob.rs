use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use crate::constants::ELO_SCALE;
use crate::error::{Result, SimError};
use crate::ratings::RatingStore;

/// Probability that a team rated `rating_a` beats a team rated `rating_b`.
///
/// Logistic (Elo) curve: `1 / (1 + 10^(-(Ra - Rb) / 400))`. Equal ratings
/// give exactly 0.5.
///
/// The result is not clamped. Once the favourite leads by roughly 6,400
/// points the curve saturates in `f64` and returns exactly 1.0; the
/// underdog's side reaches exactly 0.0 only when `10^x` overflows. Callers
/// must not assume the open interval (0, 1) for extreme ratings.
///
/// # Arguments
/// * `rating_a` - Rating of the first team
/// * `rating_b` - Rating of the second team
///
/// # Returns
/// Probability of the first team winning (0.0-1.0)
pub fn elo_win_prob(rating_a: f64, rating_b: f64) -> f64 {
    if rating_a == rating_b {
        return 0.5;
    }
    1.0 / (1.0 + 10f64.powf(-(rating_a - rating_b) / ELO_SCALE))
}

/// Rating-based win probability with optional per-game Gaussian noise.
///
/// Every call to [`WinProbModel::win_prob`] perturbs both ratings with fresh,
/// independent draws; nothing is cached between calls. A noise standard
/// deviation of zero disables perturbation entirely.
#[derive(Clone, Debug)]
pub struct WinProbModel {
    ratings: RatingStore,
    noise_sd: f64,
    noise: Option<Normal>,
}

impl WinProbModel {
    pub fn new(ratings: RatingStore, noise_sd: f64) -> Result<Self> {
        if !noise_sd.is_finite() || noise_sd < 0.0 {
            return Err(SimError::InvalidNoise(noise_sd));
        }
        let noise = if noise_sd > 0.0 {
            Some(Normal::new(0.0, noise_sd).map_err(|_| SimError::InvalidNoise(noise_sd))?)
        } else {
            None
        };
        Ok(WinProbModel {
            ratings,
            noise_sd,
            noise,
        })
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    pub fn noise_sd(&self) -> f64 {
        self.noise_sd
    }

    /// Noise-free probability that `team_a` beats `team_b`.
    pub fn expected_win_prob(&self, team_a: &str, team_b: &str) -> Result<f64> {
        let ra = self.ratings.get(team_a)?;
        let rb = self.ratings.get(team_b)?;
        Ok(elo_win_prob(ra, rb))
    }

    /// Probability that `team_a` beats `team_b` in one game, with both
    /// ratings perturbed by independent noise draws from `rng`.
    ///
    /// # Arguments
    /// * `team_a` - First team's name
    /// * `team_b` - Second team's name
    /// * `rng` - Source of the two noise draws
    ///
    /// # Returns
    /// Probability of `team_a` winning, or `UnknownTeam` if either name is
    /// not in the rating store
    pub fn win_prob<R: Rng + ?Sized>(&self, team_a: &str, team_b: &str, rng: &mut R) -> Result<f64> {
        let mut ra = self.ratings.get(team_a)?;
        let mut rb = self.ratings.get(team_b)?;

        if let Some(noise) = &self.noise {
            ra += noise.sample(rng);
            rb += noise.sample(rng);
        }

        Ok(elo_win_prob(ra, rb))
    }
}
