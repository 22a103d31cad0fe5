use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bracket::seed_order;
use crate::config::TournamentConfig;
use crate::error::{Result, SimError};
use crate::team::{Entry, Team};
use crate::win_prob::WinProbModel;

/// Play one round of adjacent pairs and return the winners in match order.
///
/// For each pair `(2k, 2k+1)` one uniform draw in `[0, 1)` decides the game:
/// below `P(even beats odd)` the even entry advances, otherwise the odd one.
///
/// # Arguments
/// * `round` - Entries in match order; length must be even
/// * `model` - Win probability model
/// * `rng` - Random source for noise and game draws
///
/// # Returns
/// Winners in match order, half as many as `round`
pub fn play_round<R: Rng + ?Sized>(
    round: &[Entry],
    model: &WinProbModel,
    rng: &mut R,
) -> Result<Vec<Entry>> {
    if round.len() % 2 != 0 {
        return Err(SimError::OddRound { len: round.len() });
    }

    let mut winners = Vec::with_capacity(round.len() / 2);
    for pair in round.chunks_exact(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let prob = model.win_prob(&a.name, &b.name, rng)?;
        let winner = if rng.gen::<f64>() < prob { a } else { b };
        winners.push(winner.clone());
    }
    Ok(winners)
}

/// Run rounds from `initial` until one entry is left and return it.
///
/// # Arguments
/// * `initial` - Round-one match order from `seed_order`
/// * `model` - Win probability model
/// * `rng` - Random source for the whole tournament
///
/// # Returns
/// The champion's entry
pub fn simulate_bracket<R: Rng + ?Sized>(
    initial: &[Entry],
    model: &WinProbModel,
    rng: &mut R,
) -> Result<Entry> {
    let mut current = play_round(initial, model, rng)?;
    while current.len() > 1 {
        current = play_round(&current, model, rng)?;
    }
    current.pop().ok_or(SimError::NotPowerOfTwo { count: initial.len() })
}

/// Validated field, win model, and round-one order, ready to simulate.
#[derive(Clone, Debug)]
pub struct TournamentState {
    config: TournamentConfig,
    model: WinProbModel,
    initial: Vec<Entry>,
}

impl TournamentState {
    pub fn new(config: TournamentConfig) -> Result<Self> {
        config.validate()?;
        let model = WinProbModel::new(config.rating_store(), config.noise_sd)?;
        let initial = seed_order(&config.entries())?;
        Ok(TournamentState {
            config,
            model,
            initial,
        })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn model(&self) -> &WinProbModel {
        &self.model
    }

    pub fn teams(&self) -> &[Team] {
        &self.config.teams
    }

    /// Round-one match order.
    pub fn initial_order(&self) -> &[Entry] {
        &self.initial
    }

    pub fn num_rounds(&self) -> u32 {
        self.initial.len().trailing_zeros()
    }

    /// Simulate one tournament and return the champion's name.
    pub fn simulate_champion<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        simulate_bracket(&self.initial, &self.model, rng).map(|e| e.name)
    }

    /// Simulate one tournament, keeping the survivors of every round.
    ///
    /// The first element is the round-one order; the last holds the champion.
    pub fn simulate_with_path<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Vec<Entry>>> {
        let mut rounds = vec![self.initial.clone()];
        while let Some(last) = rounds.last().filter(|r| r.len() > 1) {
            let next = play_round(last, &self.model, rng)?;
            rounds.push(next);
        }
        Ok(rounds)
    }

    /// Run `n_simulations` tournaments sequentially and return each champion.
    ///
    /// Each run gets its own generator seeded from a master generator, so the
    /// same `seed` always reproduces the same list.
    pub fn run_simulations(&self, n_simulations: usize, seed: Option<u64>) -> Result<Vec<String>> {
        let mut master = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut champions = Vec::with_capacity(n_simulations);
        for _ in 0..n_simulations {
            let mut rng = ChaCha8Rng::seed_from_u64(master.gen::<u64>());
            champions.push(self.simulate_champion(&mut rng)?);
        }
        Ok(champions)
    }
}
