//! Repeated tournament simulation and championship counting.
//!
//! Runs are split into batches. Every run draws its own seed from a single
//! master generator in run order, so for a fixed master seed the result does
//! not depend on the batch size or on how many worker threads share a batch.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{SimulationSettings, TournamentConfig};
use crate::error::{Result, SimError};
use crate::report::ReportRow;
use crate::tournament::TournamentState;

/// Championship counts keyed by team name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Tally::default()
    }

    pub fn record(&mut self, champion: String) {
        *self.counts.entry(champion).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: Tally) {
        for (team, count) in other.counts {
            *self.counts.entry(team).or_insert(0) += count;
        }
    }

    pub fn count(&self, team: &str) -> u64 {
        self.counts.get(team).copied().unwrap_or(0)
    }

    /// Sum of all counts, i.e. the number of runs recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Cooperative stop signal, checked between batches.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Final tally of an aggregation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSummary {
    pub tally: Tally,

    /// Runs actually completed (less than requested only when cancelled)
    pub total_runs: u64,

    pub cancelled: bool,
}

impl SimulationSummary {
    /// `100 * count / total_runs`, rounded to two decimals.
    pub fn win_pct(&self, team: &str) -> f64 {
        if self.total_runs == 0 {
            return 0.0;
        }
        round2(100.0 * self.tally.count(team) as f64 / self.total_runs as f64)
    }

    /// Report rows, most championships first; ties keep seed order.
    pub fn rows(&self, config: &TournamentConfig) -> Vec<ReportRow> {
        let mut ranked: Vec<(&str, u64, u32)> = self
            .tally
            .iter()
            .map(|(team, count)| (team, count, config.seed_of(team).unwrap_or(u32::MAX)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)).then(a.0.cmp(b.0)));

        ranked
            .into_iter()
            .map(|(team, count, _)| ReportRow::new(team, count, self.win_pct(team)))
            .collect()
    }
}

/// Two-decimal rounding, halves to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Simulate one tournament per seed, fanning out over the current rayon pool.
pub fn simulate_batch(state: &TournamentState, seeds: &[u64]) -> Result<Tally> {
    seeds
        .par_iter()
        .map(|&seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            state.simulate_champion(&mut rng)
        })
        .try_fold(Tally::new, |mut tally, champion| {
            tally.record(champion?);
            Ok::<_, SimError>(tally)
        })
        .try_reduce(Tally::new, |mut left, right| {
            left.merge(right);
            Ok(left)
        })
}

/// Run `settings.total_runs` tournaments in batches and count champions.
///
/// A trailing partial batch covers any remainder. If `cancel` fires, the run
/// stops before the next batch and returns everything tallied so far.
///
/// # Arguments
/// * `state` - Validated tournament to simulate
/// * `settings` - Run count, batch size, master seed and thread count
/// * `cancel` - Optional stop signal, checked between batches
///
/// # Returns
/// Champion tally with the number of completed runs
pub fn run_large_simulation(
    state: &TournamentState,
    settings: &SimulationSettings,
    cancel: Option<&CancelToken>,
) -> Result<SimulationSummary> {
    settings.validate()?;

    match settings.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| SimError::ThreadPool(e.to_string()))?;
            pool.install(|| run_batches(state, settings, stop_check(cancel)))
        }
        None => run_batches(state, settings, stop_check(cancel)),
    }
}

fn stop_check(cancel: Option<&CancelToken>) -> impl FnMut(u64) -> bool + '_ {
    move |_completed| cancel.is_some_and(CancelToken::is_cancelled)
}

/// Batch loop. `should_stop` sees the runs completed so far before each batch.
fn run_batches<F>(
    state: &TournamentState,
    settings: &SimulationSettings,
    mut should_stop: F,
) -> Result<SimulationSummary>
where
    F: FnMut(u64) -> bool,
{
    let mut master = match settings.seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let (full_batches, remainder) = settings.batch_plan();
    let batches = (0..full_batches)
        .map(|_| settings.batch_size)
        .chain((remainder > 0).then_some(remainder));

    info!(
        total_runs = settings.total_runs,
        batch_size = settings.batch_size,
        full_batches,
        remainder,
        teams = state.teams().len(),
        "starting bracket simulation"
    );

    let mut tally = Tally::new();
    let mut completed = 0u64;
    let mut cancelled = false;

    for (index, size) in batches.enumerate() {
        if should_stop(completed) {
            warn!(completed, requested = settings.total_runs, "simulation cancelled");
            cancelled = true;
            break;
        }

        let seeds: Vec<u64> = (0..size).map(|_| master.gen::<u64>()).collect();
        tally.merge(simulate_batch(state, &seeds)?);
        completed += size;

        debug!(batch = index, runs = size, completed, "batch complete");
    }

    info!(completed, cancelled, "bracket simulation finished");

    Ok(SimulationSummary {
        tally,
        total_runs: completed,
        cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Team;

    fn make_state() -> TournamentState {
        TournamentState::new(TournamentConfig::default_field()).unwrap()
    }

    #[test]
    fn test_totals_match_runs() {
        let state = make_state();
        for batch_size in [1000, 300, 1] {
            let settings = SimulationSettings::new(1000, batch_size).with_seed(7);
            let summary = run_large_simulation(&state, &settings, None).unwrap();
            assert_eq!(summary.total_runs, 1000);
            assert_eq!(summary.tally.total(), 1000);
            assert!(!summary.cancelled);
        }
    }

    #[test]
    fn test_batching_does_not_change_result() {
        let state = make_state();
        let one_batch = run_large_simulation(&state, &SimulationSettings::new(1000, 1000).with_seed(3), None).unwrap();
        let uneven = run_large_simulation(&state, &SimulationSettings::new(1000, 300).with_seed(3), None).unwrap();
        let singles = run_large_simulation(&state, &SimulationSettings::new(1000, 1).with_seed(3), None).unwrap();
        assert_eq!(one_batch.tally, uneven.tally);
        assert_eq!(one_batch.tally, singles.tally);
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let state = make_state();
        let base = SimulationSettings::new(500, 128).with_seed(21);
        let single = run_large_simulation(&state, &base.clone().with_threads(1), None).unwrap();
        let multi = run_large_simulation(&state, &base.with_threads(4), None).unwrap();
        assert_eq!(single.tally, multi.tally);
    }

    #[test]
    fn test_zero_runs() {
        let state = make_state();
        let summary = run_large_simulation(&state, &SimulationSettings::new(0, 10), None).unwrap();
        assert_eq!(summary.total_runs, 0);
        assert!(summary.tally.is_empty());
        assert_eq!(summary.win_pct("Cornell"), 0.0);
        assert!(summary.rows(state.config()).is_empty());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let state = make_state();
        let result = run_large_simulation(&state, &SimulationSettings::new(10, 0), None);
        assert!(matches!(result, Err(SimError::InvalidBatchSize)));
    }

    #[test]
    fn test_cancel_before_start_keeps_nothing() {
        let state = make_state();
        let token = CancelToken::new();
        token.cancel();
        let summary = run_large_simulation(&state, &SimulationSettings::new(100, 10), Some(&token)).unwrap();
        assert!(summary.cancelled);
        assert_eq!(summary.total_runs, 0);
        assert_eq!(summary.tally.total(), 0);
    }

    #[test]
    fn test_cancel_mid_run_keeps_completed_batches() {
        let state = make_state();
        let settings = SimulationSettings::new(1000, 100).with_seed(5);
        let token = CancelToken::new();

        let mut batches_seen = 0;
        let summary = run_batches(&state, &settings, |completed| {
            assert_eq!(completed, batches_seen * 100);
            batches_seen += 1;
            if batches_seen == 3 {
                token.cancel();
            }
            token.is_cancelled()
        })
        .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.total_runs, 200);
        assert_eq!(summary.tally.total(), 200);

        let expected = round2(100.0 * summary.tally.count("Cornell") as f64 / 200.0);
        assert_eq!(summary.win_pct("Cornell"), expected);
        let total_pct: f64 = summary.tally.iter().map(|(team, _)| summary.win_pct(team)).sum();
        assert!((total_pct - 100.0).abs() < 0.01 * summary.tally.len() as f64);

        // The kept batches are the same runs an uncancelled 200-run job makes.
        let full = run_large_simulation(&state, &SimulationSettings::new(200, 100).with_seed(5), None).unwrap();
        assert_eq!(summary.tally, full.tally);
    }

    #[test]
    fn test_win_pct_rounds_half_to_even() {
        let mut tally = Tally::new();
        tally.record("A".to_string());
        let summary = SimulationSummary {
            tally,
            total_runs: 800,
            cancelled: false,
        };
        assert_eq!(summary.win_pct("A"), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.0 / 3.0 * 100.0), 66.67);
    }

    #[test]
    fn test_rows_sorted_and_rounded() {
        let config = TournamentConfig::new(
            vec![
                Team::new("A", 1, 1500.0),
                Team::new("B", 2, 1500.0),
                Team::new("C", 3, 1500.0),
                Team::new("D", 4, 1500.0),
            ],
            0.0,
        );
        let mut tally = Tally::new();
        for name in ["C", "C", "B", "A", "D", "B"] {
            tally.record(name.to_string());
        }
        let summary = SimulationSummary {
            tally,
            total_runs: 6,
            cancelled: false,
        };

        let rows = summary.rows(&config);
        let order: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A", "D"]);
        assert_eq!(rows[0].championships, 2);
        assert_eq!(rows[0].win_pct, 33.33);
        assert_eq!(rows[2].win_pct, 16.67);
    }

    #[test]
    fn test_tally_merge() {
        let mut a = Tally::new();
        a.record("X".to_string());
        let mut b = Tally::new();
        b.record("X".to_string());
        b.record("Y".to_string());
        a.merge(b);
        assert_eq!(a.count("X"), 2);
        assert_eq!(a.count("Y"), 1);
        assert_eq!(a.count("Z"), 0);
        assert_eq!(a.total(), 3);
        assert_eq!(a.len(), 2);
    }
}
