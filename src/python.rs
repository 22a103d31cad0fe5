//! Python bindings, built with the `python` feature.

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::aggregate::run_large_simulation;
use crate::config::{SimulationSettings, TournamentConfig};
use crate::constants::DEFAULT_NOISE_SD;
use crate::error::SimError;
use crate::team::Team;
use crate::tournament::TournamentState;
use crate::win_prob::elo_win_prob;

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        match err {
            SimError::ThreadPool(_) => PyRuntimeError::new_err(err.to_string()),
            SimError::Io(_) | SimError::Csv(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Validated tournament ready to simulate.
#[pyclass(name = "TournamentState")]
pub struct PyTournamentState {
    inner: TournamentState,
}

#[pymethods]
impl PyTournamentState {
    #[new]
    #[pyo3(signature = (teams, noise_sd = DEFAULT_NOISE_SD))]
    fn new(teams: Vec<Team>, noise_sd: f64) -> PyResult<Self> {
        let inner = TournamentState::new(TournamentConfig::new(teams, noise_sd))?;
        Ok(PyTournamentState { inner })
    }

    /// Built-in 16-team field.
    #[staticmethod]
    fn default_field() -> PyResult<Self> {
        let inner = TournamentState::new(TournamentConfig::default_field())?;
        Ok(PyTournamentState { inner })
    }

    #[getter]
    fn teams(&self) -> Vec<Team> {
        self.inner.teams().to_vec()
    }

    #[getter]
    fn noise_sd(&self) -> f64 {
        self.inner.model().noise_sd()
    }

    /// Round-one match order as (seed, name) tuples.
    fn initial_order(&self) -> Vec<(u32, String)> {
        self.inner
            .initial_order()
            .iter()
            .map(|e| (e.seed, e.name.clone()))
            .collect()
    }

    /// Simulate one tournament and return the champion.
    #[pyo3(signature = (seed = None))]
    fn simulate_champion(&self, seed: Option<u64>) -> PyResult<String> {
        let mut champions = self.inner.run_simulations(1, seed)?;
        champions
            .pop()
            .ok_or_else(|| PyValueError::new_err("simulation produced no champion"))
    }

    #[pyo3(signature = (n_simulations, seed = None))]
    fn run_simulations(&self, n_simulations: usize, seed: Option<u64>) -> PyResult<Vec<String>> {
        Ok(self.inner.run_simulations(n_simulations, seed)?)
    }

    fn __repr__(&self) -> String {
        format!(
            "TournamentState({} teams, {} rounds, noise_sd={})",
            self.inner.teams().len(),
            self.inner.num_rounds(),
            self.inner.model().noise_sd()
        )
    }
}

/// Noise-free Elo probability that `rating_a` beats `rating_b`.
#[pyfunction]
fn win_prob(rating_a: f64, rating_b: f64) -> f64 {
    elo_win_prob(rating_a, rating_b)
}

/// Run many tournaments and return (team, championships, win %) rows.
#[pyfunction]
#[pyo3(name = "run_large_simulation", signature = (state, total_runs, batch_size, seed = None))]
fn py_run_large_simulation(
    py: Python<'_>,
    state: &PyTournamentState,
    total_runs: u64,
    batch_size: u64,
    seed: Option<u64>,
) -> PyResult<Vec<(String, u64, f64)>> {
    let mut settings = SimulationSettings::new(total_runs, batch_size);
    settings.seed = seed;

    let inner = &state.inner;
    let summary = py.allow_threads(|| run_large_simulation(inner, &settings, None))?;

    Ok(summary
        .rows(inner.config())
        .into_iter()
        .map(|r| (r.team, r.championships, r.win_pct))
        .collect())
}

#[pymodule]
fn bracket_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Team>()?;
    m.add_class::<PyTournamentState>()?;

    m.add_function(wrap_pyfunction!(win_prob, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_large_simulation, m)?)?;

    m.add("DEFAULT_NOISE_SD", DEFAULT_NOISE_SD)?;

    Ok(())
}
