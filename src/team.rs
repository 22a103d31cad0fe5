#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Team in the field with its bracket seed and Elo rating.
///
/// Ratings are fixed configuration: nothing in a simulation run mutates them.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,

    /// Bracket seed, 1 is the strongest
    pub seed: u32,

    /// Elo-style strength rating
    pub rating: f64,
}

impl Team {
    pub fn new(name: impl Into<String>, seed: u32, rating: f64) -> Self {
        Team {
            name: name.into(),
            seed,
            rating,
        }
    }

    /// Bracket slot for this team.
    pub fn entry(&self) -> Entry {
        Entry::new(self.seed, self.name.clone())
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Team {
    #[new]
    fn py_new(name: String, seed: u32, rating: f64) -> Self {
        Team::new(name, seed, rating)
    }

    fn __repr__(&self) -> String {
        format!("Team({:?}, seed={}, rating={})", self.name, self.seed, self.rating)
    }
}

/// A (seed, team) slot in a round's match order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry {
    pub seed: u32,
    pub name: String,
}

impl Entry {
    pub fn new(seed: u32, name: impl Into<String>) -> Self {
        Entry {
            seed,
            name: name.into(),
        }
    }
}

impl From<(u32, &str)> for Entry {
    fn from((seed, name): (u32, &str)) -> Self {
        Entry::new(seed, name)
    }
}
