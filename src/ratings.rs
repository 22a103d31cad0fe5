use std::collections::HashMap;

use crate::error::{Result, SimError};
use crate::team::Team;

/// Immutable lookup from team identifier to rating.
#[derive(Clone, Debug, Default)]
pub struct RatingStore {
    ratings: HashMap<String, f64>,
}

impl RatingStore {
    pub fn new() -> Self {
        RatingStore::default()
    }

    /// Build a store from the configured field. Later duplicates overwrite
    /// earlier ones; `TournamentConfig::validate` rejects them beforehand.
    pub fn from_teams(teams: &[Team]) -> Self {
        let ratings = teams
            .iter()
            .map(|t| (t.name.clone(), t.rating))
            .collect();
        RatingStore { ratings }
    }

    pub fn insert(&mut self, name: impl Into<String>, rating: f64) {
        self.ratings.insert(name.into(), rating);
    }

    /// Rating for `name`, or `UnknownTeam` if the team is not in the store.
    pub fn get(&self, name: &str) -> Result<f64> {
        self.ratings
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UnknownTeam(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ratings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RatingStore {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        RatingStore {
            ratings: iter.into_iter().map(|(n, r)| (n.into(), r)).collect(),
        }
    }
}
