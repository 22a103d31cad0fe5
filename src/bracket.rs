use crate::error::{Result, SimError};
use crate::team::Entry;

/// Check that `count` is a power of two with at least two teams.
pub fn check_field_size(count: usize) -> Result<()> {
    if count < 2 || !count.is_power_of_two() {
        return Err(SimError::NotPowerOfTwo { count });
    }
    Ok(())
}

/// Check that `seeds` is exactly 1..=N with no repeats.
pub fn check_seeds<I>(seeds: I, count: usize) -> Result<()>
where
    I: IntoIterator<Item = u32>,
{
    let mut seen = vec![false; count];
    for seed in seeds {
        let idx = seed as usize;
        if idx == 0 || idx > count {
            return Err(SimError::SeedOutOfRange { seed, count });
        }
        if seen[idx - 1] {
            return Err(SimError::DuplicateSeed { seed });
        }
        seen[idx - 1] = true;
    }
    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(SimError::MissingSeed {
            seed: missing as u32 + 1,
        });
    }
    Ok(())
}

/// Order the field into round-one match order.
///
/// Seed 1 meets seed N, seed 2 meets seed N-1, and so on; each pair sits at
/// adjacent positions `(2k, 2k+1)`. Survivors are never reseeded, so later
/// rounds pair the winner of game 0 with game 1, game 2 with game 3, etc.
pub fn seed_order(entries: &[Entry]) -> Result<Vec<Entry>> {
    let n = entries.len();
    check_field_size(n)?;
    check_seeds(entries.iter().map(|e| e.seed), n)?;

    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.seed);

    let mut ordered = Vec::with_capacity(n);
    for i in 0..n / 2 {
        ordered.push(sorted[i].clone());
        ordered.push(sorted[n - 1 - i].clone());
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(n: u32) -> Vec<Entry> {
        (1..=n).map(|s| Entry::new(s, format!("Team{}", s))).collect()
    }

    #[test]
    fn test_sixteen_team_order() {
        let mut entries = field(16);
        entries.reverse();
        let ordered = seed_order(&entries).unwrap();

        let seeds: Vec<u32> = ordered.iter().map(|e| e.seed).collect();
        assert_eq!(
            seeds,
            vec![1, 16, 2, 15, 3, 14, 4, 13, 5, 12, 6, 11, 7, 10, 8, 9]
        );
        assert_eq!(ordered[0].name, "Team1");
        assert_eq!(ordered[1].name, "Team16");
    }

    #[test]
    fn test_two_team_order() {
        let ordered = seed_order(&[Entry::new(2, "B"), Entry::new(1, "A")]).unwrap();
        assert_eq!(ordered, vec![Entry::new(1, "A"), Entry::new(2, "B")]);
    }

    #[test]
    fn test_not_power_of_two() {
        assert!(matches!(seed_order(&field(6)), Err(SimError::NotPowerOfTwo { count: 6 })));
        assert!(matches!(seed_order(&field(1)), Err(SimError::NotPowerOfTwo { count: 1 })));
        assert!(matches!(seed_order(&[]), Err(SimError::NotPowerOfTwo { count: 0 })));
    }

    #[test]
    fn test_bad_seeds() {
        let dup = vec![Entry::new(1, "A"), Entry::new(1, "B")];
        assert!(matches!(seed_order(&dup), Err(SimError::DuplicateSeed { seed: 1 })));

        let gap = vec![Entry::new(1, "A"), Entry::new(3, "B")];
        assert!(matches!(seed_order(&gap), Err(SimError::SeedOutOfRange { seed: 3, count: 2 })));

        let zero = vec![Entry::new(0, "A"), Entry::new(1, "B")];
        assert!(matches!(seed_order(&zero), Err(SimError::SeedOutOfRange { seed: 0, .. })));
    }

    #[test]
    fn test_missing_seed_reported() {
        assert!(matches!(
            check_seeds([1, 2, 2, 4], 4),
            Err(SimError::DuplicateSeed { seed: 2 })
        ));
        assert!(matches!(check_seeds([1, 2, 4], 4), Err(SimError::MissingSeed { seed: 3 })));
    }
}
