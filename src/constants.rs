/// Elo scale: a rating gap of this many points gives 10:1 odds
pub const ELO_SCALE: f64 = 400.0;

/// Default per-game rating noise (standard deviation, in Elo points)
pub const DEFAULT_NOISE_SD: f64 = 15.0;

/// Default number of simulated tournaments
pub const DEFAULT_TOTAL_RUNS: u64 = 100_000;

/// Default number of runs per batch
pub const DEFAULT_BATCH_SIZE: u64 = 1_000;

/// Default report destination
pub const DEFAULT_OUTPUT_PATH: &str = "bracket_sim_results.csv";

/// 2025 men's lacrosse field: (seed, team, Elo rating)
pub const DEFAULT_FIELD: [(u32, &str, f64); 16] = [
    (1, "Cornell", 2008.0),
    (2, "Maryland", 1923.0),
    (3, "Princeton", 1870.0),
    (4, "Ohio State", 1826.0),
    (5, "Penn State", 1848.0),
    (6, "Syracuse", 1817.0),
    (7, "Duke", 1765.0),
    (8, "North Carolina", 1766.0),
    (9, "Richmond", 1815.0),
    (10, "Georgetown", 1723.0),
    (11, "Harvard", 1767.0),
    (12, "Colgate", 1666.0),
    (13, "Notre Dame", 1806.0),
    (14, "Towson", 1613.0),
    (15, "Air Force", 1535.0),
    (16, "Albany", 1567.0),
];
