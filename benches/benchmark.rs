use bracket_sim::aggregate::run_large_simulation;
use bracket_sim::config::{SimulationSettings, TournamentConfig};
use bracket_sim::team::Team;
use bracket_sim::tournament::TournamentState;
use bracket_sim::win_prob::elo_win_prob;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_64_team_tournament() -> TournamentState {
    let teams = (1..=64)
        .map(|seed| Team::new(format!("Team{}", seed), seed, 2000.0 - 6.0 * seed as f64))
        .collect();
    TournamentState::new(TournamentConfig::new(teams, 15.0)).unwrap()
}

fn bench_win_prob(c: &mut Criterion) {
    c.bench_function("elo_win_prob", |b| {
        b.iter(|| elo_win_prob(black_box(1923.0), black_box(1870.0)))
    });

    let state = TournamentState::new(TournamentConfig::default_field()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    c.bench_function("noisy_win_prob", |b| {
        b.iter(|| state.model().win_prob(black_box("Cornell"), black_box("Albany"), &mut rng))
    });
}

fn bench_single_tournament(c: &mut Criterion) {
    let state16 = TournamentState::new(TournamentConfig::default_field()).unwrap();
    let state64 = create_64_team_tournament();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("tournament_16_team_sim", |b| {
        b.iter(|| black_box(&state16).simulate_champion(&mut rng))
    });

    c.bench_function("tournament_64_team_sim", |b| {
        b.iter(|| black_box(&state64).simulate_champion(&mut rng))
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let state = TournamentState::new(TournamentConfig::default_field()).unwrap();

    c.bench_function("aggregate_1000_sims_batch_1000", |b| {
        let settings = SimulationSettings::new(1000, 1000).with_seed(42);
        b.iter(|| run_large_simulation(black_box(&state), &settings, None))
    });

    c.bench_function("aggregate_1000_sims_batch_100", |b| {
        let settings = SimulationSettings::new(1000, 100).with_seed(42);
        b.iter(|| run_large_simulation(black_box(&state), &settings, None))
    });
}

criterion_group!(benches, bench_win_prob, bench_single_tournament, bench_aggregation);
criterion_main!(benches);
