use stackrace::{simulate_race, Board, GameConfig, Piece, RoundState};

const RED: Piece = Piece(0);
const BLUE: Piece = Piece(1);
const GREEN: Piece = Piece(2);
const ORANGE: Piece = Piece(3);
const PURPLE: Piece = Piece(4);
const GRAY: Piece = Piece(5);

#[test]
fn estimates_are_reproducible_for_a_seed() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);

    let a = simulate_race(&state, &cfg, 200, 42);
    let b = simulate_race(&state, &cfg, 200, 42);
    assert_eq!(a.win, b.win);
    assert_eq!(a.lose, b.lose);
    assert_eq!(a.mean_draws, b.mean_draws);
}

#[test]
fn probability_mass_and_reverse_exclusion() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);

    let est = simulate_race(&state, &cfg, 400, 7);
    let win_sum: f64 = est.win.iter().sum();
    let lose_sum: f64 = est.lose.iter().sum();
    assert!((win_sum - 1.0).abs() < 1e-9, "every trial has one winner");
    assert!((lose_sum - 1.0).abs() < 1e-9, "every trial has one loser");
    assert_eq!(est.win[GRAY.index()], 0.0);
    assert_eq!(est.lose[GRAY.index()], 0.0);
    assert!(est.mean_draws >= 1.0);
}

#[test]
fn forced_final_draw_is_estimated_exactly() {
    let cfg = GameConfig::default();
    let board = Board::from_stacks(
        6,
        &[
            (15, vec![RED]),
            (1, vec![GREEN, ORANGE, PURPLE]),
            (2, vec![BLUE]),
            (13, vec![GRAY]),
        ],
    )
    .expect("board");
    // One draw left and only Red pending: every trial draws Red, which
    // crosses 16 on any roll. The estimator must agree with the exact
    // answer at any sample count.
    let state = RoundState::with_round(board, 4, vec![RED], &cfg).expect("state");

    let est = simulate_race(&state, &cfg, 100, 3);
    assert_eq!(est.win[RED.index()], 1.0);
    assert_eq!(est.mean_draws, 1.0);
    // Green, Orange, Purple tie at the minimum; the stack bottom loses.
    assert_eq!(est.lose[GREEN.index()], 1.0);
    assert_eq!(est.lose[ORANGE.index()], 0.0);
}

#[test]
fn independent_runs_agree_within_sampling_error() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);

    let a = simulate_race(&state, &cfg, 2000, 1);
    let b = simulate_race(&state, &cfg, 2000, 2);
    for piece in cfg.rank_pieces() {
        let i = piece.index();
        assert!(
            (a.win[i] - b.win[i]).abs() < 0.1,
            "win estimates for piece {i} diverged: {} vs {}",
            a.win[i],
            b.win[i]
        );
        assert!((a.lose[i] - b.lose[i]).abs() < 0.1);
    }
    assert!((a.mean_draws - b.mean_draws).abs() < 3.0);
}

#[test]
fn zero_trials_yield_neutral_estimate() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);
    let est = simulate_race(&state, &cfg, 0, 0);
    assert!(est.win.iter().all(|&p| p == 0.0));
    assert!(est.lose.iter().all(|&p| p == 0.0));
    assert_eq!(est.mean_draws, 0.0);
}
