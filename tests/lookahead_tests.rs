use stackrace::{
    draw_action_ev, enumerate_next_draw_states, enumerate_round, simulate_race, Board,
    GameConfig, Piece, RoundState,
};

const RED: Piece = Piece(0);
const BLUE: Piece = Piece(1);
const GREEN: Piece = Piece(2);
const ORANGE: Piece = Piece(3);
const PURPLE: Piece = Piece(4);
const GRAY: Piece = Piece(5);

#[test]
fn next_states_cover_pending_times_rolls() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);

    let outcomes = enumerate_next_draw_states(&state, &cfg);
    assert_eq!(outcomes.len(), 6 * 3);

    let p_sum: f64 = outcomes.iter().map(|(p, _)| p).sum();
    assert!((p_sum - 1.0).abs() < 1e-12);
    for (p, next) in &outcomes {
        assert!((p - 1.0 / 18.0).abs() < 1e-12);
        assert_eq!(next.draws_taken, 1);
        assert_eq!(next.pending().len(), 5);
    }
}

#[test]
fn complete_round_enumerates_a_fresh_round() {
    let cfg = GameConfig::default();
    let base = RoundState::new(&cfg);
    let state =
        RoundState::with_round(base.board.clone(), 5, vec![GRAY], &cfg).expect("state");

    // Rollover: every configured piece is a candidate again, and the
    // successors carry reset bookkeeping.
    let outcomes = enumerate_next_draw_states(&state, &cfg);
    assert_eq!(outcomes.len(), 6 * 3);
    for (_, next) in &outcomes {
        assert_eq!(next.draws_taken, 1);
        assert_eq!(next.pending().len(), 5);
    }
    assert!(outcomes
        .iter()
        .any(|(_, next)| !next.pending().contains(&GRAY)));
}

#[test]
fn decided_branches_make_the_valuation_deterministic() {
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
    let state = RoundState::with_round(board, 4, vec![RED], &cfg).expect("state");

    let round = enumerate_round(&state, &cfg);
    let race = simulate_race(&state, &cfg, 100, 11);

    // Every next state has Red past the threshold, so no branch simulates
    // and the whole valuation is exact. Red wins now (race tier 8 pays 8)
    // and still wins after any draw, so drawing reveals nothing:
    // EV(draw) = 1 − (8 − 8) = 1.
    let ev = draw_action_ev(&state, &round, &race, &cfg, 123);
    assert!((ev - 1.0).abs() < 1e-9, "got {ev}");

    let again = draw_action_ev(&state, &round, &race, &cfg, 456);
    assert_eq!(ev, again, "no randomness is consumed on decided branches");
}

#[test]
fn valuation_is_reproducible_for_a_seed() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);

    let round = enumerate_round(&state, &cfg);
    let race = simulate_race(&state, &cfg, cfg.race_sims, 5);

    let a = draw_action_ev(&state, &round, &race, &cfg, 99);
    let b = draw_action_ev(&state, &round, &race, &cfg, 99);
    assert_eq!(a, b);
    assert!(a.is_finite());
    assert!((-20.0..=20.0).contains(&a), "implausible draw EV {a}");
}
