use num_rational::Rational64;
use num_traits::Zero;

use stackrace::{enumerate_round, Board, GameConfig, Piece, RoundState};

const RED: Piece = Piece(0);
const BLUE: Piece = Piece(1);
const GREEN: Piece = Piece(2);
const ORANGE: Piece = Piece(3);
const PURPLE: Piece = Piece(4);
const GRAY: Piece = Piece(5);

fn one() -> Rational64 {
    Rational64::from_integer(1)
}

#[test]
fn full_round_world_count_and_probability_mass() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);
    let stats = enumerate_round(&state, &cfg);

    // Ordered selections of 5 pieces from 6, times 3 rolls per draw.
    assert_eq!(stats.total_worlds, 720 * 243);

    let first_sum: Rational64 = stats.first.iter().copied().sum();
    let second_sum: Rational64 = stats.second.iter().copied().sum();
    assert_eq!(first_sum, one());
    assert_eq!(second_sum, one());

    for piece in cfg.rank_pieces() {
        let i = piece.index();
        assert!(
            stats.first[i] > Rational64::zero(),
            "every rank-eligible piece can still finish 1st from the start"
        );
        assert!(stats.first[i] + stats.second[i] <= one());
    }
    assert!(stats.first[GRAY.index()].is_zero());
    assert!(stats.second[GRAY.index()].is_zero());
}

#[test]
fn partial_round_world_count() {
    let cfg = GameConfig::default();
    let base = RoundState::new(&cfg);
    let state = RoundState::with_round(
        base.board.clone(),
        3,
        vec![RED, BLUE, GREEN],
        &cfg,
    )
    .expect("state");

    // 2 draws left from 3 pending: 3·2 orderings × 3² rolls.
    let stats = enumerate_round(&state, &cfg);
    assert_eq!(stats.total_worlds, 6 * 9);
    let first_sum: Rational64 = stats.first.iter().copied().sum();
    assert_eq!(first_sum, one());
}

#[test]
fn completed_round_is_a_single_world() {
    let cfg = GameConfig::default();
    let base = RoundState::new(&cfg);
    let state =
        RoundState::with_round(base.board.clone(), 5, vec![GRAY], &cfg).expect("state");

    let stats = enumerate_round(&state, &cfg);
    assert_eq!(stats.total_worlds, 1);
    // Deterministic outcome: Red leads at 3, Blue 2nd from the top of
    // nothing — Red at 3 beats Blue at 2 beats the stack at 1.
    assert_eq!(stats.first[RED.index()], one());
    assert_eq!(stats.second[BLUE.index()], one());
    assert_eq!(stats.expected_position[RED.index()], Rational64::from_integer(3));
}

#[test]
fn single_pending_draw_has_exact_expectations() {
    let cfg = GameConfig::default();
    let base = RoundState::new(&cfg);
    let state =
        RoundState::with_round(base.board.clone(), 4, vec![BLUE], &cfg).expect("state");

    let stats = enumerate_round(&state, &cfg);
    assert_eq!(stats.total_worlds, 3);

    // Blue moves to 3, 4, or 5 with equal probability: E = 4. Everyone
    // else stays put.
    assert_eq!(stats.expected_position[BLUE.index()], Rational64::from_integer(4));
    assert_eq!(stats.expected_position[RED.index()], Rational64::from_integer(3));
    assert_eq!(stats.expected_position[GRAY.index()], Rational64::from_integer(15));

    // Blue finishes 1st in every world (ties at 3 break by stack height,
    // where Blue lands on top of Red); Red is always 2nd.
    assert_eq!(stats.first[BLUE.index()], one());
    assert_eq!(stats.second[RED.index()], one());
}

#[test]
fn round_bet_ev_matches_formula() {
    let cfg = GameConfig::default();
    let state = RoundState::new(&cfg);
    let stats = enumerate_round(&state, &cfg);

    for (t, &tier) in cfg.round_tiers.iter().enumerate() {
        for piece in cfg.rank_pieces() {
            let i = piece.index();
            let expected = Rational64::from_integer(tier + 1) * stats.first[i]
                + Rational64::from_integer(2) * stats.second[i]
                - Rational64::from_integer(1);
            assert_eq!(stats.round_bet_ev[t][i], expected);
        }
        // The reverse piece has no round bet.
        assert!(stats.round_bet_ev[t][GRAY.index()].is_zero());
    }
}

#[test]
fn enumeration_ignores_board_construction_order() {
    let cfg = GameConfig::default();
    // Same layout as the default start, built explicitly.
    let board = Board::from_stacks(
        6,
        &[
            (1, vec![GREEN, ORANGE, PURPLE]),
            (2, vec![BLUE]),
            (3, vec![RED]),
            (15, vec![GRAY]),
        ],
    )
    .expect("board");
    let from_layout = enumerate_round(&RoundState::new(&cfg), &cfg);
    let from_stacks = enumerate_round(&RoundState::from_board(board, &cfg), &cfg);

    assert_eq!(from_layout.total_worlds, from_stacks.total_worlds);
    assert_eq!(from_layout.first, from_stacks.first);
    assert_eq!(from_layout.second, from_stacks.second);
    assert_eq!(from_layout.expected_position, from_stacks.expected_position);
}
