//! Integration tests: hanging piece detection on hand-picked positions.

mod common;

use std::collections::BTreeSet;

use hanging_core::board::{self, force_turn};
use hanging_core::generator::random_position;
use hanging_core::shakmaty::{Color, Square};
use hanging_core::{find_hanging, TargetColor};

use common::{position, AFTER_EXD5, IN_CHECK_ROOK_HANGS, TWO_HANGING};

#[test]
fn test_exd5_pawn_hangs_to_the_queen() {
    let pos = position(AFTER_EXD5);
    assert_eq!(
        find_hanging(&pos, TargetColor::White),
        BTreeSet::from([Square::D5])
    );
    assert!(find_hanging(&pos, TargetColor::Black).is_empty());
}

#[test]
fn test_exd5_same_answer_with_white_to_move() {
    let pos = position(AFTER_EXD5);
    let white_to_move = force_turn(&pos, Color::White).unwrap();
    assert_eq!(
        find_hanging(&white_to_move, TargetColor::White),
        find_hanging(&pos, TargetColor::White)
    );
}

#[test]
fn test_both_collects_both_colors() {
    let pos = position(TWO_HANGING);
    let both = find_hanging(&pos, TargetColor::Both);
    assert_eq!(both, BTreeSet::from([Square::F4, Square::D5]));
    // Shown in name order: d5 before f4
    assert_eq!(board::by_name(both), vec![Square::D5, Square::F4]);
}

#[test]
fn test_start_position_is_quiet() {
    let pos = position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert!(find_hanging(&pos, TargetColor::Both).is_empty());
}

#[test]
fn test_detection_is_repeatable_on_generated_positions() {
    let mut rng = common::rng();
    for _ in 0..10 {
        let pos = random_position(&mut rng, Color::White);
        let first = find_hanging(&pos, TargetColor::Both);
        assert_eq!(first, find_hanging(&pos, TargetColor::Both));
    }
}

#[test]
fn test_side_in_check_can_still_have_hanging_pieces() {
    // White to move and in check from e8; Bxa1 wins the rook anyway.
    let pos = position(IN_CHECK_ROOK_HANGS);
    assert_eq!(
        find_hanging(&pos, TargetColor::White),
        BTreeSet::from([Square::A1])
    );
    assert!(find_hanging(&pos, TargetColor::Black).is_empty());
}
