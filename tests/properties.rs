//! Property-based tests for hanging piece detection over random walks.

use std::collections::BTreeSet;

use hanging_core::board::{force_turn, to_fen};
use hanging_core::detector::hanging_squares;
use hanging_core::generator::random_position;
use hanging_core::shakmaty::{Color, Position};
use hanging_core::{find_hanging, TargetColor};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn side_strategy() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::White), Just(Color::Black)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: the same seed walks to the same position with the same answer
    #[test]
    fn prop_generation_is_deterministic(seed in seed_strategy(), side in side_strategy()) {
        let a = random_position(&mut StdRng::seed_from_u64(seed), side);
        let b = random_position(&mut StdRng::seed_from_u64(seed), side);
        prop_assert_eq!(to_fen(&a), to_fen(&b));
        prop_assert_eq!(
            find_hanging(&a, TargetColor::Both),
            find_hanging(&b, TargetColor::Both)
        );
    }

    /// Property: Both is the union of the two single-color answers
    #[test]
    fn prop_both_is_union(seed in seed_strategy(), side in side_strategy()) {
        let pos = random_position(&mut StdRng::seed_from_u64(seed), side);
        let union: BTreeSet<_> = find_hanging(&pos, TargetColor::White)
            .union(&find_hanging(&pos, TargetColor::Black))
            .copied()
            .collect();
        prop_assert_eq!(find_hanging(&pos, TargetColor::Both), union);
    }

    /// Property: flipping the side to move does not change the answer when
    /// neither king is in check
    #[test]
    fn prop_side_to_move_does_not_matter(seed in seed_strategy(), side in side_strategy()) {
        let pos = random_position(&mut StdRng::seed_from_u64(seed), side);
        prop_assume!(!pos.is_check());
        let Ok(flipped) = force_turn(&pos, !pos.turn()) else {
            return Ok(());
        };
        prop_assume!(!flipped.is_check());
        for color in [Color::White, Color::Black] {
            prop_assert_eq!(hanging_squares(&pos, color), hanging_squares(&flipped, color));
        }
    }

    /// Property: every answer square holds a piece of the target color
    #[test]
    fn prop_answers_are_target_pieces(seed in seed_strategy(), side in side_strategy()) {
        let pos = random_position(&mut StdRng::seed_from_u64(seed), side);
        for color in [Color::White, Color::Black] {
            for sq in hanging_squares(&pos, color) {
                let piece = pos.board().piece_at(sq);
                prop_assert_eq!(piece.map(|p| p.color), Some(color));
            }
        }
    }
}
