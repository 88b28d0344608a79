//! Hanging piece detection.
//!
//! A piece is hanging when the opponent can capture it with at least one move
//! that leaves its owner no way to recapture on the same square. Both halves of
//! that test are answered with forced-move enumeration, so the result does not
//! depend on whose turn the position records. When the owner is to move and
//! in check the opponent cannot be put on move, and its captures are played
//! straight off the board.

use std::collections::BTreeSet;

use shakmaty::{Chess, Color, Position, Role, Square};
use tracing::trace;

use crate::board;
use crate::modes::TargetColor;

/// Squares holding a hanging piece of any color selected by `target`,
/// in ascending square order.
pub fn find_hanging(pos: &Chess, target: TargetColor) -> BTreeSet<Square> {
    target
        .colors()
        .iter()
        .flat_map(|&color| hanging_squares(pos, color))
        .collect()
}

/// Squares holding a hanging piece of `color`.
pub fn hanging_squares(pos: &Chess, color: Color) -> BTreeSet<Square> {
    pos.board()
        .by_color(color)
        .into_iter()
        .filter(|&sq| is_hanging(pos, sq))
        .collect()
}

/// Is the piece on `square` hanging? Empty squares and kings never are.
pub fn is_hanging(pos: &Chess, square: Square) -> bool {
    let Some(piece) = pos.board().piece_at(square) else {
        return false;
    };
    if piece.role == Role::King {
        return false;
    }
    let defender = piece.color;
    let attacker = !defender;

    captures(pos, attacker, square)
        .iter()
        .any(|after| !can_reach(after, defender, square))
}

/// Every position `color` can reach by capturing on `square`.
fn captures(pos: &Chess, color: Color, square: Square) -> Vec<Chess> {
    match board::force_turn(pos, color) {
        Ok(attacking) => attacking
            .legal_moves()
            .iter()
            .filter(|mv| board::lands_on(mv, square))
            .map(|capture| board::apply(&attacking, capture))
            .collect(),
        // The other side is to move and in check, so `color` cannot be put
        // on move. Play the captures straight off the board instead.
        Err(e) => {
            trace!(%square, error = %e, "Capturing from the board");
            board::captures_onto(pos, color, square)
        }
    }
}

/// Can `color` move a piece onto `square`?
pub fn can_reach(pos: &Chess, color: Color, square: Square) -> bool {
    match board::legal_moves_for(pos, color) {
        Ok(moves) => moves.iter().any(|mv| board::lands_on(mv, square)),
        Err(_) => false,
    }
}
