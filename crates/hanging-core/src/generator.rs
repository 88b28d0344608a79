//! Random position generator.
//!
//! Plays a random walk of legal moves from the initial position. The walk
//! keeps its own history so it can step back out of finished games and spot
//! threefold repetitions.

use rand::Rng;
use shakmaty::{Chess, Color, Position};
use tracing::debug;

use crate::board;

/// Fewest plies a walk asks for.
pub const MIN_PLIES: u32 = 20;
/// Extra plies drawn uniformly from `0..=EXTRA_PLIES` on top of [`MIN_PLIES`].
pub const EXTRA_PLIES: u32 = 40;

/// A line of play from the initial position that can be undone move by move.
#[derive(Debug, Clone)]
pub struct Walk {
    /// Current position with its repetition key.
    current: (Chess, String),
    /// Earlier positions, oldest first.
    history: Vec<(Chess, String)>,
}

impl Default for Walk {
    fn default() -> Self {
        Self::new()
    }
}

impl Walk {
    pub fn new() -> Self {
        let start = Chess::default();
        let key = repetition_key(&start);
        Self {
            current: (start, key),
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Chess {
        &self.current.0
    }

    /// Number of plies played and not undone.
    pub fn plies(&self) -> usize {
        self.history.len()
    }

    /// Play one legal move chosen uniformly at random. Returns false when the
    /// side to move has no legal moves.
    pub fn play_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let moves = self.current().legal_moves();
        if moves.is_empty() {
            return false;
        }
        let mv = &moves[rng.gen_range(0..moves.len())];
        self.push(board::apply(self.current(), mv));
        true
    }

    fn push(&mut self, next: Chess) {
        let key = repetition_key(&next);
        let previous = std::mem::replace(&mut self.current, (next, key));
        self.history.push(previous);
    }

    /// Take back the last move. The initial position cannot be undone.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Board-level game over, or the current position seen three times.
    pub fn is_game_over(&self) -> bool {
        board::is_game_over(self.current()) || self.is_threefold_repetition()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let key = &self.current.1;
        1 + self.history.iter().filter(|(_, k)| k == key).count() >= 3
    }

    pub fn into_position(self) -> Chess {
        self.current.0
    }
}

/// Generate a semi-random mid-game position, trying to leave `side_to_move` on move.
///
/// The final side to move is best effort: a walk that ends in a finished game,
/// or with no legal moves, is returned as is.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, side_to_move: Color) -> Chess {
    let target_plies = MIN_PLIES + rng.gen_range(0..=EXTRA_PLIES);
    let mut walk = Walk::new();
    let mut undos = 0u32;

    for _ in 0..target_plies {
        if walk.is_game_over() && walk.undo() {
            undos += 1;
        }
        if !walk.play_random(rng) {
            break;
        }
    }

    if walk.current().turn() != side_to_move && !walk.is_game_over() {
        walk.play_random(rng);
    }

    let turn = walk.current().turn();
    debug!(
        target_plies,
        plies = walk.plies(),
        undos,
        turn = board::color_name(turn),
        "Generated random position"
    );
    if turn != side_to_move {
        debug!(
            requested = board::color_name(side_to_move),
            "Walk ended with the other side to move"
        );
    }

    walk.into_position()
}

/// Placement, turn, castling and en passant: the FEN without move counters.
fn repetition_key(pos: &Chess) -> String {
    board::to_fen(pos)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}
