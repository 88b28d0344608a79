//! Serializable snapshot of a session for whatever draws the board.

use std::collections::BTreeSet;

use rand::Rng;
use serde::Serialize;
use shakmaty::{Position, Square};

use crate::board;
use crate::clock::Clock;
use crate::modes::{Orientation, TargetColor};
use crate::session::{PuzzleState, Session};
use crate::stats::Stats;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleView {
    pub mode_index: usize,
    pub description: &'static str,
    pub orientation: Orientation,
    pub target: TargetColor,
    pub fen: String,
    pub side_to_move: &'static str,
    pub state: PuzzleState,
    pub message: &'static str,
    /// Withheld until the puzzle has been judged.
    pub answer_key: Option<Vec<String>>,
    pub selection: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub elapsed: f64,
    pub stats: StatsSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub rate: f64,
    pub average_time: f64,
}

impl From<&Stats> for StatsSummary {
    fn from(stats: &Stats) -> Self {
        Self {
            correct: stats.correct_count(),
            incorrect: stats.incorrect_count(),
            total: stats.total(),
            rate: stats.success_rate(),
            average_time: stats.average_time(),
        }
    }
}

/// Square names in name order, which is how the answer key is shown.
fn square_names(squares: &BTreeSet<Square>) -> Vec<String> {
    board::by_name(squares.iter().copied())
        .into_iter()
        .map(|sq| sq.to_string())
        .collect()
}

impl<R: Rng, C: Clock> Session<R, C> {
    /// Snapshot of the current puzzle, or `None` at mode selection.
    pub fn view(&self) -> Option<PuzzleView> {
        let mode_index = self.mode_index()?;
        let mode = self.mode()?;
        let puzzle = self.puzzle()?;
        let state = puzzle.state();

        Some(PuzzleView {
            mode_index,
            description: mode.description,
            orientation: mode.orientation,
            target: mode.target,
            fen: board::to_fen(puzzle.position()),
            side_to_move: board::color_name(puzzle.position().turn()),
            state,
            message: state.message(),
            answer_key: (state != PuzzleState::Playing).then(|| square_names(puzzle.answer_key())),
            selection: square_names(puzzle.selection()),
            missing: square_names(puzzle.missing()),
            extra: square_names(puzzle.extra()),
            elapsed: puzzle.elapsed_secs(),
            stats: self.stats(mode_index).map(StatsSummary::from).unwrap_or_default(),
        })
    }
}
