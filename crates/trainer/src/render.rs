//! Plain-text drawing of the menu and the puzzle board.

use std::fmt::Write;

use hanging_core::board;
use hanging_core::shakmaty::{File, Rank, Square};
use hanging_core::{Orientation, PuzzleState, PuzzleView, MODES};

pub fn menu() -> String {
    let mut out = String::from("Find Hanging Pieces of:\n");
    for (index, mode) in MODES.iter().enumerate() {
        let _ = writeln!(out, "  {index}) {}", mode.description);
    }
    out.push_str("Enter a mode number, or 'quit'.\n");
    out
}

/// Square ordering for drawing: top-left first, as the player sees it.
fn display_squares(orientation: Orientation) -> Vec<Vec<Square>> {
    let mut rows: Vec<Vec<Square>> = (0..8u32)
        .rev()
        .map(|rank| {
            (0..8u32)
                .map(|file| Square::from_coords(File::new(file), Rank::new(rank)))
                .collect()
        })
        .collect();
    if orientation == Orientation::Black {
        rows.reverse();
        for row in &mut rows {
            row.reverse();
        }
    }
    rows
}

fn contains(names: &[String], sq: Square) -> bool {
    let name = sq.to_string();
    names.iter().any(|n| *n == name)
}

/// Board plus status lines. Picked squares are drawn as `(x)`, missed answers
/// (red) as `!x!` and wrong picks (orange) as `?x?`.
pub fn puzzle(view: &PuzzleView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Find Hanging Pieces of {}", view.description);

    let occupancy = board::parse_fen(&view.fen)
        .map(|pos| board::occupancy(&pos))
        .unwrap_or_default();

    let rows = display_squares(view.orientation);
    for row in &rows {
        let _ = write!(out, "{} ", row[0].rank().char());
        for &sq in row {
            let piece = occupancy.get(&sq).map(|p| p.char()).unwrap_or('.');
            let cell = if contains(&view.missing, sq) {
                format!("!{piece}!")
            } else if contains(&view.extra, sq) {
                format!("?{piece}?")
            } else if contains(&view.selection, sq) {
                format!("({piece})")
            } else {
                format!(" {piece} ")
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for sq in &rows[0] {
        let _ = write!(out, " {} ", sq.file().char());
    }
    out.push('\n');

    let stats = &view.stats;
    let _ = writeln!(
        out,
        "Time: {:.1}s  Avg: {:.1}s  Correct: {}/{} ({:.1}%)",
        view.elapsed, stats.average_time, stats.correct, stats.total, stats.rate
    );
    let _ = writeln!(out, "{}", view.message);

    let hint = match view.state {
        PuzzleState::Playing => "Type squares to toggle (e.g. e4), 'ok' to check, 'back' for the menu.",
        PuzzleState::CheckResult | PuzzleState::Done => "'c' to continue, 'back' for the menu.",
    };
    let _ = writeln!(out, "{hint}");
    out
}
