//! Hanging piece puzzles.
//!
//! Generates random positions, works out which pieces of a target color are
//! hanging, and runs the find-them-all puzzle loop with per-mode stats.
//! shakmaty provides move generation and board state.

pub use shakmaty;

pub mod board;
pub mod clock;
pub mod detector;
pub mod error;
pub mod generator;
pub mod modes;
pub mod session;
pub mod stats;
pub mod view;

pub use detector::find_hanging;
pub use error::{BoardError, SessionError};
pub use modes::{Mode, Orientation, TargetColor, MODES};
pub use session::{Puzzle, PuzzleState, Session, Verdict};
pub use stats::Stats;
pub use view::PuzzleView;
