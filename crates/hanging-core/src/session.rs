//! Puzzle session: one puzzle at a time plus stats for every mode played.
//!
//! A puzzle starts in `Playing`. Submitting judges the selection against the
//! answer key and moves to `Done` (exact match) or `CheckResult`. From either
//! of those the only way forward is [`Session::next_puzzle`], which throws the
//! old puzzle away and generates a new one for the same mode. Actions that do
//! not fit the current state are ignored.

use std::collections::BTreeSet;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;
use shakmaty::{Chess, Square};
use tracing::{debug, info, warn};

use crate::clock::{seconds_between, Clock, SystemClock};
use crate::detector;
use crate::error::SessionError;
use crate::generator;
use crate::modes::{self, Mode};
use crate::stats::{Stats, StatsTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PuzzleState {
    Playing,
    CheckResult,
    Done,
}

impl PuzzleState {
    /// Status line shown to the player.
    pub fn message(self) -> &'static str {
        match self {
            PuzzleState::Playing => "Pick squares and press OK.",
            PuzzleState::CheckResult => {
                "Incorrect! Red = Missing, Orange = Extra. Press Continue."
            }
            PuzzleState::Done => "Perfect! Press Continue for the next puzzle.",
        }
    }
}

/// One generated position with its answer key and the player's progress.
#[derive(Debug, Clone)]
pub struct Puzzle {
    position: Chess,
    answer_key: BTreeSet<Square>,
    selection: BTreeSet<Square>,
    missing: BTreeSet<Square>,
    extra: BTreeSet<Square>,
    state: PuzzleState,
    started_at: Instant,
    elapsed_secs: f64,
}

impl Puzzle {
    fn new(position: Chess, answer_key: BTreeSet<Square>, started_at: Instant) -> Self {
        Self {
            position,
            answer_key,
            selection: BTreeSet::new(),
            missing: BTreeSet::new(),
            extra: BTreeSet::new(),
            state: PuzzleState::Playing,
            started_at,
            elapsed_secs: 0.0,
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn answer_key(&self) -> &BTreeSet<Square> {
        &self.answer_key
    }

    pub fn selection(&self) -> &BTreeSet<Square> {
        &self.selection
    }

    /// Answer squares the player did not pick. Empty until judged.
    pub fn missing(&self) -> &BTreeSet<Square> {
        &self.missing
    }

    /// Picked squares that are not in the answer key. Empty until judged.
    pub fn extra(&self) -> &BTreeSet<Square> {
        &self.extra
    }

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    /// Seconds on the clock as of the last tick or submit.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

/// Outcome of a submit.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub missing: BTreeSet<Square>,
    pub extra: BTreeSet<Square>,
    pub elapsed_secs: f64,
}

#[derive(Debug)]
struct Current {
    mode_index: usize,
    puzzle: Puzzle,
}

pub struct Session<R, C = SystemClock> {
    rng: R,
    clock: C,
    max_attempts: Option<u32>,
    stats: StatsTable,
    current: Option<Current>,
}

impl<R: Rng, C: Clock> Session<R, C> {
    /// A session sitting at mode selection, with no puzzle yet.
    pub fn new(rng: R, clock: C) -> Self {
        Self {
            rng,
            clock,
            max_attempts: None,
            stats: StatsTable::new(),
            current: None,
        }
    }

    /// Give up after `max` positions without a hanging piece instead of
    /// retrying forever.
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = Some(max.max(1));
        self
    }

    /// Switch to a mode and start a fresh puzzle for it. Stats for every mode
    /// are kept.
    pub fn select_mode(&mut self, mode_index: usize) -> Result<(), SessionError> {
        let puzzle = self.generate(mode_index)?;
        self.begin(mode_index, puzzle);
        Ok(())
    }

    /// Start a puzzle on a given position instead of a generated one.
    pub fn start_with_position(
        &mut self,
        mode_index: usize,
        position: Chess,
    ) -> Result<(), SessionError> {
        let mode = lookup(mode_index)?;
        let answer_key = detector::find_hanging(&position, mode.target);
        if answer_key.is_empty() {
            return Err(SessionError::NoHangingPieces);
        }
        let puzzle = Puzzle::new(position, answer_key, self.clock.now());
        self.begin(mode_index, puzzle);
        Ok(())
    }

    /// Back to mode selection. The current puzzle is dropped; stats stay.
    pub fn leave(&mut self) {
        if let Some(current) = self.current.take() {
            debug!(mode_index = current.mode_index, "Left puzzle");
        }
    }

    /// Add `square` to the selection, or remove it if already picked.
    /// Returns false when no puzzle is being played.
    pub fn toggle(&mut self, square: Square) -> bool {
        let Some(puzzle) = self.playing_mut() else {
            return false;
        };
        if !puzzle.selection.remove(&square) {
            puzzle.selection.insert(square);
        }
        true
    }

    /// Judge the selection. Ignored (returns `None`) outside `Playing`.
    pub fn submit(&mut self) -> Option<Verdict> {
        let now = self.clock.now();
        let current = self.current.as_mut()?;
        let puzzle = &mut current.puzzle;
        if puzzle.state != PuzzleState::Playing {
            return None;
        }

        puzzle.elapsed_secs = seconds_between(puzzle.started_at, now);
        puzzle.missing = puzzle
            .answer_key
            .difference(&puzzle.selection)
            .copied()
            .collect();
        puzzle.extra = puzzle
            .selection
            .difference(&puzzle.answer_key)
            .copied()
            .collect();

        let correct = puzzle.missing.is_empty() && puzzle.extra.is_empty();
        let stats = self.stats.entry(current.mode_index);
        if correct {
            stats.record_correct(puzzle.elapsed_secs);
            puzzle.state = PuzzleState::Done;
        } else {
            stats.record_incorrect();
            puzzle.state = PuzzleState::CheckResult;
        }

        info!(
            mode_index = current.mode_index,
            correct,
            missing = puzzle.missing.len(),
            extra = puzzle.extra.len(),
            elapsed = puzzle.elapsed_secs,
            "Puzzle judged"
        );

        Some(Verdict {
            correct,
            missing: puzzle.missing.clone(),
            extra: puzzle.extra.clone(),
            elapsed_secs: puzzle.elapsed_secs,
        })
    }

    /// Replace a judged puzzle with a new one for the same mode. Returns
    /// `Ok(false)` while the current puzzle is still being played.
    pub fn next_puzzle(&mut self) -> Result<bool, SessionError> {
        let mode_index = match &self.current {
            Some(current) if current.puzzle.state != PuzzleState::Playing => current.mode_index,
            _ => return Ok(false),
        };
        self.select_mode(mode_index)?;
        Ok(true)
    }

    /// Refresh the elapsed time. Only a puzzle in `Playing` has a running clock.
    pub fn tick(&mut self) -> Option<f64> {
        let now = self.clock.now();
        let puzzle = self.playing_mut()?;
        puzzle.elapsed_secs = seconds_between(puzzle.started_at, now);
        Some(puzzle.elapsed_secs)
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.current.as_ref().map(|c| &c.puzzle)
    }

    pub fn mode_index(&self) -> Option<usize> {
        self.current.as_ref().map(|c| c.mode_index)
    }

    pub fn mode(&self) -> Option<&'static Mode> {
        self.mode_index().and_then(modes::mode)
    }

    pub fn state(&self) -> Option<PuzzleState> {
        self.puzzle().map(Puzzle::state)
    }

    pub fn is_playing(&self) -> bool {
        self.state() == Some(PuzzleState::Playing)
    }

    pub fn stats(&self, mode_index: usize) -> Option<&Stats> {
        self.stats.get(mode_index)
    }

    pub fn stats_table(&self) -> &StatsTable {
        &self.stats
    }

    fn begin(&mut self, mode_index: usize, puzzle: Puzzle) {
        self.stats.entry(mode_index);
        self.current = Some(Current { mode_index, puzzle });
    }

    fn playing_mut(&mut self) -> Option<&mut Puzzle> {
        self.current
            .as_mut()
            .map(|c| &mut c.puzzle)
            .filter(|p| p.state == PuzzleState::Playing)
    }

    /// Generate positions until one has at least one hanging piece.
    fn generate(&mut self, mode_index: usize) -> Result<Puzzle, SessionError> {
        let mode = lookup(mode_index)?;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let position = generator::random_position(&mut self.rng, mode.side_to_move);
            let answer_key = detector::find_hanging(&position, mode.target);

            if !answer_key.is_empty() {
                debug!(
                    mode_index,
                    attempts,
                    hanging = answer_key.len(),
                    "Puzzle ready"
                );
                return Ok(Puzzle::new(position, answer_key, self.clock.now()));
            }

            if self.max_attempts.is_some_and(|max| attempts >= max) {
                warn!(mode_index, attempts, "No puzzle with a hanging piece found");
                return Err(SessionError::GenerationExhausted(attempts));
            }
            debug!(mode_index, attempts, "No hanging pieces, regenerating");
        }
    }
}

fn lookup(mode_index: usize) -> Result<&'static Mode, SessionError> {
    modes::mode(mode_index).ok_or(SessionError::UnknownMode(mode_index))
}
