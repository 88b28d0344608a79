//! The fixed catalog of puzzle modes.

use serde::Serialize;
use shakmaty::Color;

/// Which color's hanging pieces the player has to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetColor {
    White,
    Black,
    Both,
}

impl TargetColor {
    /// The colors whose pieces are searched, White first.
    pub fn colors(self) -> &'static [Color] {
        match self {
            TargetColor::White => &[Color::White],
            TargetColor::Black => &[Color::Black],
            TargetColor::Both => &[Color::White, Color::Black],
        }
    }
}

/// Which side of the board is drawn at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub side_to_move: Color,
    pub orientation: Orientation,
    pub target: TargetColor,
    pub description: &'static str,
}

pub static MODES: [Mode; 6] = [
    Mode {
        side_to_move: Color::White,
        orientation: Orientation::White,
        target: TargetColor::Black,
        description: "Black (white-view)",
    },
    Mode {
        side_to_move: Color::Black,
        orientation: Orientation::Black,
        target: TargetColor::White,
        description: "White (black-view)",
    },
    Mode {
        side_to_move: Color::Black,
        orientation: Orientation::White,
        target: TargetColor::White,
        description: "White (white-view)",
    },
    Mode {
        side_to_move: Color::White,
        orientation: Orientation::Black,
        target: TargetColor::Black,
        description: "Black (black-view)",
    },
    Mode {
        side_to_move: Color::White,
        orientation: Orientation::White,
        target: TargetColor::Both,
        description: "Both (white-view)",
    },
    Mode {
        side_to_move: Color::Black,
        orientation: Orientation::Black,
        target: TargetColor::Both,
        description: "Both (black-view)",
    },
];

/// Look up a mode by its catalog index.
pub fn mode(index: usize) -> Option<&'static Mode> {
    MODES.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_color_modes_target_the_side_not_to_move() {
        for m in MODES.iter().filter(|m| m.target != TargetColor::Both) {
            assert_eq!(m.target.colors(), &[!m.side_to_move], "{}", m.description);
        }
    }

    #[test]
    fn test_mode_lookup() {
        assert_eq!(mode(4).map(|m| m.target), Some(TargetColor::Both));
        assert!(mode(MODES.len()).is_none());
    }
}
