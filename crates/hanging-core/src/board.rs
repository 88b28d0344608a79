//! Board adapter over shakmaty.
//!
//! Positions are plain `shakmaty::Chess` values. Everything here takes a
//! position by reference and hands back a new value, so a position that has
//! been shown to the player is never changed underneath it.

use std::collections::BTreeMap;

use shakmaty::fen::Fen;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, FromSetup, Move, MoveList, Piece, Position,
    PositionError, Rank, Role, Square,
};

use crate::error::BoardError;

/// Half-move clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Parse a FEN string into a position.
pub fn parse_fen(text: &str) -> Result<Chess, BoardError> {
    let fen: Fen = text.trim().parse()?;
    fen.into_position::<Chess>(CastlingMode::Standard)
        .map_err(|e| BoardError::IllegalPosition(e.to_string()))
}

/// Serialize a position to FEN. Two positions are interchangeable iff this matches.
pub fn to_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Parse an algebraic square name like `e4` (case-insensitive).
pub fn parse_square(text: &str) -> Result<Square, BoardError> {
    text.trim()
        .to_ascii_lowercase()
        .parse::<Square>()
        .map_err(|_| BoardError::InvalidSquare(text.trim().to_string()))
}

/// Squares ordered by name (a1, a2, ..., a8, b1, ...), file first then rank.
pub fn by_name<I: IntoIterator<Item = Square>>(squares: I) -> Vec<Square> {
    let mut ordered: Vec<Square> = squares.into_iter().collect();
    ordered.sort_by_key(|sq| (sq.file(), sq.rank()));
    ordered
}

/// Every occupied square with the piece standing on it.
pub fn occupancy(pos: &Chess) -> BTreeMap<Square, Piece> {
    let board = pos.board();
    board
        .occupied()
        .into_iter()
        .filter_map(|sq| board.piece_at(sq).map(|piece| (sq, piece)))
        .collect()
}

/// Re-state `pos` with `color` to move. Board, castling rights and clocks are
/// carried over; an en passant target that belongs to the other side is dropped.
///
/// Fails when the side that would no longer be to move is in check, since
/// such a position cannot be represented.
pub fn force_turn(pos: &Chess, color: Color) -> Result<Chess, BoardError> {
    if pos.turn() == color {
        return Ok(pos.clone());
    }

    let mut setup = pos.to_setup(EnPassantMode::Legal);
    setup.turn = color;

    from_forced_setup(setup).map_err(|_| BoardError::CannotForceTurn(color))
}

/// Positions after `color` captures on `square`, one per capturing piece (and
/// promotion choice), with the other side to move.
///
/// Works from the board alone, so `color` does not have to be able to move in
/// `pos`. Captures that would leave `color`'s own king attacked are left out.
pub fn captures_onto(pos: &Chess, color: Color, square: Square) -> Vec<Chess> {
    let board = pos.board();
    let last_rank = color.fold_wb(Rank::Eighth, Rank::First);
    let mut results = Vec::new();

    for from in board.attacks_to(square, color, board.occupied()) {
        let Some(piece) = board.piece_at(from) else {
            continue;
        };
        let roles: &[Role] = if piece.role == Role::Pawn && square.rank() == last_rank {
            &[Role::Queen, Role::Rook, Role::Bishop, Role::Knight]
        } else {
            std::slice::from_ref(&piece.role)
        };

        for &role in roles {
            let mut setup = pos.to_setup(EnPassantMode::Legal);
            setup.board.discard_piece_at(from);
            setup.board.set_piece_at(square, Piece { color, role });

            let exposed = setup.board.king_of(color).is_some_and(|king| {
                setup
                    .board
                    .attacks_to(king, !color, setup.board.occupied())
                    .any()
            });
            if exposed {
                continue;
            }

            setup.turn = !color;
            setup.ep_square = None;
            setup.halfmoves = 0;
            if let Ok(after) = from_forced_setup(setup) {
                results.push(after);
            }
        }
    }
    results
}

/// A hand-built setup may carry an ep square or castling right that no longer
/// applies, or a check shakmaty deems unreachable in a real game.
fn from_forced_setup(setup: shakmaty::Setup) -> Result<Chess, PositionError<Chess>> {
    Chess::from_setup(setup, CastlingMode::Standard)
        .or_else(PositionError::ignore_invalid_ep_square)
        .or_else(PositionError::ignore_invalid_castling_rights)
        .or_else(PositionError::ignore_impossible_check)
}

/// Legal moves for `color`, regardless of whose turn `pos` records.
pub fn legal_moves_for(pos: &Chess, color: Color) -> Result<MoveList, BoardError> {
    Ok(force_turn(pos, color)?.legal_moves())
}

/// Does `mv` land on `square`? Castling never does: shakmaty encodes it as
/// king-takes-own-rook, which is not a move onto the rook's square.
pub fn lands_on(mv: &Move, square: Square) -> bool {
    !mv.is_castle() && mv.to() == square
}

/// Play a legal move, returning the resulting position.
pub fn apply(pos: &Chess, mv: &Move) -> Chess {
    let mut next = pos.clone();
    next.play_unchecked(*mv);
    next
}

/// Checkmate, stalemate, insufficient material or the fifty-move rule.
///
/// Threefold repetition needs the game history and is tracked by
/// [`crate::generator::Walk`].
pub fn is_game_over(pos: &Chess) -> bool {
    pos.is_checkmate()
        || pos.is_stalemate()
        || pos.is_insufficient_material()
        || pos.halfmoves() >= FIFTY_MOVE_HALFMOVES
}

/// Lowercase color name, as used in FEN-adjacent text and the puzzle view.
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}
