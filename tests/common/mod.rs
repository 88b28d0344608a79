#![allow(dead_code)]

use hanging_core::board::parse_fen;
use hanging_core::clock::ManualClock;
use hanging_core::shakmaty::Chess;
use hanging_core::Session;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// After 1.e4 d5 2.exd5: the pawn on d5 can be taken by the queen and
/// nothing of White's reaches d5.
pub const AFTER_EXD5: &str = "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2";

/// Black knight d5 hangs to Bf3, White rook f4 hangs to the knight.
pub const TWO_HANGING: &str = "4k3/8/8/3n4/5R2/5B2/8/4K3 w - - 0 1";

/// White to move and in check from the e8 rook. The b2 bishop takes the a1
/// rook and nothing of White's reaches a1.
pub const IN_CHECK_ROOK_HANGS: &str = "4r2k/8/8/8/8/8/1b6/R3K3 w - - 0 1";

pub const SEED: u64 = 0x5eed;

pub fn position(fen: &str) -> Chess {
    parse_fen(fen).unwrap_or_else(|e| panic!("bad fixture {fen}: {e}"))
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// Session on a seeded rng plus a handle to its clock.
pub fn session() -> (Session<StdRng, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (Session::new(rng(), clock.clone()), clock)
}
