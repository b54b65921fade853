//! Fixed game constants and small rule helpers.

pub const DECKS: usize = 2;
pub const PRINTED_JOKERS_PER_DECK: usize = 2;
/// 2 × 52 standard cards + 4 printed jokers.
pub const UNIVERSE_SIZE: usize = DECKS * (52 + PRINTED_JOKERS_PER_DECK);

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Cards dealt to each seat.
pub const HAND_SIZE: usize = 13;
/// Hand size after drawing, which is what a declare must cover.
pub const DECLARE_SIZE: usize = HAND_SIZE + 1;

pub const MIN_MELD_SIZE: usize = 3;
pub const MAX_SET_SIZE: usize = 4;

/// Cap applied to every penalty computation.
pub const PENALTY_CAP: u32 = 80;
/// Charged to losers who never submit during the loser-declare window.
pub const NON_COOPERATION_PENALTY: u32 = 80;
/// Charged to a player whose reconnection grace expires.
pub const DEPARTURE_PENALTY: u32 = 80;
/// Cumulative score at which a player is out of the match.
pub const ELIMINATION_SCORE: u32 = 101;

pub fn crosses_elimination(score: u32) -> bool {
    score >= ELIMINATION_SCORE
}

/// Turn-order position that opens round `round_no` (1-based).
///
/// Round 1 → position 0, round 2 → position 1, wrapping over the turn order.
pub fn opening_position(round_no: u32, order_len: usize) -> usize {
    debug_assert!(round_no >= 1, "round_no is 1-based and must be >= 1");
    if order_len == 0 {
        return 0;
    }
    (round_no.saturating_sub(1) as usize) % order_len
}
