use serde::{Deserialize, Serialize};

pub type GameId = i64;
pub type PlayerId = i64;
pub type UserId = i64;
/// Seat position at the table, 0-indexed, fixed for a game's lifetime.
pub type Seat = u8;
/// Chip amounts. Always non-negative; arithmetic that could underflow is
/// checked and surfaced as an integrity error.
pub type Chips = u32;

/// Overall session lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created, seats filling, not yet dealt.
    Waiting,
    /// Hands in progress.
    Playing,
    /// Session over: one player left with chips, or the hand cap hit.
    Finished,
}

/// Phase of the current hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No hand dealt yet.
    Waiting,
    /// Hole cards dealt, blinds posted, first betting round.
    Preflop,
    /// Three community cards.
    Flop,
    /// Fourth community card.
    Turn,
    /// Fifth community card, last betting round.
    River,
    /// Hands revealed, pots awarded.
    Showdown,
}

impl Phase {
    /// Number of community cards this phase requires on the board.
    pub fn community_card_count(self) -> usize {
        match self {
            Phase::Waiting | Phase::Preflop => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River | Phase::Showdown => 5,
        }
    }

    /// The betting phase that follows this one, if any.
    pub fn next_street(self) -> Option<Phase> {
        match self {
            Phase::Preflop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            Phase::River => Some(Phase::Showdown),
            Phase::Waiting | Phase::Showdown => None,
        }
    }

    /// Cards to deal when entering this phase (3 for the flop, then 1 each).
    pub fn cards_to_deal(self) -> usize {
        match self {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            _ => 0,
        }
    }
}

/// Per-hand player status. Exactly one of Active/Folded/AllIn during a
/// hand for non-out players; Out is terminal within the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    Out,
}

/// The five betting actions a seat can take.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// Seat `delta` steps clockwise from `seat` at a table of `seat_count`.
#[inline]
pub fn seat_offset(seat: Seat, delta: u8, seat_count: usize) -> Seat {
    debug_assert!(seat_count > 0);
    ((seat as usize + delta as usize) % seat_count) as Seat
}

/// Next seat clockwise.
#[inline]
pub fn next_seat(seat: Seat, seat_count: usize) -> Seat {
    seat_offset(seat, 1, seat_count)
}
