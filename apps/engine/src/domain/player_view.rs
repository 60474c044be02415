//! Player-visible game state - what information a seat may see.
//!
//! `VisibleGameState` is the interface between the engine and bot
//! players: everything a seat can legitimately observe at its decision
//! point, plus helpers for the legal envelope of each action. `CardFace`
//! is the redaction type used when serializing state for a viewer:
//! another active player's hole cards render as hidden sentinels until
//! showdown.

use serde::{Serialize, Serializer};

use crate::domain::state::{Chips, Phase};
use crate::domain::Card;

/// A card as seen by a particular viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Up(Card),
    Hidden,
}

impl Serialize for CardFace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CardFace::Up(card) => card.serialize(serializer),
            CardFace::Hidden => serializer.serialize_str("XX"),
        }
    }
}

/// Snapshot of the game visible to one seat at its decision point.
///
/// This is the only state bots receive; it never contains another
/// player's hole cards or the deck.
#[derive(Debug, Clone, Serialize)]
pub struct VisibleGameState {
    pub pot: Chips,
    /// Highest bet currently on the table this round.
    pub current_bet: Chips,
    pub player_chips: Chips,
    pub player_bet: Chips,
    pub community_cards: Vec<Card>,
    pub hole_cards: Vec<Card>,
    pub phase: Phase,
    /// Seats still able to win the hand (active or all-in).
    pub players_remaining: usize,
    pub big_blind: Chips,
}

impl VisibleGameState {
    /// Chips owed to match the table bet.
    pub fn call_amount(&self) -> Chips {
        self.current_bet.saturating_sub(self.player_bet)
    }

    pub fn can_check(&self) -> bool {
        self.call_amount() == 0
    }

    /// Smallest legal raise target (total bet for the round).
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet + self.big_blind
    }

    /// Largest reachable target: shoving the whole stack.
    pub fn max_raise_to(&self) -> Chips {
        self.player_bet + self.player_chips
    }

    /// Whether a full (non-all-in) raise is available.
    pub fn can_raise(&self) -> bool {
        self.max_raise_to() >= self.min_raise_to()
    }

    /// Pot odds as pot / call; `None` when there is nothing to call.
    pub fn pot_odds(&self) -> Option<f64> {
        let call = self.call_amount();
        if call == 0 {
            None
        } else {
            Some(self.pot as f64 / call as f64)
        }
    }
}
