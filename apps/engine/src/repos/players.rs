//! Seat/player domain model.

use serde::{Deserialize, Serialize};

use crate::domain::betting::SeatView;
use crate::domain::state::{Chips, GameId, PlayerId, PlayerStatus, Seat, UserId};
use crate::domain::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

/// Who drives a seat: a human user, or a bot of a given tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeatControl {
    Human { user_id: UserId },
    Bot { difficulty: BotDifficulty, name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub game_id: GameId,
    /// 0-indexed position, fixed for the game's lifetime.
    pub seat: Seat,
    pub control: SeatControl,
    pub chips: Chips,
    /// Bet in the current betting round; resets each street.
    pub current_bet: Chips,
    /// Total chips committed this hand; the side-pot input.
    pub committed: Chips,
    pub hole_cards: Vec<Card>,
    pub status: PlayerStatus,
    /// Hand rank shown after the last showdown, cleared on the next deal.
    pub hand_label: Option<String>,
    pub hand_description: Option<String>,
}

impl Player {
    pub fn is_bot(&self) -> bool {
        matches!(self.control, SeatControl::Bot { .. })
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self.control {
            SeatControl::Human { user_id } => Some(user_id),
            SeatControl::Bot { .. } => None,
        }
    }

    pub fn bot_difficulty(&self) -> Option<BotDifficulty> {
        match self.control {
            SeatControl::Bot { difficulty, .. } => Some(difficulty),
            SeatControl::Human { .. } => None,
        }
    }

    pub fn display_name(&self) -> String {
        match &self.control {
            SeatControl::Human { user_id } => format!("player-{user_id}"),
            SeatControl::Bot { name, .. } => name.clone(),
        }
    }

    /// The slice of this player the betting rules operate on.
    pub fn seat_view(&self) -> SeatView {
        SeatView {
            seat: self.seat,
            status: self.status,
            chips: self.chips,
            current_bet: self.current_bet,
        }
    }

    /// Still holds cards that can win the pot.
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Reset per-hand fields when a new hand is dealt. Out seats stay out.
    pub fn reset_for_new_hand(&mut self) {
        self.current_bet = 0;
        self.committed = 0;
        self.hole_cards.clear();
        self.hand_label = None;
        self.hand_description = None;
        if self.status != PlayerStatus::Out {
            self.status = PlayerStatus::Active;
        }
    }
}

/// Fields supplied when seating a player.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub game_id: GameId,
    pub seat: Seat,
    pub control: SeatControl,
    pub chips: Chips,
}
