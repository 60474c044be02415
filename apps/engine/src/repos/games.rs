//! Game domain model as loaded from and committed to the store.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::GameConfig;
use crate::domain::state::{Chips, GameId, GameStatus, Phase, PlayerId, Seat, UserId};
use crate::domain::{Card, Deck};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Outcome of a showdown, persisted for UI display until the next hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerSummary {
    pub player_id: PlayerId,
    pub amount: Chips,
    pub hand_rank: String,
    pub description: String,
}

/// Aggregate root for one table session.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub room_code: String,
    pub host_id: UserId,
    pub config: GameConfig,
    pub status: GameStatus,
    pub phase: Phase,
    pub pot: Chips,
    pub community_cards: Vec<Card>,
    pub deck: Deck,
    pub dealer_seat: Seat,
    pub current_turn: Option<PlayerId>,
    /// 1-based hand counter; 0 before the first deal.
    pub hand_no: u32,
    /// Set when a hand resolves; replaced when the next one does. Kept
    /// across the next deal so the result of hand N stays visible while
    /// hand N+1 is underway.
    pub winners: Vec<WinnerSummary>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Game {
    pub fn require_turn(&self) -> Result<PlayerId, DomainError> {
        self.current_turn.ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("game {} has no current-turn player while awaiting action", self.id),
            )
        })
    }
}

/// Fields the caller supplies when allocating a game row.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub room_code: String,
    pub host_id: UserId,
    pub config: GameConfig,
    pub deck: Deck,
}
