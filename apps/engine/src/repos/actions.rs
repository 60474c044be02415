//! Append-only action log records.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::state::{ActionKind, Chips, GameId, Phase, PlayerId};

/// One committed betting action. Immutable once written; the per-phase
/// slice of this log is what betting-round completion is reconstructed
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: i64,
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub hand_no: u32,
    pub kind: ActionKind,
    /// Chips paid into the pot by this action.
    pub amount: Chips,
    pub phase: Phase,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Fields supplied when appending to the log.
#[derive(Debug, Clone)]
pub struct NewAction {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub hand_no: u32,
    pub kind: ActionKind,
    pub amount: Chips,
    pub phase: Phase,
}
