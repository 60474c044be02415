//! Table and bot configuration supplied by the embedding application.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::state::{Chips, UserId};
use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVisibility {
    Public,
    /// Joinable only by the host and invited users.
    Private,
}

/// Per-game rules fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_players: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Play until one player remains when `None`.
    pub max_hands: Option<u32>,
    pub visibility: GameVisibility,
    pub invited_users: Vec<UserId>,
    /// Fixed starting stack granted to bot seats (humans buy in from
    /// their persisted balance).
    pub bot_stack: Chips,
    /// Pins deck shuffles and bot RNG for reproducible games; `None`
    /// uses OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: 6,
            small_blind: 10,
            big_blind: 20,
            max_hands: None,
            visibility: GameVisibility::Public,
            invited_users: Vec::new(),
            bot_stack: 1000,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("max players must be between {MIN_PLAYERS} and {MAX_PLAYERS}"),
            ));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "blinds must be positive",
            ));
        }
        if self.small_blind >= self.big_blind {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "small blind must be below the big blind",
            ));
        }
        if self.bot_stack == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "bot stack must be positive",
            ));
        }
        if self.max_hands == Some(0) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "hand cap must be at least 1 when set",
            ));
        }
        Ok(())
    }
}

/// Pacing and safety bounds for bot turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotSettings {
    /// UX pause before a bot acts.
    pub think_delay: Duration,
    /// Upper bound on a whole bot turn; past it the turn is abandoned
    /// and logged, never surfaced to players.
    pub decision_timeout: Duration,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            think_delay: Duration::from_millis(1500),
            decision_timeout: Duration::from_secs(5),
        }
    }
}
