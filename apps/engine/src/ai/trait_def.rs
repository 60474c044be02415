//! Bot player trait definition.

use std::fmt;

use crate::domain::state::{ActionKind, Chips};
use crate::domain::VisibleGameState;

/// Errors that can occur during bot decision-making.
///
/// These never reach a human: the coordinator resolves them through the
/// call / all-in / fold fallback chain.
#[derive(Debug)]
pub enum BotError {
    Internal(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

/// A proposed action. `amount` is the raise target total bet and is zero
/// for every other action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotDecision {
    pub action: ActionKind,
    pub amount: Chips,
}

impl BotDecision {
    pub fn fold() -> Self {
        Self {
            action: ActionKind::Fold,
            amount: 0,
        }
    }
    pub fn check() -> Self {
        Self {
            action: ActionKind::Check,
            amount: 0,
        }
    }
    pub fn call() -> Self {
        Self {
            action: ActionKind::Call,
            amount: 0,
        }
    }
    pub fn raise_to(target: Chips) -> Self {
        Self {
            action: ActionKind::Raise,
            amount: target,
        }
    }
    pub fn all_in() -> Self {
        Self {
            action: ActionKind::AllIn,
            amount: 0,
        }
    }
}

/// Trait for bot players.
///
/// Implementations receive the state visible to their seat and must
/// choose an action the engine can apply at face value; the
/// `VisibleGameState` helpers (`can_check`, `min_raise_to`, ...) define
/// the legal envelope.
pub trait BotPlayer: Send + Sync {
    fn decide(&self, state: &VisibleGameState) -> Result<BotDecision, BotError>;
}
