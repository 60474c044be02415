//! Per-game action serialization.
//!
//! Every mutating operation on a game holds that game's async mutex for
//! the whole validate-and-apply span, so two actions against the same
//! game can never interleave their read-modify-write of pot, turn, and
//! stack state. Different games proceed fully in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::state::GameId;

#[derive(Debug, Default)]
pub struct GameLockRegistry {
    locks: DashMap<GameId, Arc<Mutex<()>>>,
}

impl GameLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// The mutex guarding a game, created on first use.
    pub fn lock_for(&self, game_id: GameId) -> Arc<Mutex<()>> {
        self.locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
