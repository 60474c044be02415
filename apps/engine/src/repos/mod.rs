//! Storage collaborator seam: domain models plus the `GameStore` trait.
//!
//! The engine never owns a schema; an embedding application provides a
//! `GameStore` (SQL, KV, or the in-memory adapter shipped for tests and
//! single-process use). All mutating engine operations are all-or-nothing:
//! state is loaded, transformed, and written back through one
//! `commit_hand_state` call, so a failed operation leaves the store
//! exactly as it was.

pub mod actions;
pub mod games;
pub mod players;

use async_trait::async_trait;

pub use actions::{ActionRecord, NewAction};
pub use games::{Game, NewGame, WinnerSummary};
pub use players::{BotDifficulty, NewPlayer, Player, SeatControl};

use crate::domain::state::{Chips, GameId, UserId};
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Persisted chip balance a human buys in with.
    async fn user_chips(&self, user_id: UserId) -> Result<Chips, DomainError>;

    async fn create_game(&self, game: NewGame) -> Result<Game, DomainError>;

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, DomainError>;

    async fn find_game_by_room_code(&self, room_code: &str) -> Result<Option<Game>, DomainError>;

    async fn create_player(&self, player: NewPlayer) -> Result<Player, DomainError>;

    /// All seats for a game, ordered by position.
    async fn players_by_game(&self, game_id: GameId) -> Result<Vec<Player>, DomainError>;

    /// Action log slice for one hand, oldest first.
    async fn actions_for_hand(
        &self,
        game_id: GameId,
        hand_no: u32,
    ) -> Result<Vec<ActionRecord>, DomainError>;

    /// Most recent actions for a game, newest first.
    async fn recent_actions(
        &self,
        game_id: GameId,
        limit: usize,
    ) -> Result<Vec<ActionRecord>, DomainError>;

    /// Atomically persist a mutated game, its players, and any newly
    /// appended actions. The store must apply everything or nothing.
    async fn commit_hand_state(
        &self,
        game: Game,
        players: Vec<Player>,
        new_actions: Vec<NewAction>,
    ) -> Result<(), DomainError>;

    /// Find game by ID or return a not-found error.
    async fn require_game(&self, game_id: GameId) -> Result<Game, DomainError> {
        self.find_game(game_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
        })
    }
}
