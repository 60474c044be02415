//! Game flow orchestration service - bridges pure domain logic with the
//! storage and transport collaborators.
//!
//! Every mutating operation acquires the game's lock from
//! `infra::locks`, loads the game and its seats, transforms them in
//! memory, and persists everything through one atomic
//! `commit_hand_state` call, so a failed operation leaves the store
//! untouched. Notifications go out only after a successful commit, and
//! bot turns are scheduled as deferred tasks that re-validate on wake.

pub mod ai_coordinator;
pub mod player_actions;
pub mod round_lifecycle;
pub mod seats;
pub mod snapshots;

use std::sync::Arc;

use crate::config::BotSettings;
use crate::domain::state::{GameId, Seat};
use crate::errors::domain::DomainError;
use crate::infra::GameLockRegistry;
use crate::notify::GameNotifier;
use crate::repos::{Game, GameStore, Player};

pub use seats::BotRequest;
pub use snapshots::{ActionView, AdminSnapshot, GameSnapshot, PlayerSnapshot};

#[derive(Clone)]
pub struct GameFlowService {
    store: Arc<dyn GameStore>,
    notifier: Arc<dyn GameNotifier>,
    locks: Arc<GameLockRegistry>,
    bot_settings: BotSettings,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn GameStore>, notifier: Arc<dyn GameNotifier>) -> Self {
        Self {
            store,
            notifier,
            locks: Arc::new(GameLockRegistry::new()),
            bot_settings: BotSettings::default(),
        }
    }

    pub fn with_bot_settings(mut self, bot_settings: BotSettings) -> Self {
        self.bot_settings = bot_settings;
        self
    }

    pub(crate) fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn GameNotifier> {
        &self.notifier
    }

    pub(crate) fn locks(&self) -> &Arc<GameLockRegistry> {
        &self.locks
    }

    pub(crate) fn bot_settings(&self) -> BotSettings {
        self.bot_settings
    }

    /// Load a game and its seats (ordered by position).
    pub(crate) async fn load(&self, game_id: GameId) -> Result<(Game, Vec<Player>), DomainError> {
        let game = self.store.require_game(game_id).await?;
        let players = self.store.players_by_game(game_id).await?;
        Ok((game, players))
    }

    pub(crate) fn player_at_seat(players: &[Player], seat: Seat) -> Option<&Player> {
        players.iter().find(|p| p.seat == seat)
    }
}
