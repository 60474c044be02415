//! In-memory `GameStore` for tests and single-process deployments.
//!
//! Rows live in plain maps behind one `RwLock`, so `commit_hand_state`
//! is trivially atomic: the write lock covers the whole multi-row
//! mutation. Per-game action serialization is the service layer's job
//! (see `infra::locks`); this adapter only guarantees storage atomicity.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::domain::state::{Chips, GameId, UserId};
use crate::domain::{GameStatus, Phase};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{ActionRecord, Game, GameStore, NewAction, NewGame, NewPlayer, Player};

#[derive(Default)]
struct Rows {
    games: HashMap<GameId, Game>,
    players: HashMap<GameId, Vec<Player>>,
    actions: HashMap<GameId, Vec<ActionRecord>>,
    user_chips: HashMap<UserId, Chips>,
}

#[derive(Default)]
pub struct InMemoryStore {
    rows: RwLock<Rows>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows::default()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seed a user's chip balance (the users table is owned by the
    /// embedding application; this stands in for it).
    pub fn seed_user(&self, user_id: UserId, chips: Chips) {
        self.rows.write().user_chips.insert(user_id, chips);
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn user_chips(&self, user_id: UserId) -> Result<Chips, DomainError> {
        self.rows
            .read()
            .user_chips
            .get(&user_id)
            .copied()
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::User, format!("user {user_id} not found"))
            })
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, DomainError> {
        let now = OffsetDateTime::now_utc();
        let row = Game {
            id: self.allocate_id(),
            room_code: game.room_code,
            host_id: game.host_id,
            config: game.config,
            status: GameStatus::Waiting,
            phase: Phase::Waiting,
            pot: 0,
            community_cards: Vec::new(),
            deck: game.deck,
            dealer_seat: 0,
            current_turn: None,
            hand_no: 0,
            winners: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let mut rows = self.rows.write();
        rows.games.insert(row.id, row.clone());
        rows.players.entry(row.id).or_default();
        rows.actions.entry(row.id).or_default();
        Ok(row)
    }

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.rows.read().games.get(&game_id).cloned())
    }

    async fn find_game_by_room_code(&self, room_code: &str) -> Result<Option<Game>, DomainError> {
        Ok(self
            .rows
            .read()
            .games
            .values()
            .find(|g| g.room_code == room_code)
            .cloned())
    }

    async fn create_player(&self, player: NewPlayer) -> Result<Player, DomainError> {
        let row = Player {
            id: self.allocate_id(),
            game_id: player.game_id,
            seat: player.seat,
            control: player.control,
            chips: player.chips,
            current_bet: 0,
            committed: 0,
            hole_cards: Vec::new(),
            status: crate::domain::PlayerStatus::Active,
            hand_label: None,
            hand_description: None,
        };
        let mut rows = self.rows.write();
        if !rows.games.contains_key(&player.game_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("game {} not found", player.game_id),
            ));
        }
        let seats = rows.players.entry(player.game_id).or_default();
        seats.push(row.clone());
        seats.sort_by_key(|p| p.seat);
        Ok(row)
    }

    async fn players_by_game(&self, game_id: GameId) -> Result<Vec<Player>, DomainError> {
        Ok(self
            .rows
            .read()
            .players
            .get(&game_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn actions_for_hand(
        &self,
        game_id: GameId,
        hand_no: u32,
    ) -> Result<Vec<ActionRecord>, DomainError> {
        Ok(self
            .rows
            .read()
            .actions
            .get(&game_id)
            .map(|log| {
                log.iter()
                    .filter(|a| a.hand_no == hand_no)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn recent_actions(
        &self,
        game_id: GameId,
        limit: usize,
    ) -> Result<Vec<ActionRecord>, DomainError> {
        Ok(self
            .rows
            .read()
            .actions
            .get(&game_id)
            .map(|log| log.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn commit_hand_state(
        &self,
        mut game: Game,
        players: Vec<Player>,
        new_actions: Vec<NewAction>,
    ) -> Result<(), DomainError> {
        let now = OffsetDateTime::now_utc();
        game.updated_at = now;
        let mut rows = self.rows.write();
        if !rows.games.contains_key(&game.id) {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("game {} not found", game.id),
            ));
        }
        let log = rows.actions.entry(game.id).or_default();
        for action in new_actions {
            let record = ActionRecord {
                id: self.next_id.fetch_add(1, Ordering::Relaxed),
                game_id: action.game_id,
                player_id: action.player_id,
                hand_no: action.hand_no,
                kind: action.kind,
                amount: action.amount,
                phase: action.phase,
                created_at: now,
            };
            log.push(record);
        }
        let mut seats = players;
        seats.sort_by_key(|p| p.seat);
        rows.players.insert(game.id, seats);
        rows.games.insert(game.id, game);
        Ok(())
    }
}
