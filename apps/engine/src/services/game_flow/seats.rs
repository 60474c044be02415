//! Seat management: game creation, human joins, bot seating.

use rand::Rng;
use tracing::info;

use super::GameFlowService;
use crate::ai::bot_name;
use crate::config::{GameConfig, GameVisibility};
use crate::domain::state::{GameId, Seat, UserId};
use crate::domain::Deck;
use crate::error::EngineError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::{BotDifficulty, Game, NewGame, NewPlayer, Player, SeatControl};

/// Bot seats requested at game creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotRequest {
    pub count: u8,
    pub difficulty: BotDifficulty,
}

const ROOM_CODE_LEN: usize = 6;
const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const ROOM_CODE_ATTEMPTS: usize = 8;

fn generate_room_code() -> String {
    let mut rng = rand::rng();
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_CHARSET[rng.random_range(0..ROOM_CODE_CHARSET.len())] as char)
        .collect()
}

impl GameFlowService {
    /// Create a game, seat the creator at position 0 with their persisted
    /// chip balance, and optionally seat bots at positions 1..N.
    pub async fn create_game(
        &self,
        config: GameConfig,
        creator_id: UserId,
        bots: Option<BotRequest>,
    ) -> Result<Game, EngineError> {
        config.validate()?;
        if let Some(request) = bots {
            if request.count as usize >= config.max_players as usize {
                return Err(DomainError::validation(
                    ValidationKind::InvalidConfig,
                    format!(
                        "bot count {} leaves no seat for the creator at a {}-seat table",
                        request.count, config.max_players
                    ),
                )
                .into());
            }
        }

        let buy_in = self.store().user_chips(creator_id).await?;

        let mut room_code = generate_room_code();
        for _ in 0..ROOM_CODE_ATTEMPTS {
            if self
                .store()
                .find_game_by_room_code(&room_code)
                .await?
                .is_none()
            {
                break;
            }
            room_code = generate_room_code();
        }

        let game = self
            .store()
            .create_game(NewGame {
                room_code,
                host_id: creator_id,
                config: config.clone(),
                deck: Deck::shuffled(),
            })
            .await?;

        self.store()
            .create_player(NewPlayer {
                game_id: game.id,
                seat: 0,
                control: SeatControl::Human {
                    user_id: creator_id,
                },
                chips: buy_in,
            })
            .await?;

        if let Some(request) = bots {
            for i in 0..request.count {
                self.add_bot_player(game.id, (i + 1) as Seat, request.difficulty, i as usize)
                    .await?;
            }
        }

        info!(
            game_id = game.id,
            room_code = %game.room_code,
            creator_id,
            bots = bots.map(|b| b.count).unwrap_or(0),
            "Game created"
        );
        Ok(game)
    }

    async fn add_bot_player(
        &self,
        game_id: GameId,
        seat: Seat,
        difficulty: BotDifficulty,
        index: usize,
    ) -> Result<Player, DomainError> {
        let game = self.store().require_game(game_id).await?;
        let name = bot_name(difficulty, index);
        self.store()
            .create_player(NewPlayer {
                game_id,
                seat,
                control: SeatControl::Bot { difficulty, name },
                chips: game.config.bot_stack,
            })
            .await
    }

    /// Join a waiting game at the next open seat, buying in with the
    /// user's persisted chip balance.
    pub async fn join_game(&self, game_id: GameId, user_id: UserId) -> Result<Player, EngineError> {
        let lock = self.locks().lock_for(game_id);
        let _guard = lock.lock().await;

        let (game, players) = self.load(game_id).await?;

        if game.status != crate::domain::GameStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::GameAlreadyStarted,
                "Game already started",
            )
            .into());
        }
        if game.config.visibility == GameVisibility::Private
            && game.host_id != user_id
            && !game.config.invited_users.contains(&user_id)
        {
            return Err(DomainError::validation(
                ValidationKind::NotInvited,
                "This is a private game. You must be invited to join.",
            )
            .into());
        }
        if players.len() >= game.config.max_players as usize {
            return Err(DomainError::validation(ValidationKind::GameFull, "Game is full").into());
        }
        if players.iter().any(|p| p.user_id() == Some(user_id)) {
            return Err(DomainError::validation(
                ValidationKind::AlreadyJoined,
                "Already joined this game",
            )
            .into());
        }

        let buy_in = self.store().user_chips(user_id).await?;
        let seat = players.iter().map(|p| p.seat + 1).max().unwrap_or(0);
        let player = self
            .store()
            .create_player(NewPlayer {
                game_id,
                seat,
                control: SeatControl::Human { user_id },
                chips: buy_in,
            })
            .await?;

        info!(game_id, user_id, seat, "Player joined");
        self.notifier().notify_game_changed(game_id);
        Ok(player)
    }

    /// Look a game up by its human-readable room code.
    pub async fn find_by_room_code(&self, room_code: &str) -> Result<Game, EngineError> {
        Ok(self
            .store()
            .find_game_by_room_code(room_code)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Game,
                    format!("no game with room code {room_code}"),
                )
            })?)
    }
}
