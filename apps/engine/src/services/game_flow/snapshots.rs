//! Viewer-scoped snapshots of game state.
//!
//! The player snapshot never includes the deck, and another player's
//! hole cards render as hidden sentinels until the hand reaches showdown
//! or the game finishes. The admin snapshot exposes everything and must
//! only be wired to privileged monitoring surfaces.

use serde::Serialize;
use time::OffsetDateTime;

use super::GameFlowService;
use crate::domain::state::{
    ActionKind, Chips, GameId, GameStatus, Phase, PlayerId, PlayerStatus, Seat, UserId,
};
use crate::domain::{Card, CardFace};
use crate::error::EngineError;
use crate::repos::{BotDifficulty, Game, Player, WinnerSummary};

/// One entry of the recent-action feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub player_id: PlayerId,
    pub kind: ActionKind,
    pub amount: Chips,
    pub phase: Phase,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub seat: Seat,
    pub display_name: String,
    pub user_id: Option<UserId>,
    pub is_bot: bool,
    pub bot_difficulty: Option<BotDifficulty>,
    pub chips: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    pub is_dealer: bool,
    pub hole_cards: Vec<CardFace>,
    pub hand_label: Option<String>,
    pub hand_description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub room_code: String,
    pub status: GameStatus,
    pub phase: Phase,
    pub pot: Chips,
    pub community_cards: Vec<Card>,
    pub dealer_seat: Seat,
    pub current_turn: Option<PlayerId>,
    pub hand_no: u32,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub max_players: u8,
    pub winners: Vec<WinnerSummary>,
    pub players: Vec<PlayerSnapshot>,
    /// Newest first, capped at `RECENT_ACTION_LIMIT`.
    pub recent_actions: Vec<ActionView>,
}

/// Privileged view: everything the player view hides.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSnapshot {
    pub game: GameSnapshot,
    pub remaining_deck: Vec<Card>,
    /// The cards that would be dealt next.
    pub next_cards: Vec<Card>,
}

const RECENT_ACTION_LIMIT: usize = 20;
const NEXT_CARD_PREVIEW: usize = 5;

fn player_snapshot(player: &Player, dealer_seat: Seat, reveal: bool) -> PlayerSnapshot {
    let hole_cards = player
        .hole_cards
        .iter()
        .map(|&c| {
            if reveal {
                CardFace::Up(c)
            } else {
                CardFace::Hidden
            }
        })
        .collect();
    PlayerSnapshot {
        id: player.id,
        seat: player.seat,
        display_name: player.display_name(),
        user_id: player.user_id(),
        is_bot: player.is_bot(),
        bot_difficulty: player.bot_difficulty(),
        chips: player.chips,
        current_bet: player.current_bet,
        status: player.status,
        is_dealer: player.seat == dealer_seat,
        hole_cards,
        hand_label: player.hand_label.clone(),
        hand_description: player.hand_description.clone(),
    }
}

fn game_snapshot(
    game: &Game,
    players: &[Player],
    actions: Vec<ActionView>,
    viewer: Option<UserId>,
) -> GameSnapshot {
    // All hole cards become public at showdown and when the game is over.
    let all_revealed = game.phase == Phase::Showdown || game.status == GameStatus::Finished;
    GameSnapshot {
        id: game.id,
        room_code: game.room_code.clone(),
        status: game.status,
        phase: game.phase,
        pot: game.pot,
        community_cards: game.community_cards.clone(),
        dealer_seat: game.dealer_seat,
        current_turn: game.current_turn,
        hand_no: game.hand_no,
        small_blind: game.config.small_blind,
        big_blind: game.config.big_blind,
        max_players: game.config.max_players,
        winners: game.winners.clone(),
        players: players
            .iter()
            .map(|p| {
                let reveal = all_revealed
                    || viewer.is_none()
                    || (p.user_id().is_some() && p.user_id() == viewer);
                player_snapshot(p, game.dealer_seat, reveal)
            })
            .collect(),
        recent_actions: actions,
    }
}

impl GameFlowService {
    /// Game state as seen by one user. Reading never mutates state, and
    /// the read runs under the game lock so it observes a committed
    /// transaction boundary.
    pub async fn player_state(
        &self,
        game_id: GameId,
        viewer: UserId,
    ) -> Result<GameSnapshot, EngineError> {
        let lock = self.locks().lock_for(game_id);
        let _guard = lock.lock().await;

        let (game, players) = self.load(game_id).await?;
        let actions = self.recent_action_views(game_id).await?;
        Ok(game_snapshot(&game, &players, actions, Some(viewer)))
    }

    /// Full state including all hole cards and the remaining deck.
    /// Privileged: never expose to ordinary players.
    pub async fn admin_state(&self, game_id: GameId) -> Result<AdminSnapshot, EngineError> {
        let lock = self.locks().lock_for(game_id);
        let _guard = lock.lock().await;

        let (game, players) = self.load(game_id).await?;
        let actions = self.recent_action_views(game_id).await?;
        let remaining_deck: Vec<Card> = game.deck.remaining().to_vec();
        let next_cards: Vec<Card> = remaining_deck
            .iter()
            .take(NEXT_CARD_PREVIEW)
            .copied()
            .collect();
        Ok(AdminSnapshot {
            game: game_snapshot(&game, &players, actions, None),
            remaining_deck,
            next_cards,
        })
    }

    async fn recent_action_views(&self, game_id: GameId) -> Result<Vec<ActionView>, EngineError> {
        let records = self
            .store()
            .recent_actions(game_id, RECENT_ACTION_LIMIT)
            .await?;
        Ok(records
            .into_iter()
            .map(|a| ActionView {
                player_id: a.player_id,
                kind: a.kind,
                amount: a.amount,
                phase: a.phase,
                at: a.created_at,
            })
            .collect())
    }
}
