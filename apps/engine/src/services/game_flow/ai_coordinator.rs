//! Bot turn scheduling and execution.
//!
//! Bot turns run as deferred tasks so the human action that triggered
//! them never waits on a bot decision. A fired trigger re-validates
//! under the game lock and silently no-ops when the game has moved on.
//! Bot failures are never surfaced to players: a rejected decision falls
//! back to call, then all-in, then fold.

use tracing::{debug, error, info, warn};

use super::player_actions::ActionEffects;
use super::GameFlowService;
use crate::ai::{create_bot, BotDecision};
use crate::domain::betting::table_max_bet;
use crate::domain::state::{GameId, Phase, PlayerStatus};
use crate::domain::{derive_bot_seed, GameStatus, VisibleGameState};
use crate::error::EngineError;

impl GameFlowService {
    /// Fire-and-forget trigger for the current bot turn, if any. Applies
    /// the configured think delay and bounds the whole turn with the
    /// decision timeout.
    pub(crate) fn schedule_bot_turn(&self, game_id: GameId) {
        let service = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(service.bot_settings().think_delay).await;
            let bounded = tokio::time::timeout(
                service.bot_settings().decision_timeout,
                service.run_bot_turn(game_id),
            );
            match bounded.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(game_id, error = %e, "Bot turn failed"),
                Err(_) => warn!(game_id, "Bot turn timed out"),
            }
        });
    }

    /// Execute one bot turn if the game is still waiting on a bot seat.
    ///
    /// Public so embeddings and tests can drive bot turns synchronously
    /// instead of relying on the deferred trigger.
    pub async fn run_bot_turn(&self, game_id: GameId) -> Result<(), EngineError> {
        let effects = {
            let lock = self.locks().lock_for(game_id);
            let _guard = lock.lock().await;
            self.run_bot_turn_locked(game_id).await?
        };

        if let Some(effects) = effects {
            self.notifier().notify_game_changed(game_id);
            if effects.schedule_bot {
                self.schedule_bot_turn(game_id);
            }
        }
        Ok(())
    }

    async fn run_bot_turn_locked(
        &self,
        game_id: GameId,
    ) -> Result<Option<ActionEffects>, EngineError> {
        let (game, players) = self.load(game_id).await?;

        // The trigger may fire after the game moved on; that is a no-op.
        if game.status != GameStatus::Playing
            || !matches!(
                game.phase,
                Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River
            )
        {
            debug!(game_id, "Bot trigger fired on a settled game, skipping");
            return Ok(None);
        }
        let Some(turn_id) = game.current_turn else {
            debug!(game_id, "Bot trigger with no turn to take, skipping");
            return Ok(None);
        };
        let Some(player) = players.iter().find(|p| p.id == turn_id) else {
            debug!(game_id, turn_id, "Turn player not found, skipping");
            return Ok(None);
        };
        let Some(difficulty) = player.bot_difficulty() else {
            debug!(game_id, turn_id, "Human player's turn, skipping bot trigger");
            return Ok(None);
        };

        let views: Vec<_> = players.iter().map(|p| p.seat_view()).collect();
        let state = VisibleGameState {
            pot: game.pot,
            current_bet: table_max_bet(&views),
            player_chips: player.chips,
            player_bet: player.current_bet,
            community_cards: game.community_cards.clone(),
            hole_cards: player.hole_cards.clone(),
            phase: game.phase,
            players_remaining: players
                .iter()
                .filter(|p| p.status == PlayerStatus::Active)
                .count(),
            big_blind: game.config.big_blind,
        };

        let seed = game
            .config
            .rng_seed
            .map(|s| derive_bot_seed(s, game.hand_no, player.seat));
        let bot = create_bot(difficulty, seed);
        let decision = match bot.decide(&state) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(game_id, turn_id, error = %e, "Bot decision failed, falling back");
                BotDecision::call()
            }
        };

        info!(
            game_id,
            player_id = turn_id,
            seat = player.seat,
            difficulty = ?difficulty,
            action = ?decision.action,
            amount = decision.amount,
            "Bot acting"
        );

        // Deterministic fallback chain: proposed action, then call, then
        // all-in, then fold. Validation rejections move down the chain;
        // anything else is a real failure.
        let mut attempts = vec![decision];
        attempts.extend([
            BotDecision::call(),
            BotDecision::all_in(),
            BotDecision::fold(),
        ]);
        for attempt in attempts {
            match self
                .perform_action_locked(game_id, turn_id, attempt.action, attempt.amount)
                .await
            {
                Ok(effects) => return Ok(Some(effects)),
                Err(e) if e.is_integrity() => return Err(e.into()),
                Err(e) => {
                    debug!(
                        game_id,
                        turn_id,
                        action = ?attempt.action,
                        error = %e,
                        "Bot action rejected, trying fallback"
                    );
                }
            }
        }

        // Even fold failed: the hand is stalled. Operational alert, no
        // automatic recovery.
        error!(game_id, player_id = turn_id, "Bot could not act, hand stalled");
        Ok(None)
    }
}
