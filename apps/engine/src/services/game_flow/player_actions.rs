//! Action validation and application: one serialized, all-or-nothing
//! transaction per submitted action.

use tracing::debug;

use super::round_lifecycle::{advance_street, auto_run_to_showdown, award_uncontested};
use super::GameFlowService;
use crate::domain::betting::{
    apply_action, betting_round_complete, next_actionable_seat, table_max_bet, Blinds,
    PhaseLogEntry, SeatView,
};
use crate::domain::state::{ActionKind, Chips, GameId, Phase, PlayerId, PlayerStatus, Seat};
use crate::domain::GameStatus;
use crate::error::EngineError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::repos::{Game, NewAction, Player};

/// What the caller must do after a committed mutation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActionEffects {
    pub schedule_bot: bool,
}

impl GameFlowService {
    /// Validate and apply one betting action for the acting player.
    ///
    /// `amount` is the target total bet for raises and ignored otherwise.
    pub async fn perform_action(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        action: ActionKind,
        amount: Chips,
    ) -> Result<(), EngineError> {
        let effects = {
            let lock = self.locks().lock_for(game_id);
            let _guard = lock.lock().await;
            self.perform_action_locked(game_id, player_id, action, amount)
                .await?
        };

        self.notifier().notify_game_changed(game_id);
        if effects.schedule_bot {
            self.schedule_bot_turn(game_id);
        }
        Ok(())
    }

    /// The transaction body. Caller must hold the game's lock.
    pub(crate) async fn perform_action_locked(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        action: ActionKind,
        amount: Chips,
    ) -> Result<ActionEffects, DomainError> {
        let (mut game, mut players) = self.load(game_id).await?;

        if game.status != GameStatus::Playing {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "game is not in progress",
            ));
        }
        if !matches!(
            game.phase,
            Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River
        ) {
            return Err(DomainError::validation(
                ValidationKind::InvalidAction,
                format!("no actions accepted during {:?}", game.phase),
            ));
        }
        let turn = game.require_turn()?;
        if turn != player_id {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "Not your turn",
            ));
        }
        let idx = players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Player,
                    format!("player {player_id} not in game {game_id}"),
                )
            })?;

        let views: Vec<SeatView> = players.iter().map(|p| p.seat_view()).collect();
        let max_bet = table_max_bet(&views);
        let outcome = apply_action(
            &players[idx].seat_view(),
            max_bet,
            game.config.big_blind,
            action,
            amount,
        )?;

        let acting_seat = players[idx].seat;
        let phase_now = game.phase;
        {
            let p = &mut players[idx];
            p.chips = p.chips.checked_sub(outcome.chips_paid).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    "action cost exceeds the player's stack",
                )
            })?;
            p.current_bet += outcome.chips_paid;
            p.committed += outcome.chips_paid;
            p.status = outcome.new_status;
        }
        game.pot += outcome.chips_paid;
        let new_action = NewAction {
            game_id,
            player_id,
            hand_no: game.hand_no,
            kind: outcome.kind,
            amount: outcome.chips_paid,
            phase: phase_now,
        };
        debug!(
            game_id,
            player_id,
            seat = acting_seat,
            kind = ?outcome.kind,
            paid = outcome.chips_paid,
            pot = game.pot,
            "Action applied"
        );

        let in_hand: Vec<PlayerId> = players.iter().filter(|p| p.in_hand()).map(|p| p.id).collect();
        if in_hand.len() == 1 {
            award_uncontested(&mut game, &mut players, in_hand[0])?;
        } else {
            let views: Vec<SeatView> = players.iter().map(|p| p.seat_view()).collect();
            match next_actionable_seat(&views, acting_seat) {
                None => auto_run_to_showdown(&mut game, &mut players)?,
                Some(next_seat) => {
                    let log = self
                        .phase_log(&game, &players, phase_now, acting_seat, outcome.chips_paid)
                        .await?;
                    let blinds = if phase_now == Phase::Preflop {
                        Some(reconstruct_blinds(&game, &players, &log)?)
                    } else {
                        None
                    };
                    if betting_round_complete(&views, &log, phase_now, blinds) {
                        advance_street(&mut game, &mut players)?;
                    } else {
                        game.current_turn =
                            Self::player_at_seat(&players, next_seat).map(|p| p.id);
                    }
                }
            }
        }

        self.store()
            .commit_hand_state(game.clone(), players.clone(), vec![new_action])
            .await?;

        Ok(ActionEffects {
            schedule_bot: self.turn_is_bot(&game, &players),
        })
    }

    /// This phase's committed actions plus the one being applied, as
    /// replayable (seat, delta) entries.
    async fn phase_log(
        &self,
        game: &Game,
        players: &[Player],
        phase: Phase,
        acting_seat: Seat,
        acting_delta: Chips,
    ) -> Result<Vec<PhaseLogEntry>, DomainError> {
        let stored = self.store().actions_for_hand(game.id, game.hand_no).await?;
        let seat_of = |id: PlayerId| players.iter().find(|p| p.id == id).map(|p| p.seat);
        let mut log = Vec::new();
        for record in stored.iter().filter(|a| a.phase == phase) {
            let seat = seat_of(record.player_id).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("action by unknown player {}", record.player_id),
                )
            })?;
            log.push(PhaseLogEntry {
                seat,
                delta: record.amount,
            });
        }
        log.push(PhaseLogEntry {
            seat: acting_seat,
            delta: acting_delta,
        });
        Ok(log)
    }
}

/// Recover the blinds actually posted this hand from current bets minus
/// logged deltas; a short-stacked blind may have posted less than the
/// configured amount.
fn reconstruct_blinds(
    game: &Game,
    players: &[Player],
    log: &[PhaseLogEntry],
) -> Result<Blinds, DomainError> {
    let occupied: Vec<Seat> = players
        .iter()
        .filter(|p| p.status != PlayerStatus::Out)
        .map(|p| p.seat)
        .collect();
    let (small_seat, big_seat, _) =
        crate::domain::betting::blind_positions(game.dealer_seat, &occupied)?;

    let posted = |seat: Seat| -> Result<Chips, DomainError> {
        let bet = players
            .iter()
            .find(|p| p.seat == seat)
            .map(|p| p.current_bet)
            .unwrap_or(0);
        let logged: Chips = log.iter().filter(|e| e.seat == seat).map(|e| e.delta).sum();
        bet.checked_sub(logged).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("seat {seat} logged more chips than it has bet"),
            )
        })
    };

    Ok(Blinds {
        small_seat,
        big_seat,
        small: posted(small_seat)?,
        big: posted(big_seat)?,
    })
}
