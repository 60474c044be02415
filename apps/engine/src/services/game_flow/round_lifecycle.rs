//! Hand lifecycle: dealing, blind posting, street advancement, showdown,
//! and the next-hand / session-end transition.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::betting::{
    blind_positions, first_actionable_seat, next_actionable_seat, SeatView,
};
use crate::domain::state::{Chips, GameId, Phase, PlayerId, PlayerStatus, Seat};
use crate::domain::{calculate_pots, derive_dealing_seed, evaluate_best, Contribution, Deck, GameStatus, HandResult};
use crate::error::EngineError;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::repos::{Game, Player, WinnerSummary};

fn seat_views(players: &[Player]) -> Vec<SeatView> {
    players.iter().map(|p| p.seat_view()).collect()
}

impl GameFlowService {
    /// Start the session: deal the first hand and open preflop betting.
    pub async fn start_game(&self, game_id: GameId) -> Result<(), EngineError> {
        let schedule_bot = {
            let lock = self.locks().lock_for(game_id);
            let _guard = lock.lock().await;

            let (mut game, mut players) = self.load(game_id).await?;
            if game.status != GameStatus::Waiting {
                return Err(DomainError::validation(
                    ValidationKind::GameAlreadyStarted,
                    "Game already started",
                )
                .into());
            }
            if players.len() < 2 {
                return Err(DomainError::validation(
                    ValidationKind::InsufficientPlayers,
                    "At least 2 players required to start",
                )
                .into());
            }

            game.status = GameStatus::Playing;
            game.dealer_seat = 0;
            deal_hand(&mut game, &mut players)?;
            info!(game_id, hand_no = game.hand_no, "Game started");

            self.store()
                .commit_hand_state(game.clone(), players.clone(), Vec::new())
                .await?;
            self.turn_is_bot(&game, &players)
        };

        self.notifier().notify_game_changed(game_id);
        if schedule_bot {
            self.schedule_bot_turn(game_id);
        }
        Ok(())
    }

    /// Whether the committed state is waiting on a bot seat.
    pub(crate) fn turn_is_bot(&self, game: &Game, players: &[Player]) -> bool {
        game.status == GameStatus::Playing
            && game
                .current_turn
                .and_then(|id| players.iter().find(|p| p.id == id))
                .is_some_and(|p| p.is_bot())
    }
}

/// Deal a fresh hand: reshuffle, redeal hole cards, post blinds, and set
/// the first seat to act. Retains chip stacks and seat order; increments
/// the hand counter.
pub(crate) fn deal_hand(game: &mut Game, players: &mut [Player]) -> Result<(), DomainError> {
    game.hand_no += 1;
    for p in players.iter_mut() {
        p.reset_for_new_hand();
    }

    game.deck = match game.config.rng_seed {
        Some(seed) => Deck::shuffled_with_seed(derive_dealing_seed(seed, game.hand_no)),
        None => Deck::shuffled(),
    };
    game.community_cards.clear();
    game.pot = 0;
    game.phase = Phase::Preflop;

    for p in players.iter_mut().filter(|p| p.status == PlayerStatus::Active) {
        p.hole_cards = game.deck.deal(2)?;
    }

    let occupied: Vec<Seat> = players
        .iter()
        .filter(|p| p.status != PlayerStatus::Out)
        .map(|p| p.seat)
        .collect();
    let (small_seat, big_seat, first_seat) = blind_positions(game.dealer_seat, &occupied)?;
    post_blind(game, players, small_seat, game.config.small_blind)?;
    post_blind(game, players, big_seat, game.config.big_blind)?;

    debug!(
        game_id = game.id,
        hand_no = game.hand_no,
        dealer = game.dealer_seat,
        small_seat,
        big_seat,
        "Hand dealt, blinds posted"
    );

    let views = seat_views(players);
    let opener = players
        .iter()
        .find(|p| p.seat == first_seat)
        .filter(|p| p.seat_view().actionable())
        .map(|p| p.seat)
        .or_else(|| next_actionable_seat(&views, first_seat));
    match opener {
        Some(seat) => {
            game.current_turn = GameFlowService::player_at_seat(players, seat).map(|p| p.id);
        }
        // Blinds put everyone all-in; nothing left to bet.
        None => auto_run_to_showdown(game, players)?,
    }
    Ok(())
}

fn post_blind(
    game: &mut Game,
    players: &mut [Player],
    seat: Seat,
    blind: Chips,
) -> Result<(), DomainError> {
    let player = players
        .iter_mut()
        .find(|p| p.seat == seat)
        .ok_or_else(|| DomainError::validation_other("blind seat is not occupied"))?;
    let posted = blind.min(player.chips);
    player.chips -= posted;
    player.current_bet += posted;
    player.committed += posted;
    if player.chips == 0 {
        player.status = PlayerStatus::AllIn;
    }
    game.pot += posted;
    Ok(())
}

/// Advance to the next street after a completed betting round, or to
/// showdown from the river.
pub(crate) fn advance_street(game: &mut Game, players: &mut [Player]) -> Result<(), DomainError> {
    let next = game.phase.next_street().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("no street after {:?}", game.phase),
        )
    })?;
    if next == Phase::Showdown {
        return showdown(game, players);
    }

    let cards = game.deck.deal(next.cards_to_deal())?;
    game.community_cards.extend(cards);
    game.phase = next;
    for p in players.iter_mut() {
        p.current_bet = 0;
    }

    let views = seat_views(players);
    match first_actionable_seat(&views) {
        Some(seat) => {
            game.current_turn = GameFlowService::player_at_seat(players, seat).map(|p| p.id);
            debug!(game_id = game.id, phase = ?game.phase, first_seat = seat, "Street dealt");
            Ok(())
        }
        None => auto_run_to_showdown(game, players),
    }
}

/// Deal out every remaining street with no further betting, then run the
/// showdown. A bounded loop, not recursion: at most flop, turn, river.
pub(crate) fn auto_run_to_showdown(
    game: &mut Game,
    players: &mut [Player],
) -> Result<(), DomainError> {
    while let Some(next) = game.phase.next_street() {
        if next == Phase::Showdown {
            break;
        }
        let cards = game.deck.deal(next.cards_to_deal())?;
        game.community_cards.extend(cards);
        game.phase = next;
    }
    for p in players.iter_mut() {
        p.current_bet = 0;
    }
    debug!(game_id = game.id, "Auto-ran remaining streets");
    showdown(game, players)
}

/// Reveal hands, award every pot tier, and run end-of-hand housekeeping.
pub(crate) fn showdown(game: &mut Game, players: &mut [Player]) -> Result<(), DomainError> {
    game.phase = Phase::Showdown;
    game.current_turn = None;

    if game.community_cards.len() != 5 {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!(
                "showdown with {} community cards",
                game.community_cards.len()
            ),
        ));
    }

    // Evaluate and persist a label for every revealed hand, folded seats
    // included (shown in the UI, excluded from pot eligibility).
    let mut results: BTreeMap<PlayerId, HandResult> = BTreeMap::new();
    for p in players.iter_mut().filter(|p| p.hole_cards.len() == 2) {
        let result = evaluate_best(&p.hole_cards, &game.community_cards)?;
        p.hand_label = Some(result.category.label().to_string());
        p.hand_description = Some(result.describe());
        results.insert(p.id, result);
    }

    let contributions: Vec<Contribution> = players
        .iter()
        .filter(|p| p.status != PlayerStatus::Out && p.committed > 0)
        .map(|p| Contribution {
            player_id: p.id,
            committed: p.committed,
            status: p.status,
        })
        .collect();
    let tiers = calculate_pots(&contributions);

    let tier_total: Chips = tiers.iter().map(|t| t.amount).sum();
    if tier_total != game.pot {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("pot {} does not match tier total {tier_total}", game.pot),
        ));
    }

    // Award each tier independently; ties split evenly with the odd chip
    // going to the first winner clockwise from the dealer.
    let seat_count = players.len();
    let seat_of = |id: PlayerId| players.iter().find(|p| p.id == id).map(|p| p.seat);
    let mut winnings: BTreeMap<PlayerId, Chips> = BTreeMap::new();
    for tier in &tiers {
        let best = tier
            .eligible
            .iter()
            .filter_map(|id| results.get(id).map(|r| r.value))
            .max()
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    "pot tier with no evaluable hands",
                )
            })?;
        let mut tier_winners: Vec<PlayerId> = tier
            .eligible
            .iter()
            .filter(|id| results.get(id).map(|r| r.value) == Some(best))
            .copied()
            .collect();
        tier_winners.sort_by_key(|&id| {
            seat_of(id)
                .map(|seat| (seat as usize + seat_count - (game.dealer_seat as usize + 1) % seat_count) % seat_count)
                .unwrap_or(usize::MAX)
        });

        let share = tier.amount / tier_winners.len() as Chips;
        let remainder = tier.amount % tier_winners.len() as Chips;
        for (i, id) in tier_winners.iter().enumerate() {
            let mut amount = share;
            if i == 0 {
                amount += remainder;
            }
            *winnings.entry(*id).or_insert(0) += amount;
        }
    }

    let mut summaries = Vec::new();
    for p in players.iter_mut() {
        if let Some(&amount) = winnings.get(&p.id) {
            if amount > 0 {
                p.chips += amount;
                game.pot -= amount;
                let result = &results[&p.id];
                summaries.push(WinnerSummary {
                    player_id: p.id,
                    amount,
                    hand_rank: result.category.label().to_string(),
                    description: result.describe(),
                });
            }
        }
    }
    if game.pot != 0 {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("{} chips left unawarded after showdown", game.pot),
        ));
    }
    game.winners = summaries;

    info!(
        game_id = game.id,
        hand_no = game.hand_no,
        winners = ?game.winners.iter().map(|w| (w.player_id, w.amount)).collect::<Vec<_>>(),
        "Showdown resolved"
    );

    end_of_hand(game, players)
}

/// Hand ended with a single non-folded player: award the whole pot
/// without revealing anything.
pub(crate) fn award_uncontested(
    game: &mut Game,
    players: &mut [Player],
    winner_id: PlayerId,
) -> Result<(), DomainError> {
    let pot = game.pot;
    let winner = players
        .iter_mut()
        .find(|p| p.id == winner_id)
        .ok_or_else(|| {
            DomainError::infra(InfraErrorKind::DataCorruption, "uncontested winner missing")
        })?;
    winner.chips += pot;
    game.pot = 0;
    game.current_turn = None;
    game.winners = vec![WinnerSummary {
        player_id: winner_id,
        amount: pot,
        hand_rank: "Uncontested".to_string(),
        description: "All other players folded".to_string(),
    }];
    info!(
        game_id = game.id,
        hand_no = game.hand_no,
        winner_id,
        amount = pot,
        "Pot awarded uncontested"
    );
    end_of_hand(game, players)
}

/// Mark busted seats out, then either finish the session or deal the
/// next hand from the advanced dealer button.
fn end_of_hand(game: &mut Game, players: &mut [Player]) -> Result<(), DomainError> {
    for p in players.iter_mut() {
        if p.chips == 0 && p.status != PlayerStatus::Out {
            p.status = PlayerStatus::Out;
            info!(game_id = game.id, player_id = p.id, seat = p.seat, "Player out of chips");
        }
    }

    let occupied: Vec<Seat> = players
        .iter()
        .filter(|p| p.status != PlayerStatus::Out)
        .map(|p| p.seat)
        .collect();
    let cap_reached = game
        .config
        .max_hands
        .is_some_and(|cap| game.hand_no >= cap);

    if occupied.len() <= 1 || cap_reached {
        game.status = GameStatus::Finished;
        game.current_turn = None;
        info!(
            game_id = game.id,
            hands_played = game.hand_no,
            remaining_players = occupied.len(),
            "Game finished"
        );
        return Ok(());
    }

    game.dealer_seat = occupied
        .iter()
        .find(|&&s| s > game.dealer_seat)
        .or_else(|| occupied.first())
        .copied()
        .ok_or_else(|| {
            DomainError::infra(InfraErrorKind::DataCorruption, "no seat for dealer button")
        })?;
    deal_hand(game, players)
}
