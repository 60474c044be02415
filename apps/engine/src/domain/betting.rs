//! Pure betting-round logic: action legality and application, turn-order
//! computation, blind positions, and betting-round completion.
//!
//! Completion is reconstructed from the phase's action log rather than
//! per-seat flags: the log is replayed to find the last bet that raised
//! the table max, and every still-actionable seat must have acted after
//! it (or at all, when nothing raised). The big blind's forced post is
//! not an action, so preflop cannot complete until the big blind has
//! explicitly acted or been raised through.

use crate::domain::state::{ActionKind, Chips, Phase, PlayerStatus, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// The slice of a player's state the betting rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatView {
    pub seat: Seat,
    pub status: PlayerStatus,
    pub chips: Chips,
    pub current_bet: Chips,
}

impl SeatView {
    /// A seat that can still put chips in: active with chips behind.
    pub fn actionable(&self) -> bool {
        self.status == PlayerStatus::Active && self.chips > 0
    }
}

/// One committed action within the current phase, in order.
#[derive(Debug, Clone, Copy)]
pub struct PhaseLogEntry {
    pub seat: Seat,
    pub delta: Chips,
}

/// Forced preflop bets, needed to seed the completion replay.
#[derive(Debug, Clone, Copy)]
pub struct Blinds {
    pub small_seat: Seat,
    pub big_seat: Seat,
    pub small: Chips,
    pub big: Chips,
}

/// Highest current bet among non-folded seats.
pub fn table_max_bet(seats: &[SeatView]) -> Chips {
    seats
        .iter()
        .filter(|s| s.status != PlayerStatus::Folded)
        .map(|s| s.current_bet)
        .max()
        .unwrap_or(0)
}

/// Next seat to act after `from`: the lowest active seat index greater
/// than `from`, wrapping to the lowest active seat. None when nobody can
/// act (everyone remaining is all-in or out).
pub fn next_actionable_seat(seats: &[SeatView], from: Seat) -> Option<Seat> {
    let mut candidates: Vec<Seat> = seats
        .iter()
        .filter(|s| s.actionable())
        .map(|s| s.seat)
        .collect();
    candidates.sort_unstable();
    candidates
        .iter()
        .find(|&&s| s > from)
        .or_else(|| candidates.first())
        .copied()
}

/// First actionable seat in position order, used when a new street opens.
pub fn first_actionable_seat(seats: &[SeatView]) -> Option<Seat> {
    seats
        .iter()
        .filter(|s| s.actionable())
        .map(|s| s.seat)
        .min()
}

/// Small blind, big blind, and first preflop actor for a hand.
///
/// `occupied` is the ascending list of non-out seats. Heads-up the dealer
/// posts the small blind and acts first; with three or more seats the
/// blinds are the two seats after the dealer and action opens behind the
/// big blind.
pub fn blind_positions(dealer: Seat, occupied: &[Seat]) -> Result<(Seat, Seat, Seat), DomainError> {
    if occupied.len() < 2 {
        return Err(DomainError::validation(
            ValidationKind::InsufficientPlayers,
            "at least 2 players required",
        ));
    }
    let dealer_idx = occupied
        .iter()
        .position(|&s| s == dealer)
        .ok_or_else(|| DomainError::validation_other("dealer seat is not occupied"))?;
    let nth = |n: usize| occupied[(dealer_idx + n) % occupied.len()];
    if occupied.len() == 2 {
        Ok((dealer, nth(1), dealer))
    } else {
        Ok((nth(1), nth(2), nth(3)))
    }
}

/// What applying an action does to the acting seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Action actually taken, after conversion (a short call becomes all-in).
    pub kind: ActionKind,
    /// Chips moved from the stack into the pot.
    pub chips_paid: Chips,
    pub new_status: PlayerStatus,
}

/// Validate and resolve an action for the acting seat.
///
/// `amount` is only meaningful for raises, where it is the target total
/// bet for the round. Calls and raises whose cost meets or exceeds the
/// remaining stack convert to all-in instead of erroring.
pub fn apply_action(
    seat: &SeatView,
    max_bet: Chips,
    big_blind: Chips,
    action: ActionKind,
    amount: Chips,
) -> Result<ActionOutcome, DomainError> {
    if !seat.actionable() {
        return Err(DomainError::validation(
            ValidationKind::InvalidAction,
            "seat cannot act in its current state",
        ));
    }
    match action {
        ActionKind::Fold => Ok(ActionOutcome {
            kind: ActionKind::Fold,
            chips_paid: 0,
            new_status: PlayerStatus::Folded,
        }),
        ActionKind::Check => {
            if seat.current_bet != max_bet {
                return Err(DomainError::validation(
                    ValidationKind::InvalidAction,
                    format!(
                        "cannot check facing a bet of {max_bet} with only {} in",
                        seat.current_bet
                    ),
                ));
            }
            Ok(ActionOutcome {
                kind: ActionKind::Check,
                chips_paid: 0,
                new_status: PlayerStatus::Active,
            })
        }
        ActionKind::Call => {
            let owed = max_bet.saturating_sub(seat.current_bet);
            if owed >= seat.chips {
                Ok(ActionOutcome {
                    kind: ActionKind::AllIn,
                    chips_paid: seat.chips,
                    new_status: PlayerStatus::AllIn,
                })
            } else {
                Ok(ActionOutcome {
                    kind: ActionKind::Call,
                    chips_paid: owed,
                    new_status: PlayerStatus::Active,
                })
            }
        }
        ActionKind::Raise => {
            let minimum = max_bet + big_blind;
            if amount < minimum {
                return Err(DomainError::validation(
                    ValidationKind::RaiseBelowMinimum,
                    format!("raise target {amount} below minimum {minimum}"),
                ));
            }
            let cost = amount - seat.current_bet;
            if cost >= seat.chips {
                Ok(ActionOutcome {
                    kind: ActionKind::AllIn,
                    chips_paid: seat.chips,
                    new_status: PlayerStatus::AllIn,
                })
            } else {
                Ok(ActionOutcome {
                    kind: ActionKind::Raise,
                    chips_paid: cost,
                    new_status: PlayerStatus::Active,
                })
            }
        }
        ActionKind::AllIn => Ok(ActionOutcome {
            kind: ActionKind::AllIn,
            chips_paid: seat.chips,
            new_status: PlayerStatus::AllIn,
        }),
    }
}

/// Whether the current betting round is complete.
///
/// Complete when every still-actionable seat has matched the table max
/// bet and has acted since the last raise this phase (or at all, when no
/// raise happened). Immediately complete when no seat can act. Preflop
/// the blinds seed the replay, so the big blind seat still owes an
/// explicit action even when all bets are level.
pub fn betting_round_complete(
    seats: &[SeatView],
    phase_log: &[PhaseLogEntry],
    phase: Phase,
    blinds: Option<Blinds>,
) -> bool {
    let actionable: Vec<&SeatView> = seats.iter().filter(|s| s.actionable()).collect();
    if actionable.is_empty() {
        return true;
    }

    let max_bet = table_max_bet(seats);
    if actionable.iter().any(|s| s.current_bet != max_bet) {
        return false;
    }

    // Replay the phase to find the last wager that raised the table max.
    // Blinds seed the preflop replay but do not count as acting.
    let mut bets: Vec<(Seat, Chips)> = Vec::new();
    let mut running_max: Chips = 0;
    if phase == Phase::Preflop {
        if let Some(b) = blinds {
            bets.push((b.small_seat, b.small));
            bets.push((b.big_seat, b.big));
            running_max = b.small.max(b.big);
        }
    }
    let mut last_raise: Option<usize> = None;
    for (i, entry) in phase_log.iter().enumerate() {
        let bet = match bets.iter_mut().find(|(s, _)| *s == entry.seat) {
            Some((_, bet)) => {
                *bet += entry.delta;
                *bet
            }
            None => {
                bets.push((entry.seat, entry.delta));
                entry.delta
            }
        };
        if bet > running_max {
            running_max = bet;
            last_raise = Some(i);
        }
    }

    // The raising entry itself counts as the raiser's action, so the
    // window opens AT the last raise, not after it.
    let acted_since = |seat: Seat| -> bool {
        let start = last_raise.unwrap_or(0);
        phase_log[start..].iter().any(|e| e.seat == seat)
    };
    actionable.iter().all(|s| acted_since(s.seat))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(seat: Seat, status: PlayerStatus, chips: Chips, current_bet: Chips) -> SeatView {
        SeatView {
            seat,
            status,
            chips,
            current_bet,
        }
    }

    fn entry(s: Seat, delta: Chips) -> PhaseLogEntry {
        PhaseLogEntry { seat: s, delta }
    }

    const BLINDS: Blinds = Blinds {
        small_seat: 1,
        big_seat: 2,
        small: 10,
        big: 20,
    };

    #[test]
    fn next_seat_wraps_past_folded_and_allin() {
        let seats = [
            seat(0, PlayerStatus::Active, 100, 0),
            seat(1, PlayerStatus::Folded, 100, 0),
            seat(2, PlayerStatus::AllIn, 0, 50),
            seat(3, PlayerStatus::Active, 100, 0),
        ];
        assert_eq!(next_actionable_seat(&seats, 0), Some(3));
        assert_eq!(next_actionable_seat(&seats, 3), Some(0));
    }

    #[test]
    fn no_actionable_seat_when_everyone_is_all_in() {
        let seats = [
            seat(0, PlayerStatus::AllIn, 0, 100),
            seat(1, PlayerStatus::AllIn, 0, 100),
        ];
        assert_eq!(next_actionable_seat(&seats, 0), None);
        assert!(betting_round_complete(&seats, &[], Phase::Flop, None));
    }

    #[test]
    fn heads_up_dealer_posts_small_blind() {
        let (sb, bb, first) = blind_positions(0, &[0, 1]).unwrap();
        assert_eq!((sb, bb, first), (0, 1, 0));
        let (sb, bb, first) = blind_positions(1, &[0, 1]).unwrap();
        assert_eq!((sb, bb, first), (1, 0, 1));
    }

    #[test]
    fn three_handed_blinds_rotate_from_dealer() {
        let (sb, bb, first) = blind_positions(0, &[0, 1, 2]).unwrap();
        assert_eq!((sb, bb, first), (1, 2, 0));
        // Out seats are skipped entirely.
        let (sb, bb, first) = blind_positions(4, &[0, 2, 4]).unwrap();
        assert_eq!((sb, bb, first), (0, 2, 4));
    }

    #[test]
    fn check_requires_matching_the_table_bet() {
        let s = seat(0, PlayerStatus::Active, 100, 0);
        assert!(apply_action(&s, 20, 20, ActionKind::Check, 0).is_err());
        let s = seat(0, PlayerStatus::Active, 100, 20);
        let out = apply_action(&s, 20, 20, ActionKind::Check, 0).unwrap();
        assert_eq!(out.chips_paid, 0);
        assert_eq!(out.new_status, PlayerStatus::Active);
    }

    #[test]
    fn short_call_converts_to_all_in() {
        // Owes 150 with only 80 behind: pays exactly 80 and is all-in.
        let s = seat(0, PlayerStatus::Active, 80, 0);
        let out = apply_action(&s, 150, 20, ActionKind::Call, 0).unwrap();
        assert_eq!(out.kind, ActionKind::AllIn);
        assert_eq!(out.chips_paid, 80);
        assert_eq!(out.new_status, PlayerStatus::AllIn);
    }

    #[test]
    fn raise_below_minimum_is_rejected() {
        let s = seat(0, PlayerStatus::Active, 500, 20);
        let err = apply_action(&s, 40, 20, ActionKind::Raise, 50).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::RaiseBelowMinimum, _)
        ));
        let out = apply_action(&s, 40, 20, ActionKind::Raise, 60).unwrap();
        assert_eq!(out.kind, ActionKind::Raise);
        assert_eq!(out.chips_paid, 40);
    }

    #[test]
    fn covering_raise_converts_to_all_in() {
        let s = seat(0, PlayerStatus::Active, 90, 10);
        let out = apply_action(&s, 40, 20, ActionKind::Raise, 100).unwrap();
        assert_eq!(out.kind, ActionKind::AllIn);
        assert_eq!(out.chips_paid, 90);
    }

    #[test]
    fn preflop_not_complete_until_big_blind_acts() {
        // Scenario: everyone has called to 20, big blind has not acted.
        let seats = [
            seat(0, PlayerStatus::Active, 980, 20),
            seat(1, PlayerStatus::Active, 990, 20),
            seat(2, PlayerStatus::Active, 980, 20),
        ];
        let log = [entry(0, 20), entry(1, 10)];
        assert!(!betting_round_complete(
            &seats,
            &log,
            Phase::Preflop,
            Some(BLINDS)
        ));

        // The big blind's explicit check completes the round.
        let log = [entry(0, 20), entry(1, 10), entry(2, 0)];
        assert!(betting_round_complete(
            &seats,
            &log,
            Phase::Preflop,
            Some(BLINDS)
        ));
    }

    #[test]
    fn raise_reopens_action_for_earlier_callers() {
        let seats = [
            seat(0, PlayerStatus::Active, 900, 60),
            seat(1, PlayerStatus::Active, 900, 60),
            seat(2, PlayerStatus::Active, 900, 60),
        ];
        // Seat 0 calls, seat 1 raises to 60, seats 2 and 0 must act again.
        let log = [entry(0, 20), entry(1, 50), entry(2, 40)];
        assert!(!betting_round_complete(
            &seats,
            &log,
            Phase::Preflop,
            Some(BLINDS)
        ));
        let log = [entry(0, 20), entry(1, 50), entry(2, 40), entry(0, 40)];
        assert!(betting_round_complete(
            &seats,
            &log,
            Phase::Preflop,
            Some(BLINDS)
        ));
    }

    #[test]
    fn postflop_round_completes_when_all_checked() {
        let seats = [
            seat(0, PlayerStatus::Active, 900, 0),
            seat(1, PlayerStatus::Active, 900, 0),
        ];
        assert!(!betting_round_complete(&seats, &[], Phase::Flop, None));
        let log = [entry(0, 0)];
        assert!(!betting_round_complete(&seats, &log, Phase::Flop, None));
        let log = [entry(0, 0), entry(1, 0)];
        assert!(betting_round_complete(&seats, &log, Phase::Flop, None));
    }

    #[test]
    fn short_all_in_does_not_reopen_action() {
        // Seat 2 shoved for less than the outstanding bet; seats 0 and 1
        // already matched the max and need not act again.
        let seats = [
            seat(0, PlayerStatus::Active, 900, 100),
            seat(1, PlayerStatus::Active, 900, 100),
            seat(2, PlayerStatus::AllIn, 0, 60),
        ];
        let log = [entry(0, 100), entry(1, 100), entry(2, 60)];
        assert!(betting_round_complete(&seats, &log, Phase::Flop, None));
    }
}
