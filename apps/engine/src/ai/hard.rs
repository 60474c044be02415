//! Hard bot: aggression scales with street and table size, with bounded
//! deviation (occasional bluffs and slow-plays).

use std::sync::Mutex;

use rand::prelude::*;

use super::strength::hand_strength;
use super::trait_def::{BotDecision, BotError, BotPlayer};
use super::raise_by;
use crate::domain::{Phase, VisibleGameState};

pub struct HardBot {
    rng: Mutex<StdRng>,
}

impl HardBot {
    pub const NAME: &'static str = "hard";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Aggression in 0..=1 from strength, street, and players remaining.
    fn aggression(strength: f64, phase: Phase, players_remaining: usize) -> f64 {
        let mut aggression = strength;
        if phase == Phase::Turn {
            aggression *= 1.1;
        }
        if phase == Phase::River {
            aggression *= 1.2;
        }
        if players_remaining <= 3 {
            aggression *= 1.15;
        }
        if players_remaining == 2 {
            aggression *= 1.25;
        }
        aggression.min(1.0)
    }
}

impl BotPlayer for HardBot {
    fn decide(&self, state: &VisibleGameState) -> Result<BotDecision, BotError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| BotError::Internal("rng poisoned".into()))?;
        let strength = hand_strength(&state.hole_cards, &state.community_cards);
        let pot = state.pot as f64;
        let call = state.call_amount() as f64;
        let is_late_street = matches!(state.phase, Phase::Turn | Phase::River);
        let aggression = Self::aggression(strength, state.phase, state.players_remaining);

        // Very weak hand.
        if strength < 0.35 {
            if state.can_check() {
                // Bluff occasionally in shorthanded pots.
                if state.players_remaining <= 3 && rng.random_bool(0.15) {
                    return Ok(raise_by(state, (pot * 0.6) as u32));
                }
                return Ok(BotDecision::check());
            }
            if call > pot * 0.3 {
                return Ok(BotDecision::fold());
            }
            if state.pot_odds().is_some_and(|odds| odds > 3.0) && strength > 0.25 {
                return Ok(BotDecision::call());
            }
            return Ok(BotDecision::fold());
        }

        // Medium hand.
        if strength < 0.7 {
            if state.can_check() {
                if aggression > 0.6 {
                    return Ok(raise_by(state, (pot * (0.5 + aggression * 0.3)) as u32));
                }
                return Ok(if rng.random_bool(0.5) {
                    raise_by(state, (pot * 0.5) as u32)
                } else {
                    BotDecision::check()
                });
            }
            if call < pot * 0.6 {
                if rng.random_bool(aggression) {
                    return Ok(raise_by(state, (pot * 0.6) as u32));
                }
                return Ok(BotDecision::call());
            }
            if strength > 0.6 && state.pot_odds().is_some_and(|odds| odds > 2.0) {
                return Ok(BotDecision::call());
            }
            return Ok(BotDecision::fold());
        }

        // Strong hand: maximize value.
        if state.can_check() {
            // Slow-play the nuts occasionally on early streets.
            if strength > 0.9 && !is_late_street && rng.random_bool(0.2) {
                return Ok(BotDecision::check());
            }
            return Ok(raise_by(state, (pot * (0.7 + aggression * 0.5)) as u32));
        }
        Ok(if rng.random_bool(0.85) {
            raise_by(state, (pot * (0.8 + aggression * 0.4)) as u32)
        } else {
            BotDecision::call()
        })
    }
}
