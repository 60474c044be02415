//! Medium bot: weighs hand strength against pot odds.

use std::sync::Mutex;

use rand::prelude::*;

use super::strength::hand_strength;
use super::trait_def::{BotDecision, BotError, BotPlayer};
use super::raise_by;
use crate::domain::VisibleGameState;

pub struct MediumBot {
    rng: Mutex<StdRng>,
}

impl MediumBot {
    pub const NAME: &'static str = "medium";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl BotPlayer for MediumBot {
    fn decide(&self, state: &VisibleGameState) -> Result<BotDecision, BotError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| BotError::Internal("rng poisoned".into()))?;
        let strength = hand_strength(&state.hole_cards, &state.community_cards);
        let pot = state.pot as f64;
        let call = state.call_amount() as f64;

        // Weak hand: only peel tiny bets with a little equity.
        if strength < 0.4 {
            if state.can_check() {
                return Ok(BotDecision::check());
            }
            if call < pot * 0.2 && strength > 0.25 {
                return Ok(BotDecision::call());
            }
            return Ok(BotDecision::fold());
        }

        // Medium hand.
        if strength < 0.7 {
            if state.can_check() {
                return Ok(if rng.random_bool(0.4) {
                    raise_by(state, (pot * 0.5) as u32)
                } else {
                    BotDecision::check()
                });
            }
            if call < pot * 0.5 {
                return Ok(BotDecision::call());
            }
            return Ok(if rng.random_bool(0.3) {
                BotDecision::call()
            } else {
                BotDecision::fold()
            });
        }

        // Strong hand: bet for value.
        if state.can_check() {
            return Ok(raise_by(state, (pot * 0.7) as u32));
        }
        Ok(if rng.random_bool(0.8) {
            raise_by(state, (pot * 0.7) as u32)
        } else {
            BotDecision::call()
        })
    }
}
