//! Easy bot: random-leaning decisions with basic hand awareness.

use std::sync::Mutex;

use rand::prelude::*;

use super::strength::hand_strength;
use super::trait_def::{BotDecision, BotError, BotPlayer};
use super::raise_by;
use crate::domain::VisibleGameState;

pub struct EasyBot {
    rng: Mutex<StdRng>,
}

impl EasyBot {
    pub const NAME: &'static str = "easy";

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

impl BotPlayer for EasyBot {
    fn decide(&self, state: &VisibleGameState) -> Result<BotDecision, BotError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| BotError::Internal("rng poisoned".into()))?;
        let strength = hand_strength(&state.hole_cards, &state.community_cards);
        let pot = state.pot as f64;

        // Very weak hand: mostly fold when facing a bet.
        if strength < 0.3 {
            if state.can_check() {
                return Ok(BotDecision::check());
            }
            return Ok(if rng.random_bool(0.2) {
                BotDecision::call()
            } else {
                BotDecision::fold()
            });
        }

        // Medium hand: call or check.
        if strength < 0.6 {
            if state.can_check() {
                return Ok(BotDecision::check());
            }
            return Ok(if rng.random_bool(0.6) {
                BotDecision::call()
            } else {
                BotDecision::fold()
            });
        }

        // Strong hand: call or a small raise.
        if state.can_check() {
            return Ok(if rng.random_bool(0.3) {
                raise_by(state, (pot * 0.3) as u32)
            } else {
                BotDecision::check()
            });
        }
        Ok(if rng.random_bool(0.7) {
            BotDecision::call()
        } else {
            raise_by(state, (pot * 0.3) as u32)
        })
    }
}
