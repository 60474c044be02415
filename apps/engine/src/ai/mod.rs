//! Bot decision engine: one implementation per difficulty tier behind
//! the `BotPlayer` trait.

pub mod easy;
pub mod hard;
pub mod medium;
pub mod names;
pub mod strength;
pub mod trait_def;

use crate::domain::state::Chips;
use crate::domain::VisibleGameState;
use crate::repos::BotDifficulty;

pub use easy::EasyBot;
pub use hard::HardBot;
pub use medium::MediumBot;
pub use names::bot_name;
pub use strength::hand_strength;
pub use trait_def::{BotDecision, BotError, BotPlayer};

/// Build the bot for a difficulty tier. `seed` pins the RNG for
/// reproducible play in tests.
pub fn create_bot(difficulty: BotDifficulty, seed: Option<u64>) -> Box<dyn BotPlayer> {
    match difficulty {
        BotDifficulty::Easy => Box::new(EasyBot::new(seed)),
        BotDifficulty::Medium => Box::new(MediumBot::new(seed)),
        BotDifficulty::Hard => Box::new(HardBot::new(seed)),
    }
}

/// Turn a desired extra wager into a legal decision.
///
/// The target total is clamped up to the table minimum raise; when the
/// stack cannot cover a full raise the decision becomes a shove instead,
/// so bots never propose an amount the engine would reject.
pub(crate) fn raise_by(state: &VisibleGameState, extra: Chips) -> BotDecision {
    let target = (state.current_bet + extra.max(state.big_blind)).max(state.min_raise_to());
    if target >= state.max_raise_to() {
        BotDecision::all_in()
    } else {
        BotDecision::raise_to(target)
    }
}
