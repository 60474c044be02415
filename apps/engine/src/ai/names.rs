//! Generated display names for bot seats.

use crate::repos::BotDifficulty;

const EASY_NAMES: [&str; 4] = ["Beginner", "Rookie", "Amateur", "Casual"];
const MEDIUM_NAMES: [&str; 4] = ["Semi Pro", "Expert", "Veteran", "Regular"];
const HARD_NAMES: [&str; 4] = ["Master", "Pro", "Champion", "Legend"];

/// Display name for the `index`-th bot of a tier (0-based insertion order).
pub fn bot_name(difficulty: BotDifficulty, index: usize) -> String {
    let names = match difficulty {
        BotDifficulty::Easy => &EASY_NAMES,
        BotDifficulty::Medium => &MEDIUM_NAMES,
        BotDifficulty::Hard => &HARD_NAMES,
    };
    format!("{}{}", names[index % names.len()], index + 1)
}
