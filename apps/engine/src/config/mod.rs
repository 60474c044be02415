pub mod game;

pub use game::{BotSettings, GameConfig, GameVisibility, MAX_PLAYERS, MIN_PLAYERS};
