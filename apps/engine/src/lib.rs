#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod notify;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for the public API
pub use adapters::InMemoryStore;
pub use config::{BotSettings, GameConfig, GameVisibility};
pub use domain::{ActionKind, Card, Chips, GameId, PlayerId, Rank, Suit, UserId};
pub use error::EngineError;
pub use notify::{BroadcastNotifier, GameEvent, GameNotifier, NoopNotifier};
pub use repos::{BotDifficulty, GameStore};
pub use services::{BotRequest, GameFlowService, GameSnapshot};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    telemetry::init_tracing();
}
