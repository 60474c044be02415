//! Transport collaborator seam.
//!
//! The engine never talks to sockets; it emits fire-and-forget change
//! notifications through an injected `GameNotifier` after every committed
//! action and phase transition. Delivery is best-effort and unconfirmed.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::state::GameId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameChanged { game_id: GameId },
}

pub trait GameNotifier: Send + Sync {
    fn notify_game_changed(&self, game_id: GameId);
}

/// Notifier that drops every event; used in tests and batch tooling.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl GameNotifier for NoopNotifier {
    fn notify_game_changed(&self, _game_id: GameId) {}
}

/// Notifier backed by a tokio broadcast channel. The embedding transport
/// subscribes and fans events out to observers; a lagging or absent
/// subscriber never blocks the engine.
#[derive(Debug)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<GameEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.tx.subscribe()
    }
}

impl GameNotifier for BroadcastNotifier {
    fn notify_game_changed(&self, game_id: GameId) {
        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.tx.send(GameEvent::GameChanged { game_id });
    }
}
