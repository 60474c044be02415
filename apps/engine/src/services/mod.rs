//! Orchestration services over the domain layer.

pub mod game_flow;

pub use game_flow::{
    ActionView, AdminSnapshot, BotRequest, GameFlowService, GameSnapshot, PlayerSnapshot,
};
