//! Caller-facing error type for engine operations.

use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Storage error: {detail}")]
    Store { detail: String },
}

impl EngineError {
    /// Stable machine-readable code for any variant.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation { code, .. } => code,
            EngineError::NotFound { code, .. } => code,
            EngineError::Conflict { code, .. } => code,
            EngineError::Internal { .. } => "INTERNAL",
            EngineError::Store { .. } => "STORE_ERROR",
        }
    }

    pub fn invalid(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

fn validation_code(kind: &ValidationKind) -> &'static str {
    match kind {
        ValidationKind::OutOfTurn => "OUT_OF_TURN",
        ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
        ValidationKind::GameAlreadyStarted => "GAME_ALREADY_STARTED",
        ValidationKind::GameFull => "GAME_FULL",
        ValidationKind::AlreadyJoined => "ALREADY_JOINED",
        ValidationKind::NotInvited => "NOT_INVITED",
        ValidationKind::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
        ValidationKind::InvalidAction => "INVALID_ACTION",
        ValidationKind::RaiseBelowMinimum => "RAISE_BELOW_MINIMUM",
        ValidationKind::InvalidConfig => "INVALID_CONFIG",
        ValidationKind::ParseCard => "PARSE_CARD",
        _ => "VALIDATION",
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => EngineError::Validation {
                code: validation_code(&kind),
                detail,
            },
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    crate::errors::domain::NotFoundKind::Game => "GAME_NOT_FOUND",
                    crate::errors::domain::NotFoundKind::Player => "PLAYER_NOT_FOUND",
                    crate::errors::domain::NotFoundKind::User => "USER_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                EngineError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    crate::errors::domain::ConflictKind::SeatTaken => "SEAT_TAKEN",
                    crate::errors::domain::ConflictKind::RoomCodeConflict => "ROOM_CODE_CONFLICT",
                    _ => "CONFLICT",
                };
                EngineError::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::StoreUnavailable => EngineError::Store { detail },
                _ => EngineError::Internal { detail },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::domain::NotFoundKind;

    #[test]
    fn domain_errors_map_to_stable_codes() {
        let e: EngineError =
            DomainError::validation(ValidationKind::OutOfTurn, "not your turn").into();
        assert_eq!(e.code(), "OUT_OF_TURN");

        let e: EngineError = DomainError::not_found(NotFoundKind::Game, "game 9").into();
        assert_eq!(e.code(), "GAME_NOT_FOUND");

        let e: EngineError =
            DomainError::infra(InfraErrorKind::DataCorruption, "pot mismatch").into();
        assert_eq!(e.code(), "INTERNAL");
    }
}
