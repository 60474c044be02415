//! Domain-level error type used across services and adapters.
//!
//! This error type is transport- and storage-agnostic. Public engine
//! operations return `Result<T, crate::error::EngineError>` and convert
//! from `DomainError` via the provided `From` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failures a caller can correct.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    PhaseMismatch,
    GameAlreadyStarted,
    GameFull,
    AlreadyJoined,
    NotInvited,
    InsufficientPlayers,
    InvalidAction,
    RaiseBelowMinimum,
    InvalidConfig,
    ParseCard,
    Other(String),
}

/// Infra error kinds to distinguish operational failures.
///
/// `DataCorruption` doubles as the integrity-violation kind: a state the
/// engine's own invariants forbid (pot mismatch, deck underflow, missing
/// turn player). Such errors abort the transaction rather than being
/// patched over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Game,
    Player,
    Other(String),
}

/// Domain-level conflict kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SeatTaken,
    RoomCodeConflict,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures and integrity violations
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn parse_card(token: &str) -> Self {
        Self::Validation(ValidationKind::ParseCard, format!("invalid card token: {token:?}"))
    }

    /// True for integrity violations that indicate an engine bug.
    pub fn is_integrity(&self) -> bool {
        matches!(self, DomainError::Infra(InfraErrorKind::DataCorruption, _))
    }
}
