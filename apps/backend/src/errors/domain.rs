//! Domain-level error type used by the rules and the room orchestrator.
//!
//! This error type is transport-agnostic. Protocol violations are dropped
//! after logging; declare failures are broadcast using [`DomainError::reason`].
//! HTTP handlers convert through `From<DomainError> for AppError`.

use thiserror::Error;

/// Closed set of reasons an action can be refused.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    // Turn and phase protocol
    OutOfTurn,
    PhaseMismatch,
    MustDrawFirst,
    AlreadyDrew,
    EmptyPile,
    CardNotInHand,
    UnknownPlayer,
    NotEligible,
    RoomFull,
    // Declare payload
    NoMelds,
    InvalidCardCount,
    CardMismatch,
    // Meld structure
    NoPureSequence,
    NeedTwoSequences,
    InvalidGrouping,
    // Loser declare
    AlreadySubmitted,
    // Setup
    InvalidPlayerCount,
    ParseCard,
}

impl ValidationKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationKind::OutOfTurn => "OUT_OF_TURN",
            ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
            ValidationKind::MustDrawFirst => "MUST_DRAW_FIRST",
            ValidationKind::AlreadyDrew => "ALREADY_DREW",
            ValidationKind::EmptyPile => "EMPTY_PILE",
            ValidationKind::CardNotInHand => "CARD_NOT_IN_HAND",
            ValidationKind::UnknownPlayer => "UNKNOWN_PLAYER",
            ValidationKind::NotEligible => "NOT_ELIGIBLE",
            ValidationKind::RoomFull => "ROOM_FULL",
            ValidationKind::NoMelds => "NO_MELDS",
            ValidationKind::InvalidCardCount => "INVALID_CARD_COUNT",
            ValidationKind::CardMismatch => "CARD_MISMATCH",
            ValidationKind::NoPureSequence => "NO_PURE_SEQUENCE",
            ValidationKind::NeedTwoSequences => "NEED_TWO_SEQUENCES",
            ValidationKind::InvalidGrouping => "INVALID_GROUPING",
            ValidationKind::AlreadySubmitted => "ALREADY_SUBMITTED",
            ValidationKind::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            ValidationKind::ParseCard => "PARSE_CARD",
        }
    }

    /// Human-readable reason shown to every participant.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationKind::OutOfTurn => "Not your turn",
            ValidationKind::PhaseMismatch => "Action not allowed right now",
            ValidationKind::MustDrawFirst => "Must draw before discarding or declaring",
            ValidationKind::AlreadyDrew => "Already drew this turn",
            ValidationKind::EmptyPile => "Pile is empty",
            ValidationKind::CardNotInHand => "Card not in hand",
            ValidationKind::UnknownPlayer => "Not seated in this room",
            ValidationKind::NotEligible => "Not eligible for this action",
            ValidationKind::RoomFull => "Room is full or the match is in progress",
            ValidationKind::NoMelds => "No melds provided",
            ValidationKind::InvalidCardCount => "Invalid card count detected.",
            ValidationKind::CardMismatch => "Card mismatch error!",
            ValidationKind::NoPureSequence => "No pure sequence",
            ValidationKind::NeedTwoSequences => "At least two sequences are required",
            ValidationKind::InvalidGrouping => "Invalid groupings",
            ValidationKind::AlreadySubmitted => "Hand already submitted",
            ValidationKind::InvalidPlayerCount => "Invalid player count",
            ValidationKind::ParseCard => "Unrecognised card",
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input validation or rule violation
    #[error("validation error [{}]: {detail}", .kind.code())]
    Validation { kind: ValidationKind, detail: String },
    /// Broken internal invariant; never caused by client input alone
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation { kind, .. } => Some(kind),
            DomainError::Invariant(_) => None,
        }
    }

    /// Reason string suitable for a `result` broadcast.
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::Validation { kind, .. } => kind.reason(),
            DomainError::Invariant(_) => "Internal error",
        }
    }
}
