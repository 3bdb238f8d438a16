use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, PlayerId, SessionId};

/// Reasons a combat or match-setup request did nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    /// Actor was destroyed or never existed; expected under network races.
    #[error("{actor} is not a valid actor")]
    InvalidActor { actor: ActorId },

    #[error("{player} is not registered")]
    UnknownPlayer { player: PlayerId },

    #[error("{session} has no registered player")]
    UnknownSession { session: SessionId },

    #[error("{actor} already exists")]
    DuplicateActor { actor: ActorId },

    /// Reported amount was negative or not a number.
    #[error("damage against {actor} must be a non-negative amount")]
    InvalidDamage { actor: ActorId },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidActor { .. } => ErrorSeverity::Silent,
            Self::UnknownPlayer { .. }
            | Self::UnknownSession { .. }
            | Self::DuplicateActor { .. }
            | Self::InvalidDamage { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidActor { .. } => "INVALID_ACTOR",
            Self::UnknownPlayer { .. } => "UNKNOWN_PLAYER",
            Self::UnknownSession { .. } => "UNKNOWN_SESSION",
            Self::DuplicateActor { .. } => "DUPLICATE_ACTOR",
            Self::InvalidDamage { .. } => "INVALID_DAMAGE",
        }
    }
}
