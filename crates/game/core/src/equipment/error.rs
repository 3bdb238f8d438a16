use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemId, PlayerId};

/// Reasons an inventory request did nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("{player}: nothing at slot {slot}")]
    EmptySlot { player: PlayerId, slot: usize },

    #[error("{player}: {item} is not in the inventory")]
    UnknownItem { player: PlayerId, item: ItemId },

    #[error("{player}: {reason}")]
    TurnViolation {
        player: PlayerId,
        reason: &'static str,
    },

    #[error("{player}: {item} is in use and cannot be swapped")]
    SwapBlocked { player: PlayerId, item: ItemId },

    #[error("{player}: inventory setup failed: {reason}")]
    SetupFailure {
        player: PlayerId,
        reason: &'static str,
    },

    #[error("{player} is not valid or has no active actor")]
    InvalidPlayer { player: PlayerId },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptySlot { .. } | Self::UnknownItem { .. } => ErrorSeverity::Validation,
            Self::TurnViolation { .. } | Self::SwapBlocked { .. } | Self::InvalidPlayer { .. } => {
                ErrorSeverity::Silent
            }
            Self::SetupFailure { .. } => ErrorSeverity::Setup,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySlot { .. } => "EMPTY_SLOT",
            Self::UnknownItem { .. } => "UNKNOWN_ITEM",
            Self::TurnViolation { .. } => "TURN_VIOLATION",
            Self::SwapBlocked { .. } => "SWAP_BLOCKED",
            Self::SetupFailure { .. } => "SETUP_FAILURE",
            Self::InvalidPlayer { .. } => "INVALID_PLAYER",
        }
    }
}
