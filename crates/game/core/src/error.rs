//! Common error infrastructure for skirmish-core.
//!
//! Domain-specific errors (`CombatError`, `InventoryError`) live next to the
//! code that raises them. None of them is fatal to the process: the engine
//! logs each one at the level its severity suggests and carries on, because
//! most of them are expected under network races (an actor dying mid-broadcast,
//! a stale equip request).

/// Severity level of an error, used for logging and recovery decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected under races; silently ignored.
    Silent,

    /// Request referenced something that does not exist; logged as a warning.
    Validation,

    /// Setup could not complete; logged as an error, remaining setup aborted.
    Setup,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Validation => "validation",
            Self::Setup => "setup",
        }
    }

    /// Returns true if callers should not even log this error above debug.
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::Silent)
    }
}

/// Common trait for all skirmish-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, useful in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Emits a `tracing` record for `error` according to its severity.
pub fn log_error<E: GameError>(operation: &'static str, error: &E) {
    match error.severity() {
        ErrorSeverity::Silent => {
            tracing::debug!(operation, code = error.error_code(), "{error}");
        }
        ErrorSeverity::Validation => {
            tracing::warn!(operation, code = error.error_code(), "{error}");
        }
        ErrorSeverity::Setup => {
            tracing::error!(operation, code = error.error_code(), "{error}");
        }
    }
}
