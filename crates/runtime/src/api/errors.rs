//! Unified error types surfaced by the runtime API.
//!
//! Engine-level rule violations never reach callers; they are logged and
//! dropped inside the match worker. What remains here are coordination
//! failures and rejected authority checks.
use thiserror::Error;
use tokio::sync::oneshot;

use super::inbound::Caller;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{caller} may not issue {command}")]
    Unauthorized {
        caller: Caller,
        command: &'static str,
    },

    #[error("match worker command channel closed")]
    CommandChannelClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
