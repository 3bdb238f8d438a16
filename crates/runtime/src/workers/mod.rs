//! Worker tasks that back the runtime orchestration.
//!
//! The match worker owns the authoritative state; timers for staged deaths
//! run as short-lived tasks that report back to it.

mod match_worker;

pub use match_worker::{Command, MatchWorker};
