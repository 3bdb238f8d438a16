pub mod actor;
pub mod common;
pub mod player;
pub mod turn;

pub use actor::{ActorKind, ActorSpec, ActorState, OnDeath};
pub use common::{ActorId, Facing, ItemId, MarkerId, PlayerId, SessionId, Vec3};
pub use player::PlayerState;
pub use turn::TurnState;
