//! Requests a session can send to the authoritative match.
//!
//! Every request travels inside an [`Envelope`] naming its [`Caller`]. The
//! [`crate::router::AuthorityRouter`] checks the caller against the request's
//! declared [`Authority`] before the match worker runs it.
use std::fmt;

use serde::{Deserialize, Serialize};
use skirmish_core::{
    ActorId, ActorSpec, DamageInfo, InputFrame, ItemId, ItemTemplate, PlayerId, SessionId,
    UsePhase,
};

/// Origin of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Caller {
    /// The hosting process itself.
    Host,
    /// A connected (or formerly connected) session.
    Session(SessionId),
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caller::Host => write!(f, "host"),
            Caller::Session(session) => write!(f, "{session}"),
        }
    }
}

/// What a request operates on, for ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Actor(ActorId),
    Player(PlayerId),
}

/// Who may issue a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// Only the host.
    Host,
    /// The session owning the subject. Objects and unknown subjects fall
    /// back to the host.
    Owner(Subject),
    /// Any registered session or the host. The effect is mirrored on every
    /// observer.
    Broadcast,
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Inbound {
    SpawnActor(ActorSpec),
    Despawn {
        actor: ActorId,
    },
    Mount {
        actor: ActorId,
        mount: Option<ActorId>,
    },
    RegisterPlayer {
        player: PlayerId,
        name: String,
        session: SessionId,
    },
    Disconnect {
        session: SessionId,
    },
    BeginTurn {
        player: PlayerId,
    },
    ReportDamage {
        actor: ActorId,
        info: DamageInfo,
        immediate: bool,
    },
    FlushQueue {
        actor: ActorId,
    },
    Heal {
        actor: ActorId,
        amount: f32,
    },
    InitializeInventory {
        player: PlayerId,
        templates: Vec<ItemTemplate>,
    },
    EquipItem {
        player: PlayerId,
        item: ItemId,
    },
    CycleSlot {
        player: PlayerId,
        forward: bool,
    },
    PollInput {
        player: PlayerId,
        frame: InputFrame,
    },
    RecordItemUse {
        player: PlayerId,
        slot: usize,
        phase: UsePhase,
    },
    Equip {
        player: PlayerId,
        slot: usize,
    },
    Holster {
        player: PlayerId,
        slot: usize,
    },
    HolsterActive {
        player: PlayerId,
    },
}

impl Inbound {
    pub fn authority(&self) -> Authority {
        use Inbound::*;

        match self {
            SpawnActor(_)
            | Despawn { .. }
            | Mount { .. }
            | RegisterPlayer { .. }
            | Disconnect { .. }
            | BeginTurn { .. } => Authority::Host,

            ReportDamage { actor, .. } | FlushQueue { actor } | Heal { actor, .. } => {
                Authority::Owner(Subject::Actor(*actor))
            }

            InitializeInventory { player, .. }
            | EquipItem { player, .. }
            | CycleSlot { player, .. }
            | PollInput { player, .. }
            | RecordItemUse { player, .. } => Authority::Owner(Subject::Player(*player)),

            Equip { .. } | Holster { .. } | HolsterActive { .. } => Authority::Broadcast,
        }
    }

    /// Short snake_case label for logs and errors.
    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// A request together with its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub caller: Caller,
    pub command: Inbound,
}

impl Envelope {
    pub fn new(caller: Caller, command: Inbound) -> Self {
        Self { caller, command }
    }

    pub fn host(command: Inbound) -> Self {
        Self::new(Caller::Host, command)
    }

    pub fn from_session(session: SessionId, command: Inbound) -> Self {
        Self::new(Caller::Session(session), command)
    }
}
