use super::PlayerId;

/// Whose turn it is. Maintained by the turn orchestrator via `begin_turn`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub active_player: Option<PlayerId>,
}

impl TurnState {
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.active_player == Some(player)
    }
}
