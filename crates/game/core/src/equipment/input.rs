//! Abstract input intents polled once per update by the owning session.

/// Intents observed during one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputFrame {
    pub toggle_inventory: bool,
    pub cycle_next: bool,
    pub cycle_previous: bool,
    /// Release of the gamepad gesture that closes the inventory browser.
    pub close_gesture_released: bool,
    /// Gamepad in use; the close gesture is ignored otherwise.
    pub using_controller: bool,
}

impl InputFrame {
    pub fn toggle() -> Self {
        Self {
            toggle_inventory: true,
            ..Self::default()
        }
    }

    pub fn next() -> Self {
        Self {
            cycle_next: true,
            ..Self::default()
        }
    }

    pub fn previous() -> Self {
        Self {
            cycle_previous: true,
            ..Self::default()
        }
    }

    /// Gamepad close gesture.
    pub fn controller_close() -> Self {
        Self {
            close_gesture_released: true,
            using_controller: true,
            ..Self::default()
        }
    }
}

/// Inventory-browser UI flags. Local to the owning session, not replicated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrowseState {
    pub open: bool,
    /// Set for exactly one update after a gesture close.
    pub closing: bool,
}
