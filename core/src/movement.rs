use serde::{Deserialize, Serialize};

use crate::*;

/// Whether the visible region follows the player or pans independently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    PlayerCentered,
    FreeView,
}

impl ViewMode {
    pub const fn is_free(self) -> bool {
        matches!(self, Self::FreeView)
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::PlayerCentered
    }
}

/// The avatar: where the player stands and what they carry.
///
/// Never persisted; every session starts afresh.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: GeoPos,
    pub held: Option<Token>,
}

impl PlayerState {
    pub const fn at(pos: GeoPos) -> Self {
        Self { pos, held: None }
    }

    /// Grid cell the player currently occupies.
    pub fn cell(&self) -> CellId {
        self.pos.cell()
    }

    pub const fn is_empty_handed(&self) -> bool {
        self.held.is_none()
    }
}

/// Tracks the view mode and the independently panned center.
///
/// The stored center only matters in [`ViewMode::FreeView`]; while
/// player-centered, the effective center is the player and the stored value
/// is re-anchored on every toggle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewControl {
    mode: ViewMode,
    center: GeoPos,
}

impl ViewControl {
    pub const fn new(center: GeoPos) -> Self {
        Self {
            mode: ViewMode::PlayerCentered,
            center,
        }
    }

    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Flips the mode. Either way the view starts from the player: detaching
    /// into free pan picks up where the player-following view was, and
    /// returning snaps back onto the avatar.
    pub fn toggle(&mut self, player_pos: GeoPos) -> ViewMode {
        self.center = player_pos;
        self.mode = match self.mode {
            ViewMode::PlayerCentered => ViewMode::FreeView,
            ViewMode::FreeView => ViewMode::PlayerCentered,
        };
        self.mode
    }

    /// Center the next region query should use.
    pub fn effective_center(&self, player_pos: GeoPos) -> GeoPos {
        match self.mode {
            ViewMode::PlayerCentered => player_pos,
            ViewMode::FreeView => self.center,
        }
    }

    pub(crate) fn pan(&mut self, dlat: f64, dlng: f64) {
        self.center = self.center.translated(dlat, dlng);
    }
}
