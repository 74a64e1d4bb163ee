//! The scenario: which areas the worlds visit, and in what order.

use serde::{Deserialize, Serialize};

/// One playable level: the area the player starts in and the halfway
/// checkpoint, expressed as a page nybble of the start area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Id of the area the level starts in.
    pub start_area: String,
    /// Page the player respawns on after dying past the halfway point.
    /// Zero means no checkpoint.
    #[serde(default)]
    pub checkpoint: u8,
}

impl Level {
    pub fn new(start_area: impl Into<String>) -> Self {
        Self {
            start_area: start_area.into(),
            checkpoint: 0,
        }
    }
}

/// One world: its levels plus the coin price of its hidden 1-up block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub levels: Vec<Level>,
    /// Coins that must be collected in level 1 for the hidden 1-up block
    /// to appear in level 2.
    #[serde(default)]
    pub hidden_1up_cost: u8,
}

/// The whole game's world/level ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub worlds: Vec<World>,
}

impl Scenario {
    /// Total number of levels across all worlds.
    pub fn level_count(&self) -> usize {
        self.worlds.iter().map(|w| w.levels.len()).sum()
    }
}
