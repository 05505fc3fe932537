//! Open-raid state and per-team scoring controls.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::TeamSide;

/// Exists only while a raid is open. Its actions live in the raiding team's
/// undo log so they stay undoable after the raid closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RaidState {
    pub raiding_team: TeamSide,
    /// Last raider selected during this raid (auto-out target)
    pub raider: Option<usize>,
    pub do_or_die: bool,
    /// 1-based raid number in the match
    pub number: u32,
}

impl RaidState {
    pub fn defending_team(&self) -> TeamSide {
        self.raiding_team.opponent()
    }
}

/// Dropdown selection and foul checkbox for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TeamControls {
    pub selected: Option<usize>,
    pub foul: bool,
}

impl TeamControls {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
