//! Raid-scoped undo log
//!
//! One log per team holding the reversible actions of that team's most recent
//! raid. Undo replays the log in reverse and then empties it, so a raid is
//! undone as a whole and only once.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{TeamSide, Teams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RaidAction {
    Score { points: u32, to_team: TeamSide },
    Out { team: TeamSide, player_index: usize },
    Revive { team: TeamSide, player_index: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoLog {
    actions: Vec<RaidAction>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: RaidAction) {
        self.actions.push(action);
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn actions(&self) -> &[RaidAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether any logged action put points on `side`'s score.
    pub fn scored_for(&self, side: TeamSide) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, RaidAction::Score { points, to_team } if *to_team == side && *points > 0))
    }

    /// Apply the inverse of every action, newest first, then empty the log.
    /// Returns the number of actions reversed.
    pub(crate) fn rollback(&mut self, teams: &mut Teams) -> usize {
        let reversed = self.actions.len();
        for action in self.actions.drain(..).rev() {
            match action {
                RaidAction::Score { points, to_team } => {
                    teams[to_team].subtract_score(points);
                }
                RaidAction::Out { team, player_index } => {
                    if let Some(player) = teams[team].players.get_mut(player_index) {
                        player.alive = true;
                    }
                }
                RaidAction::Revive { team, player_index } => {
                    if let Some(player) = teams[team].players.get_mut(player_index) {
                        player.alive = false;
                    }
                }
            }
        }
        reversed
    }
}
