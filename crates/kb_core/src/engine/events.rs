//! Match timeline events, consumed by the renderer for banners and toasts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clock::ClockEvent;
use super::empty_raid::EmptyRaidOutcome;
use super::match_phase::MatchPhase;
use crate::models::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    PhaseChanged { phase: MatchPhase },
    RaidStarted { team: TeamSide, number: u32, do_or_die: bool },
    RaidEnded { team: TeamSide, number: u32, outcome: EmptyRaidOutcome, expired: bool },
    AllOut { team: TeamSide, points: u32 },
    AutoOut { team: TeamSide, player_index: usize },
    ClockExpired { clock: ClockEvent },
    RaidUndone { team: TeamSide, actions: usize },
    TimeoutStarted,
}
