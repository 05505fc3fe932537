//! Immutable render snapshot of a match.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clock::Countdown;
use super::empty_raid::EmptyRaidCounter;
use super::match_phase::MatchPhase;
use super::raid::TeamControls;
use super::undo_log::RaidAction;
use crate::models::{MatchRules, Team, TeamSide, Toss};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClockSnapshot {
    pub remaining_seconds: u32,
    pub running: bool,
    /// "mm:ss"
    pub text: String,
}

impl From<&Countdown> for ClockSnapshot {
    fn from(clock: &Countdown) -> Self {
        Self {
            remaining_seconds: clock.remaining_seconds,
            running: clock.running,
            text: clock.text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TeamSnapshot {
    #[serde(flatten)]
    pub team: Team,
    pub alive_count: usize,
    pub empty_raids: EmptyRaidCounter,
    pub controls: TeamControls,
    /// Actions of this team's last raid still available to undo
    pub undo_available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RaidSnapshot {
    pub raiding_team: TeamSide,
    pub number: u32,
    pub raider: Option<usize>,
    pub do_or_die: bool,
    pub actions: Vec<RaidAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub phase_end_pending: bool,
    pub home: TeamSnapshot,
    pub away: TeamSnapshot,
    pub match_clock: ClockSnapshot,
    pub raid_clock: ClockSnapshot,
    pub timeout_clock: ClockSnapshot,
    pub half_duration_seconds: u32,
    pub raid: Option<RaidSnapshot>,
    pub next_raider: TeamSide,
    pub toss: Toss,
    pub rules: MatchRules,
}

impl MatchSnapshot {
    pub fn team(&self, side: TeamSide) -> &TeamSnapshot {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}
