//! Empty-raid streak tracking and do-or-die escalation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::RuleConfig;
use crate::models::TeamSide;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EmptyRaidCounter {
    pub consecutive_empty_raids: u8,
    pub do_or_die_pending: bool,
}

/// Result of closing a raid, from the streak's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyRaidOutcome {
    /// The raiding team scored
    Scored,
    /// Empty raid, streak now at `streak`
    Counted { streak: u8 },
    /// Empty do-or-die raid; raider must be put out
    DoOrDieFailed,
    /// Streak hit the strike limit; raider must be put out
    StrikeOut,
}

impl EmptyRaidOutcome {
    pub fn requires_auto_out(&self) -> bool {
        matches!(self, EmptyRaidOutcome::DoOrDieFailed | EmptyRaidOutcome::StrikeOut)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyRaidTracker {
    counters: [EmptyRaidCounter; 2],
}

impl EmptyRaidTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, side: TeamSide) -> EmptyRaidCounter {
        self.counters[side.index()]
    }

    /// Called right before `side` starts a raid. Returns whether it is do-or-die.
    pub fn before_raid(&mut self, side: TeamSide, rules: &RuleConfig) -> bool {
        let counter = &mut self.counters[side.index()];
        if let Some(after) = rules.do_or_die_after {
            if counter.consecutive_empty_raids >= after {
                counter.do_or_die_pending = true;
                // the escalation owns this streak now; no strike-out on top
                counter.consecutive_empty_raids = 0;
                log::info!("Do-or-die raid for {} team", side);
            }
        }
        counter.do_or_die_pending
    }

    /// The raiding team just scored.
    pub fn record_score(&mut self, side: TeamSide) {
        self.counters[side.index()] = EmptyRaidCounter::default();
    }

    pub fn close_raid(&mut self, side: TeamSide, empty: bool, rules: &RuleConfig) -> EmptyRaidOutcome {
        let counter = &mut self.counters[side.index()];

        if !empty {
            *counter = EmptyRaidCounter::default();
            return EmptyRaidOutcome::Scored;
        }

        if counter.do_or_die_pending {
            *counter = EmptyRaidCounter::default();
            return EmptyRaidOutcome::DoOrDieFailed;
        }

        counter.consecutive_empty_raids += 1;
        if counter.consecutive_empty_raids >= rules.empty_raid_strike_limit {
            counter.consecutive_empty_raids = 0;
            return EmptyRaidOutcome::StrikeOut;
        }
        EmptyRaidOutcome::Counted { streak: counter.consecutive_empty_raids }
    }
}
