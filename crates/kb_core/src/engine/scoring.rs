//! Scoring Engine
//!
//! Turns a button press into a point award. Pure: it reads roster counts and
//! rule toggles and never mutates the match. Applying the award (score,
//! tallies, undo log, streak reset) is the aggregate's job.

use serde::{Deserialize, Serialize};

use super::config::RuleConfig;
use crate::error::{MatchError, Result};
use crate::models::{MatchRules, PointCategory};

/// Points and the summary bucket they go in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAward {
    pub points: u32,
    pub category: PointCategory,
}

pub struct ScoringEngine<'a> {
    config: &'a RuleConfig,
    rules: MatchRules,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(config: &'a RuleConfig, rules: MatchRules) -> Self {
        Self { config, rules }
    }

    /// Raid-points button (1..=max). With the foul flag the value is booked
    /// as extra points.
    pub fn raid_points(&self, button: u8, foul: bool) -> Result<ScoreAward> {
        if button == 0 || button > self.config.max_raid_points {
            return Err(MatchError::precondition(format!(
                "raid points must be 1..={}, got {}",
                self.config.max_raid_points, button
            )));
        }

        let points = u32::from(button);
        if foul {
            let extra = if self.config.foul_bonus_point { 1 } else { 0 };
            return Ok(ScoreAward { points: points + extra, category: PointCategory::Extra });
        }
        Ok(ScoreAward { points, category: PointCategory::Raid })
    }

    pub fn bonus(&self, defenders_alive: usize) -> Result<ScoreAward> {
        if !self.rules.bonus_allowed {
            return Err(MatchError::precondition("bonus is disabled for this match"));
        }
        if defenders_alive < self.config.bonus_min_defenders {
            return Err(MatchError::precondition(format!(
                "bonus needs {} defenders alive, found {}",
                self.config.bonus_min_defenders, defenders_alive
            )));
        }
        Ok(ScoreAward { points: self.config.bonus_points, category: PointCategory::Raid })
    }

    /// `tacklers_alive` is the tackling team's own alive count.
    pub fn tackle(&self, tacklers_alive: usize) -> ScoreAward {
        let points = if self.is_super_tackle(tacklers_alive) {
            self.config.super_tackle_points
        } else {
            self.config.tackle_points
        };
        ScoreAward { points, category: PointCategory::Tackle }
    }

    pub fn is_super_tackle(&self, tacklers_alive: usize) -> bool {
        self.rules.super_tackle_allowed && tacklers_alive <= self.config.super_tackle_max_defenders
    }
}
