//! Roster Manager
//!
//! Applies the out / revive / all-out rules to the two rosters. Every change
//! is appended to the raid's [`UndoLog`] so the raid can be rolled back
//! exactly.
//!
//! ## Out sequence (atomic)
//! 1. target player -> out (`Out`)
//! 2. opponent: first out player in roster order -> revived (`Revive`)
//! 3. acting team entirely out -> all revived (`Revive` each) and the
//!    opponent scores the all-out points (`Score`)

use super::config::RuleConfig;
use super::undo_log::{RaidAction, UndoLog};
use crate::error::{MatchError, Result};
use crate::models::{PointCategory, TeamSide, Teams};

/// What a single `mark_out` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutOutcome {
    pub revived_opponent: Option<usize>,
    pub all_out: bool,
    /// Points handed to the opponent by an all-out
    pub all_out_points: u32,
}

pub struct RosterManager<'a> {
    teams: &'a mut Teams,
    rules: &'a RuleConfig,
}

impl<'a> RosterManager<'a> {
    pub fn new(teams: &'a mut Teams, rules: &'a RuleConfig) -> Self {
        Self { teams, rules }
    }

    pub fn mark_out(
        &mut self,
        side: TeamSide,
        player_index: usize,
        log: &mut UndoLog,
    ) -> Result<OutOutcome> {
        let player = self.teams[side].players.get(player_index).ok_or_else(|| {
            MatchError::PlayerNotFound { team: side, player: format!("#{player_index}") }
        })?;
        if !player.alive {
            return Err(MatchError::AlreadyOut { team: side, player_index });
        }

        self.teams[side].players[player_index].alive = false;
        log.push(RaidAction::Out { team: side, player_index });

        let opponent = side.opponent();
        let mut outcome = OutOutcome {
            revived_opponent: self.revive_one(opponent, log),
            ..OutOutcome::default()
        };

        if self.teams[side].is_all_out() {
            self.apply_all_out(side, log);
            outcome.all_out = true;
            outcome.all_out_points = self.rules.all_out_points;
        }

        Ok(outcome)
    }

    /// Revive the first out player of `side`, if any.
    fn revive_one(&mut self, side: TeamSide, log: &mut UndoLog) -> Option<usize> {
        let idx = self.teams[side].first_out_index()?;
        self.teams[side].players[idx].alive = true;
        log.push(RaidAction::Revive { team: side, player_index: idx });
        Some(idx)
    }

    fn apply_all_out(&mut self, side: TeamSide, log: &mut UndoLog) {
        let opponent = side.opponent();
        let points = self.rules.all_out_points;

        for (idx, player) in self.teams[side].players.iter_mut().enumerate() {
            player.alive = true;
            log.push(RaidAction::Revive { team: side, player_index: idx });
        }
        self.teams[opponent].add_points(PointCategory::AllOut, points);
        log.push(RaidAction::Score { points, to_team: opponent });
        self.teams[side].all_out_count += 1;

        log::info!(
            "All out: {} revived in full, {} +{}",
            self.teams[side].name,
            self.teams[opponent].name,
            points
        );
    }
}
