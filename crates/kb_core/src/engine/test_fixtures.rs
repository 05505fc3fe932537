//! Test Fixtures Module
//!
//! Shared helpers for engine tests.
//!
//! ## Usage
//! ```rust,ignore
//! #[cfg(test)]
//! use crate::engine::test_fixtures::*;
//! ```

use super::config::RuleConfig;
use super::kabaddi_match::KabaddiMatch;
use crate::models::{MatchSetup, TeamSide, TossChoice, TossWinner};

pub const HOME: TeamSide = TeamSide::Home;
pub const AWAY: TeamSide = TeamSide::Away;

/// Seven-player setup, 20:00 halves, both toggles on, home raids first.
pub fn standard_setup() -> MatchSetup {
    MatchSetup {
        team1_name: "Bengal Warriors".to_string(),
        team2_name: "Patna Pirates".to_string(),
        team1_players: (1..=7).map(|i| format!("B{i}")).collect(),
        team2_players: (1..=7).map(|i| format!("P{i}")).collect(),
        toss_winner: TossWinner::Team1,
        toss_choice: TossChoice::Raid,
        half_duration: "20:00".to_string(),
        bonus_allowed: true,
        super_tackle_allowed: true,
    }
}

pub fn new_match() -> KabaddiMatch {
    KabaddiMatch::new(&standard_setup()).expect("standard setup is valid")
}

pub fn new_match_with(config: RuleConfig) -> KabaddiMatch {
    KabaddiMatch::with_config(&standard_setup(), config).expect("standard setup is valid")
}

/// Started first half, clock running.
pub fn live_match() -> KabaddiMatch {
    let mut m = new_match();
    m.start_match().expect("start");
    m
}

pub fn live_match_with(config: RuleConfig) -> KabaddiMatch {
    let mut m = new_match_with(config);
    m.start_match().expect("start");
    m
}

/// Open a raid for `side` with player `raider` selected.
pub fn open_raid(m: &mut KabaddiMatch, side: TeamSide, raider: usize) {
    m.start_raid(side).expect("start raid");
    m.select_player_at(side, raider).expect("select raider");
}

/// A complete raid by `side` in which nothing is scored.
pub fn empty_raid(m: &mut KabaddiMatch, side: TeamSide, raider: usize) {
    open_raid(m, side, raider);
    m.end_raid(side).expect("end raid");
}

/// Put `count` players of `side` out directly, bypassing the engine.
pub fn knock_out(m: &mut KabaddiMatch, side: TeamSide, count: usize) {
    for player in m.teams_mut_for_test()[side].players.iter_mut().take(count) {
        player.alive = false;
    }
}
