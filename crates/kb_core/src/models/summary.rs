use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::team::Team;

/// Winner text shown when both teams finish level.
pub const TIE: &str = "Tie";

/// Per-category point totals for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PointBreakdown {
    pub raid: u32,
    pub tackle: u32,
    pub allout: u32,
    pub extra: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerSummary {
    pub name: String,
    pub raid: u32,
    pub tackle: u32,
    pub extra: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TeamSummary {
    pub name: String,
    pub score: u32,
    pub points: PointBreakdown,
    pub players: Vec<PlayerSummary>,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            score: team.score,
            points: PointBreakdown {
                raid: team.raid_points,
                tackle: team.tackle_points,
                allout: team.allout_points,
                extra: team.extra_points,
            },
            players: team
                .players
                .iter()
                .map(|p| PlayerSummary {
                    name: p.name.clone(),
                    raid: p.stats.raid,
                    tackle: p.stats.tackle,
                    extra: p.stats.extra,
                    total: p.stats.total(),
                })
                .collect(),
        }
    }
}

/// End-of-match (or running) summary for the summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSummary {
    pub team1: TeamSummary,
    pub team2: TeamSummary,
    /// Phase label, e.g. "Second Half"
    pub phase: String,
    pub timer: String,
    /// Set once the match has ended: a team name or "Tie"
    pub winner: Option<String>,
}

/// Winner by score comparison.
pub fn decide_winner(team1: &Team, team2: &Team) -> String {
    match team1.score.cmp(&team2.score) {
        std::cmp::Ordering::Greater => team1.name.clone(),
        std::cmp::Ordering::Less => team2.name.clone(),
        std::cmp::Ordering::Equal => TIE.to_string(),
    }
}
