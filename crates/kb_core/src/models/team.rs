//! Team / Player roster model
//!
//! 팀 정체성(home/away)은 경기 내내 고정. 선수 정체성은 로스터 내 순서(index)이며
//! 이름은 중복될 수 있다.

use std::fmt;
use std::ops::{Index, IndexMut};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// TeamSide
// ============================================================================

/// 팀 사이드 (home = setup team1, away = setup team2)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    /// 상대 팀 반환
    #[inline]
    pub fn opponent(&self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// 팀 인덱스 (0 = Home, 1 = Away)
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "home"),
            TeamSide::Away => write!(f, "away"),
        }
    }
}

// ============================================================================
// Point categories
// ============================================================================

/// Summary bucket a point award is booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PointCategory {
    Raid,
    Tackle,
    AllOut,
    Extra,
}

// ============================================================================
// Player
// ============================================================================

/// Per-player tallies shown on the match summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerStats {
    pub raid: u32,
    pub tackle: u32,
    pub extra: u32,
}

impl PlayerStats {
    pub fn total(&self) -> u32 {
        self.raid + self.tackle + self.extra
    }

    pub(crate) fn credit(&mut self, category: PointCategory, points: u32) {
        match category {
            PointCategory::Raid => self.raid += points,
            PointCategory::Tackle => self.tackle += points,
            // all-out points belong to the team, never to a player
            PointCategory::AllOut => {}
            PointCategory::Extra => self.extra += points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub name: String,
    pub alive: bool,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), alive: true, stats: PlayerStats::default() }
    }
}

// ============================================================================
// Team
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    pub score: u32,
    pub raid_points: u32,
    pub tackle_points: u32,
    pub allout_points: u32,
    pub extra_points: u32,
    pub all_out_count: u32,
}

impl Team {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, players: &[S]) -> Self {
        Self {
            name: name.into(),
            players: players.iter().map(|p| Player::new(p.as_ref())).collect(),
            score: 0,
            raid_points: 0,
            tackle_points: 0,
            allout_points: 0,
            extra_points: 0,
            all_out_count: 0,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    pub fn out_count(&self) -> usize {
        self.players.len() - self.alive_count()
    }

    /// First out player in roster order.
    pub fn first_out_index(&self) -> Option<usize> {
        self.players.iter().position(|p| !p.alive)
    }

    /// First alive player with the given name.
    pub fn find_alive(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.alive && p.name == name)
    }

    pub fn find_any(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn is_all_out(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| !p.alive)
    }

    /// Add points to the score and to the category total.
    pub(crate) fn add_points(&mut self, category: PointCategory, points: u32) {
        self.score += points;
        match category {
            PointCategory::Raid => self.raid_points += points,
            PointCategory::Tackle => self.tackle_points += points,
            PointCategory::AllOut => self.allout_points += points,
            PointCategory::Extra => self.extra_points += points,
        }
    }

    /// Score-only subtraction used by undo; clamps at zero.
    pub(crate) fn subtract_score(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }
}

// ============================================================================
// Teams (home, away) pair
// ============================================================================

/// Exactly two teams, indexed by [`TeamSide`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Teams {
    pub home: Team,
    pub away: Team,
}

impl Teams {
    pub fn new(home: Team, away: Team) -> Self {
        Self { home, away }
    }
}

impl Index<TeamSide> for Teams {
    type Output = Team;

    fn index(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

impl IndexMut<TeamSide> for Teams {
    fn index_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }
}
