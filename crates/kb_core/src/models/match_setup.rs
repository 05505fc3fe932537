//! Match Setup
//!
//! 경기 시작 전 설정 화면이 넘겨주는 데이터. 경기 중에는 읽기 전용.
//! Field names follow the setup form (`team1Name`, `halfDuration`, ...).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::team::TeamSide;
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TossWinner {
    #[serde(rename = "team1")]
    Team1,
    #[serde(rename = "team2")]
    Team2,
}

impl TossWinner {
    pub fn side(&self) -> TeamSide {
        match self {
            TossWinner::Team1 => TeamSide::Home,
            TossWinner::Team2 => TeamSide::Away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TossChoice {
    Raid,
    Ground,
}

/// Rule toggles chosen on the setup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchRules {
    pub bonus_allowed: bool,
    pub super_tackle_allowed: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self { bonus_allowed: true, super_tackle_allowed: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Toss {
    pub winner: TossWinner,
    pub choice: TossChoice,
}

impl Toss {
    /// Team that raids first in the first half.
    pub fn first_raider(&self) -> TeamSide {
        match self.choice {
            TossChoice::Raid => self.winner.side(),
            TossChoice::Ground => self.winner.side().opponent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    pub team1_name: String,
    pub team2_name: String,
    pub team1_players: Vec<String>,
    pub team2_players: Vec<String>,
    pub toss_winner: TossWinner,
    pub toss_choice: TossChoice,
    /// "mm:ss"
    pub half_duration: String,
    #[serde(default = "default_true")]
    pub bonus_allowed: bool,
    #[serde(default = "default_true")]
    pub super_tackle_allowed: bool,
}

fn default_true() -> bool {
    true
}

impl MatchSetup {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn rules(&self) -> MatchRules {
        MatchRules {
            bonus_allowed: self.bonus_allowed,
            super_tackle_allowed: self.super_tackle_allowed,
        }
    }

    pub fn toss(&self) -> Toss {
        Toss { winner: self.toss_winner, choice: self.toss_choice }
    }

    pub fn half_duration_seconds(&self) -> Result<u32> {
        parse_half_duration(&self.half_duration)
    }

    /// Validate the setup against the required roster size.
    pub fn validate(&self, players_per_team: usize) -> Result<()> {
        validate_team_name("team1Name", &self.team1_name)?;
        validate_team_name("team2Name", &self.team2_name)?;
        validate_roster(&self.team1_name, &self.team1_players, players_per_team)?;
        validate_roster(&self.team2_name, &self.team2_players, players_per_team)?;
        self.half_duration_seconds()?;
        Ok(())
    }
}

fn validate_team_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MatchError::InvalidSetup(format!("{field} is required")));
    }
    Ok(())
}

fn validate_roster(team: &str, players: &[String], expected: usize) -> Result<()> {
    if players.len() != expected {
        return Err(MatchError::InvalidSetup(format!(
            "{team} must have {expected} players, found {}",
            players.len()
        )));
    }
    if let Some(pos) = players.iter().position(|p| p.trim().is_empty()) {
        return Err(MatchError::InvalidSetup(format!(
            "{team} player #{} has no name",
            pos + 1
        )));
    }
    Ok(())
}

/// Parse "mm:ss" into seconds. Seconds must be < 60 and the total positive.
pub fn parse_half_duration(text: &str) -> Result<u32> {
    let invalid = || MatchError::InvalidSetup(format!("halfDuration must be mm:ss, got '{text}'"));

    let (mm, ss) = text.trim().split_once(':').ok_or_else(invalid)?;
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(mm) || !is_digits(ss) {
        return Err(invalid());
    }
    let minutes: u32 = mm.parse().map_err(|_| invalid())?;
    let seconds: u32 = ss.parse().map_err(|_| invalid())?;
    if ss.len() != 2 || seconds >= 60 {
        return Err(invalid());
    }

    let total = minutes.checked_mul(60).and_then(|m| m.checked_add(seconds)).ok_or_else(invalid)?;
    if total == 0 {
        return Err(MatchError::InvalidSetup("halfDuration must be longer than 00:00".to_string()));
    }
    Ok(total)
}
