//! # Rule Configuration
//!
//! 규칙 상수를 한 곳에서 관리하는 설정 시스템.
//!
//! 규칙 개정판마다 foul +1 여부와 do-or-die 발동 시점이 다르다.
//! 기준 규칙은 `standard()`이고, 다른 개정판은 프리셋으로 재현한다.
//!
//! ## 사용법
//! ```rust
//! use kb_core::engine::config::RuleConfig;
//!
//! let standard = RuleConfig::standard();
//! let legacy = RuleConfig::legacy_foul_bonus();
//! assert!(legacy.foul_bonus_point && !standard.foul_bonus_point);
//! ```

use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Tunable Kabaddi rule constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Roster size required by setup
    #[serde(default = "default_players_per_team")]
    pub players_per_team: usize,

    /// Largest raid-points button
    #[serde(default = "default_max_raid_points")]
    pub max_raid_points: u8,

    #[serde(default = "default_one")]
    pub bonus_points: u32,

    /// Defenders alive required before a bonus may be awarded
    #[serde(default = "default_bonus_min_defenders")]
    pub bonus_min_defenders: usize,

    #[serde(default = "default_one")]
    pub tackle_points: u32,

    #[serde(default = "default_two")]
    pub super_tackle_points: u32,

    /// Tackling team alive count at or below this makes a tackle "super"
    #[serde(default = "default_super_tackle_max_defenders")]
    pub super_tackle_max_defenders: usize,

    #[serde(default = "default_two")]
    pub all_out_points: u32,

    /// Consecutive empty raids before the next raid is do-or-die.
    /// `None` disables the escalation.
    #[serde(default = "default_do_or_die_after")]
    pub do_or_die_after: Option<u8>,

    /// Consecutive empty raids that strike the raider out
    #[serde(default = "default_strike_limit")]
    pub empty_raid_strike_limit: u8,

    /// Earlier rule revision: a foul adds one point on top of the button value
    #[serde(default)]
    pub foul_bonus_point: bool,

    #[serde(default = "default_thirty")]
    pub raid_seconds: u32,

    #[serde(default = "default_thirty")]
    pub timeout_seconds: u32,
}

fn default_players_per_team() -> usize {
    7
}
fn default_max_raid_points() -> u8 {
    7
}
fn default_one() -> u32 {
    1
}
fn default_two() -> u32 {
    2
}
fn default_bonus_min_defenders() -> usize {
    6
}
fn default_super_tackle_max_defenders() -> usize {
    3
}
fn default_do_or_die_after() -> Option<u8> {
    Some(2)
}
fn default_strike_limit() -> u8 {
    3
}
fn default_thirty() -> u32 {
    30
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            players_per_team: default_players_per_team(),
            max_raid_points: default_max_raid_points(),
            bonus_points: 1,
            bonus_min_defenders: default_bonus_min_defenders(),
            tackle_points: 1,
            super_tackle_points: 2,
            super_tackle_max_defenders: default_super_tackle_max_defenders(),
            all_out_points: 2,
            do_or_die_after: default_do_or_die_after(),
            empty_raid_strike_limit: default_strike_limit(),
            foul_bonus_point: false,
            raid_seconds: 30,
            timeout_seconds: 30,
        }
    }
}

impl RuleConfig {
    /// 기준 규칙 (최신 개정판)
    pub fn standard() -> Self {
        Self::default()
    }

    /// Foul adds +1 (earlier scoring-screen revision)
    pub fn legacy_foul_bonus() -> Self {
        Self { foul_bonus_point: true, ..Self::default() }
    }

    /// No do-or-die escalation; the third empty raid strikes the raider out.
    pub fn strike_on_third() -> Self {
        Self { do_or_die_after: None, ..Self::default() }
    }

    /// Load from a file. `.yaml` / `.yml` is parsed as YAML, anything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RuleConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| RuleConfigError::Io(e.to_string()))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RuleConfigError> {
        let config: RuleConfig =
            serde_json::from_str(json).map_err(|e| RuleConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, RuleConfigError> {
        let config: RuleConfig =
            serde_yaml::from_str(yaml).map_err(|e| RuleConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), RuleConfigError> {
        if self.players_per_team == 0 {
            return Err(RuleConfigError::Validation(
                "players_per_team must be at least 1".to_string(),
            ));
        }
        if self.max_raid_points == 0 {
            return Err(RuleConfigError::Validation(
                "max_raid_points must be at least 1".to_string(),
            ));
        }
        if self.raid_seconds == 0 || self.timeout_seconds == 0 {
            return Err(RuleConfigError::Validation(format!(
                "clock durations must be positive, got raid={} timeout={}",
                self.raid_seconds, self.timeout_seconds
            )));
        }
        if self.bonus_min_defenders > self.players_per_team {
            return Err(RuleConfigError::Validation(format!(
                "bonus_min_defenders ({}) exceeds players_per_team ({})",
                self.bonus_min_defenders, self.players_per_team
            )));
        }
        if self.super_tackle_max_defenders >= self.players_per_team {
            return Err(RuleConfigError::Validation(format!(
                "super_tackle_max_defenders ({}) must be below players_per_team ({})",
                self.super_tackle_max_defenders, self.players_per_team
            )));
        }
        if self.empty_raid_strike_limit == 0 {
            return Err(RuleConfigError::Validation(
                "empty_raid_strike_limit must be at least 1".to_string(),
            ));
        }
        if let Some(after) = self.do_or_die_after {
            if after == 0 || after >= self.empty_raid_strike_limit {
                return Err(RuleConfigError::Validation(format!(
                    "do_or_die_after must be 1..{}, got {}",
                    self.empty_raid_strike_limit, after
                )));
            }
        }
        Ok(())
    }
}

// ========== Tests ==========
