//! Match Commands
//!
//! Serializable form of every `KabaddiMatch` command, sent by the scoring
//! screen (or a replay script) as JSON:
//!
//! ```json
//! { "cmd": "score", "team": "home", "points": 2 }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::TeamSide;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum MatchCommand {
    StartMatch,
    PauseMatch,
    RequestHalftime,
    EndHalftime,
    RequestFullTime,
    StartRaid { team: TeamSide },
    EndRaid { team: TeamSide },
    /// 이름으로 선택 (살아있는 첫 번째 선수)
    SelectPlayer { team: TeamSide, name: String },
    SelectPlayerAt { team: TeamSide, player_index: usize },
    ToggleFoul { team: TeamSide },
    /// Raid-points button, 1..=7
    Score { team: TeamSide, points: u8 },
    Bonus { team: TeamSide },
    Tackle { team: TeamSide },
    Out { team: TeamSide, player_index: usize },
    Undo { team: TeamSide },
    StartTimeout,
    PauseRaidClock,
    ResumeRaidClock,
    /// Advance every running clock by `seconds`
    Tick { seconds: u32 },
}

impl MatchCommand {
    /// Parse a JSON array of commands (replay scripts).
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<MatchCommand>> {
        serde_json::from_str(json)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatchCommand::StartMatch => "start_match",
            MatchCommand::PauseMatch => "pause_match",
            MatchCommand::RequestHalftime => "request_halftime",
            MatchCommand::EndHalftime => "end_halftime",
            MatchCommand::RequestFullTime => "request_full_time",
            MatchCommand::StartRaid { .. } => "start_raid",
            MatchCommand::EndRaid { .. } => "end_raid",
            MatchCommand::SelectPlayer { .. } => "select_player",
            MatchCommand::SelectPlayerAt { .. } => "select_player_at",
            MatchCommand::ToggleFoul { .. } => "toggle_foul",
            MatchCommand::Score { .. } => "score",
            MatchCommand::Bonus { .. } => "bonus",
            MatchCommand::Tackle { .. } => "tackle",
            MatchCommand::Out { .. } => "out",
            MatchCommand::Undo { .. } => "undo",
            MatchCommand::StartTimeout => "start_timeout",
            MatchCommand::PauseRaidClock => "pause_raid_clock",
            MatchCommand::ResumeRaidClock => "resume_raid_clock",
            MatchCommand::Tick { .. } => "tick",
        }
    }
}
