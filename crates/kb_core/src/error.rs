use thiserror::Error;

use crate::engine::config::RuleConfigError;
use crate::models::TeamSide;

/// Every way a command can be rejected.
///
/// All variants are recoverable: a rejected command leaves the match exactly
/// as it was.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Player selection required for {team} team")]
    SelectionRequired { team: TeamSide },

    #[error("Player {player_index} of {team} team is already out")]
    AlreadyOut { team: TeamSide, player_index: usize },

    #[error("Player not found on {team} team: {player}")]
    PlayerNotFound { team: TeamSide, player: String },

    #[error("Invalid setup: {0}")]
    InvalidSetup(String),

    #[error("Rule config error: {0}")]
    Config(#[from] RuleConfigError),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Match not found: {0}")]
    MatchNotFound(String),
}

impl MatchError {
    pub(crate) fn transition(msg: impl Into<String>) -> Self {
        MatchError::InvalidTransition(msg.into())
    }

    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        MatchError::PreconditionFailed(msg.into())
    }

    /// Stable code used by the JSON API.
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidTransition(_) => "INVALID_TRANSITION",
            MatchError::PreconditionFailed(_) => "PRECONDITION_FAILED",
            MatchError::SelectionRequired { .. } => "SELECTION_REQUIRED",
            MatchError::AlreadyOut { .. } => "ALREADY_OUT",
            MatchError::PlayerNotFound { .. } => "PLAYER_NOT_FOUND",
            MatchError::InvalidSetup(_) => "INVALID_SETUP",
            MatchError::Config(_) => "INVALID_CONFIG",
            MatchError::Parse(_) => "PARSE_ERROR",
            MatchError::MatchNotFound(_) => "MATCH_NOT_FOUND",
        }
    }

    /// Warnings the scoring screen shows inline instead of as an error dialog.
    pub fn is_user_warning(&self) -> bool {
        matches!(self, MatchError::SelectionRequired { .. } | MatchError::AlreadyOut { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
