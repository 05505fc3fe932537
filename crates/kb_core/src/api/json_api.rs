//! JSON API for match scoring
//!
//! String-in / string-out endpoints for the scoring screen. Every function
//! returns a serialized [`ApiResponse`]; errors never escape as panics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::rules_config_env::rules_config_from_env;
use crate::engine::{KabaddiMatch, MatchCommand, MatchSnapshot};
use crate::error::{MatchError, Result};
use crate::models::{MatchSetup, MatchSummary};
use crate::state;

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&MatchError> for ApiError {
    fn from(e: &MatchError) -> Self {
        Self { code: e.code().to_string(), message: e.to_string() }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl<T> From<Result<T>> for ApiResponse<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::error(ApiError::from(&e)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchResponse {
    pub match_id: String,
    pub snapshot: MatchSnapshot,
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| "{}".to_string())
}

fn create_match(setup_json: &str) -> Result<CreateMatchResponse> {
    let setup = MatchSetup::from_json(setup_json)?;
    let config = rules_config_from_env()?;
    let m = KabaddiMatch::with_config(&setup, config)?;
    let snapshot = m.snapshot();
    let match_id = state::insert(m).to_string();
    info!("Match {} registered: {} vs {}", match_id, setup.team1_name, setup.team2_name);
    Ok(CreateMatchResponse { match_id, snapshot })
}

/// Validate a setup, build the match and register it.
pub fn create_match_json(setup_json: &str) -> String {
    let result = create_match(setup_json);
    if let Err(e) = &result {
        warn!("Match setup rejected: {}", e);
    }
    to_json(&ApiResponse::from(result))
}

/// Parse one `MatchCommand` and apply it.
pub fn apply_command_json(match_id: &str, command_json: &str) -> String {
    let result = serde_json::from_str::<MatchCommand>(command_json)
        .map_err(MatchError::from)
        .and_then(|cmd| state::with_match_mut(match_id, |m| m.apply(cmd)));

    if let Err(e) = &result {
        warn!("Command rejected for match {}: {} ({})", match_id, e, e.code());
    }
    to_json(&ApiResponse::from(result))
}

pub fn match_snapshot_json(match_id: &str) -> String {
    to_json(&ApiResponse::from(state::with_match(match_id, KabaddiMatch::snapshot)))
}

pub fn match_summary_json(match_id: &str) -> String {
    to_json(&ApiResponse::from(state::with_match(match_id, KabaddiMatch::summary)))
}

/// Drop the match from the registry and return its final summary.
pub fn close_match_json(match_id: &str) -> String {
    let result: Result<MatchSummary> = state::remove(match_id).map(|m| {
        info!("Match {} closed in phase {:?}", match_id, m.phase());
        m.summary()
    });
    to_json(&ApiResponse::from(result))
}

/// JSON Schema of [`MatchCommand`].
pub fn command_schema_json() -> String {
    let schema = schemars::schema_for!(MatchCommand);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
