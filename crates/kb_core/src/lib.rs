//! # kb_core - Kabaddi Match-Scoring Engine
//!
//! A deterministic scoreboard state machine for Kabaddi, with a JSON API for
//! easy integration with a scoring screen.
//!
//! ## Features
//! - Match phases, match / raid / timeout clocks driven by one tick source
//! - Out, revive and all-out rules applied atomically
//! - Empty-raid escalation to do-or-die
//! - Raid-scoped undo
//! - JSON API with a process-wide match registry

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod state;

pub use api::{
    apply_command_json, close_match_json, command_schema_json, create_match_json,
    match_snapshot_json, match_summary_json, ApiError, ApiResponse,
};
pub use engine::{KabaddiMatch, MatchCommand, MatchEvent, MatchPhase, MatchSnapshot, RuleConfig};
pub use error::{MatchError, Result};
pub use models::{MatchSetup, MatchSummary, TeamSide};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
