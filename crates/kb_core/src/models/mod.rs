pub mod match_setup;
pub mod summary;
pub mod team;

pub use match_setup::{parse_half_duration, MatchRules, MatchSetup, Toss, TossChoice, TossWinner};
pub use summary::{decide_winner, MatchSummary, PlayerSummary, PointBreakdown, TeamSummary, TIE};
pub use team::{Player, PlayerStats, PointCategory, Team, TeamSide, Teams};
