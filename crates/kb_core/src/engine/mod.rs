pub mod clock;
pub mod command;
pub mod config;
pub mod empty_raid;
pub mod events;
pub mod kabaddi_match;
pub mod match_phase;
pub mod raid;
pub mod roster;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;
pub mod undo_log;

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
mod scenario_tests;

pub use clock::{format_clock, ClockEvent, ClockService, Countdown};
pub use command::MatchCommand;
pub use config::{RuleConfig, RuleConfigError};
pub use empty_raid::{EmptyRaidCounter, EmptyRaidOutcome, EmptyRaidTracker};
pub use events::MatchEvent;
pub use kabaddi_match::KabaddiMatch;
pub use match_phase::{MatchPhase, MatchPhaseController};
pub use raid::{RaidState, TeamControls};
pub use roster::{OutOutcome, RosterManager};
pub use scheduler::{SubscriptionId, TickScheduler};
pub use scoring::{ScoreAward, ScoringEngine};
pub use snapshot::{ClockSnapshot, MatchSnapshot, RaidSnapshot, TeamSnapshot};
pub use undo_log::{RaidAction, UndoLog};
