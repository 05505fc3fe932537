//! Match phase controller.
//!
//! `NotStarted → FirstHalf → Halftime → SecondHalf → Ended`, linear, no
//! skipping. The controller owns the phase and the deferred half-end flag;
//! the match clock is passed in so the aggregate keeps a single clock service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clock::Countdown;
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    NotStarted,
    FirstHalf,
    Halftime,
    SecondHalf,
    Ended,
}

impl MatchPhase {
    /// A half is being played (raids and scoring allowed).
    pub fn is_live(&self) -> bool {
        matches!(self, MatchPhase::FirstHalf | MatchPhase::SecondHalf)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchPhase::NotStarted => "Not Started",
            MatchPhase::FirstHalf => "First Half",
            MatchPhase::Halftime => "Half Time",
            MatchPhase::SecondHalf => "Second Half",
            MatchPhase::Ended => "Full Time",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPhaseController {
    phase: MatchPhase,
    /// Match clock hit zero during a raid; the half ends when that raid does.
    phase_end_pending: bool,
}

impl MatchPhaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn phase_end_pending(&self) -> bool {
        self.phase_end_pending
    }

    pub fn start(&mut self, clock: &mut Countdown) -> Result<()> {
        match self.phase {
            MatchPhase::NotStarted => {
                self.phase = MatchPhase::FirstHalf;
                clock.start();
                log::info!("Match started: {}", self.phase.label());
                Ok(())
            }
            MatchPhase::FirstHalf | MatchPhase::SecondHalf => {
                if clock.running {
                    return Err(MatchError::transition("match clock is already running"));
                }
                if clock.is_expired() {
                    return Err(MatchError::transition(format!(
                        "{} has expired",
                        self.phase.label()
                    )));
                }
                clock.start();
                Ok(())
            }
            MatchPhase::Halftime | MatchPhase::Ended => Err(MatchError::transition(format!(
                "cannot start the clock during {}",
                self.phase.label()
            ))),
        }
    }

    pub fn pause(&mut self, clock: &mut Countdown) -> Result<()> {
        if !self.phase.is_live() {
            return Err(MatchError::transition(format!(
                "cannot pause during {}",
                self.phase.label()
            )));
        }
        clock.pause();
        Ok(())
    }

    pub fn request_halftime(&mut self, clock: &mut Countdown, raid_open: bool) -> Result<()> {
        self.check_half_end(MatchPhase::FirstHalf, clock, raid_open)?;
        self.enter_halftime(clock);
        Ok(())
    }

    pub fn end_halftime(&mut self) -> Result<()> {
        if self.phase != MatchPhase::Halftime {
            return Err(MatchError::transition(format!(
                "cannot end half time during {}",
                self.phase.label()
            )));
        }
        self.phase = MatchPhase::SecondHalf;
        log::info!("Second half ready");
        Ok(())
    }

    pub fn request_full_time(&mut self, clock: &mut Countdown, raid_open: bool) -> Result<()> {
        self.check_half_end(MatchPhase::SecondHalf, clock, raid_open)?;
        self.enter_full_time(clock);
        Ok(())
    }

    /// Match clock reached zero. Returns `true` if the stop is deferred
    /// because a raid is open.
    pub fn on_match_clock_expired(&mut self, clock: &mut Countdown, raid_open: bool) -> bool {
        if raid_open {
            self.phase_end_pending = true;
            log::info!("{} expired during a raid, deferring", self.phase.label());
            true
        } else {
            clock.pause();
            false
        }
    }

    /// The open raid has closed. Applies a deferred half end, if any, and
    /// returns the phase entered.
    pub fn on_raid_closed(&mut self, clock: &mut Countdown) -> Option<MatchPhase> {
        if !self.phase_end_pending {
            return None;
        }
        self.phase_end_pending = false;
        match self.phase {
            MatchPhase::FirstHalf => self.enter_halftime(clock),
            MatchPhase::SecondHalf => self.enter_full_time(clock),
            _ => return None,
        }
        Some(self.phase)
    }

    fn check_half_end(&self, expected: MatchPhase, clock: &Countdown, raid_open: bool) -> Result<()> {
        if self.phase != expected {
            return Err(MatchError::transition(format!(
                "{} requested during {}",
                if expected == MatchPhase::FirstHalf { "half time" } else { "full time" },
                self.phase.label()
            )));
        }
        if raid_open {
            return Err(MatchError::transition("a raid is still in progress"));
        }
        if !clock.is_expired() {
            return Err(MatchError::precondition(format!(
                "{} still on the match clock",
                clock.text()
            )));
        }
        Ok(())
    }

    fn enter_halftime(&mut self, clock: &mut Countdown) {
        self.phase = MatchPhase::Halftime;
        clock.reset();
        log::info!("Half time");
    }

    fn enter_full_time(&mut self, clock: &mut Countdown) {
        self.phase = MatchPhase::Ended;
        clock.pause();
        log::info!("Full time");
    }
}
