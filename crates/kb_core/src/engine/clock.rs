//! Clock Service
//!
//! Three independent countdowns (match, raid, timeout) sharing one tick source.
//! A running countdown decrements once per elapsed second, never below zero,
//! and reports an edge exactly once when it reaches zero.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `mm:ss` text for the scoreboard.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Countdown {
    pub remaining_seconds: u32,
    pub duration_seconds: u32,
    pub running: bool,
}

impl Countdown {
    pub fn new(duration_seconds: u32) -> Self {
        Self { remaining_seconds: duration_seconds, duration_seconds, running: false }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop and rewind to the full duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.duration_seconds;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Advance one second. Returns `true` only on the step that lands on zero.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }

    pub fn text(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClockEvent {
    MatchExpired,
    RaidExpired,
    TimeoutExpired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockService {
    pub match_clock: Countdown,
    pub raid_clock: Countdown,
    pub timeout_clock: Countdown,
}

impl ClockService {
    pub fn new(half_seconds: u32, raid_seconds: u32, timeout_seconds: u32) -> Self {
        Self {
            match_clock: Countdown::new(half_seconds),
            raid_clock: Countdown::new(raid_seconds),
            timeout_clock: Countdown::new(timeout_seconds),
        }
    }

    /// 아직 0에 닿지 않은 채 돌고 있는 시계가 하나라도 있는지
    pub fn any_running(&self) -> bool {
        [&self.match_clock, &self.raid_clock, &self.timeout_clock]
            .iter()
            .any(|c| c.running && !c.is_expired())
    }

    /// One elapsed second on every running clock.
    ///
    /// Raid and timeout clocks stop and rewind on expiry. The match clock is
    /// left at zero; whether it stops is the phase controller's call.
    pub fn tick(&mut self) -> Vec<ClockEvent> {
        let mut events = Vec::new();

        if self.match_clock.tick() {
            events.push(ClockEvent::MatchExpired);
        }
        if self.raid_clock.tick() {
            self.raid_clock.reset();
            events.push(ClockEvent::RaidExpired);
        }
        if self.timeout_clock.tick() {
            self.timeout_clock.reset();
            events.push(ClockEvent::TimeoutExpired);
        }

        if !events.is_empty() {
            log::debug!("Clock events: {:?}", events);
        }
        events
    }
}
