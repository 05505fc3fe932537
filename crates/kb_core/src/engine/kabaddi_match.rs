//! Kabaddi Match
//!
//! 경기 하나의 전체 상태를 소유하는 단일 루트. 모든 명령은 먼저 검증하고
//! 그 다음에 변경한다. 거부된 명령은 어떤 상태도 바꾸지 않는다.
//!
//! ## Raid lifecycle
//! 1. `start_raid(team)`: clears the team's undo log, runs the do-or-die
//!    escalation check, starts the raid clock
//! 2. scoring / out commands append to the raiding team's undo log
//! 3. `end_raid(team)` or raid-clock expiry closes the raid in one
//!    transaction: empty-raid outcome, auto-out, controls reset, deferred
//!    half end

use super::clock::{ClockEvent, ClockService};
use super::command::MatchCommand;
use super::config::RuleConfig;
use super::empty_raid::{EmptyRaidOutcome, EmptyRaidTracker};
use super::events::MatchEvent;
use super::match_phase::{MatchPhase, MatchPhaseController};
use super::raid::{RaidState, TeamControls};
use super::roster::{OutOutcome, RosterManager};
use super::scoring::{ScoreAward, ScoringEngine};
use super::snapshot::{ClockSnapshot, MatchSnapshot, RaidSnapshot, TeamSnapshot};
use super::undo_log::{RaidAction, UndoLog};
use crate::error::{MatchError, Result};
use crate::models::{
    decide_winner, MatchRules, MatchSetup, MatchSummary, Team, TeamSide, TeamSummary, Teams, Toss,
};

#[derive(Debug, Clone)]
pub struct KabaddiMatch {
    teams: Teams,
    config: RuleConfig,
    rules: MatchRules,
    toss: Toss,
    half_duration_seconds: u32,
    phase: MatchPhaseController,
    clocks: ClockService,
    raid: Option<RaidState>,
    controls: [TeamControls; 2],
    empty_raids: EmptyRaidTracker,
    undo: [UndoLog; 2],
    raids_started: u32,
    next_raider: TeamSide,
    first_half_opener: TeamSide,
    events: Vec<MatchEvent>,
}

impl KabaddiMatch {
    /// Build a match with the standard rules.
    pub fn new(setup: &MatchSetup) -> Result<Self> {
        Self::with_config(setup, RuleConfig::standard())
    }

    pub fn with_config(setup: &MatchSetup, config: RuleConfig) -> Result<Self> {
        config.validate()?;
        setup.validate(config.players_per_team)?;
        let half_duration_seconds = setup.half_duration_seconds()?;

        let teams = Teams::new(
            Team::new(setup.team1_name.trim(), &setup.team1_players),
            Team::new(setup.team2_name.trim(), &setup.team2_players),
        );
        let toss = setup.toss();
        let opener = toss.first_raider();
        let clocks =
            ClockService::new(half_duration_seconds, config.raid_seconds, config.timeout_seconds);

        log::info!(
            "Match created: {} vs {}, halves {}s, {} raids first",
            teams.home.name,
            teams.away.name,
            half_duration_seconds,
            teams[opener].name
        );

        Ok(Self {
            teams,
            rules: setup.rules(),
            config,
            toss,
            half_duration_seconds,
            phase: MatchPhaseController::new(),
            clocks,
            raid: None,
            controls: [TeamControls::default(); 2],
            empty_raids: EmptyRaidTracker::new(),
            undo: [UndoLog::new(), UndoLog::new()],
            raids_started: 0,
            next_raider: opener,
            first_half_opener: opener,
            events: Vec::new(),
        })
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Dispatch a serialized command.
    pub fn apply(&mut self, command: MatchCommand) -> Result<MatchSnapshot> {
        match command {
            MatchCommand::StartMatch => self.start_match(),
            MatchCommand::PauseMatch => self.pause_match(),
            MatchCommand::RequestHalftime => self.request_halftime(),
            MatchCommand::EndHalftime => self.end_halftime(),
            MatchCommand::RequestFullTime => self.request_full_time(),
            MatchCommand::StartRaid { team } => self.start_raid(team),
            MatchCommand::EndRaid { team } => self.end_raid(team),
            MatchCommand::SelectPlayer { team, name } => self.select_player(team, &name),
            MatchCommand::SelectPlayerAt { team, player_index } => {
                self.select_player_at(team, player_index)
            }
            MatchCommand::ToggleFoul { team } => self.toggle_foul(team),
            MatchCommand::Score { team, points } => self.score(team, points),
            MatchCommand::Bonus { team } => self.bonus(team),
            MatchCommand::Tackle { team } => self.tackle(team),
            MatchCommand::Out { team, player_index } => self.out(team, player_index),
            MatchCommand::Undo { team } => self.undo(team),
            MatchCommand::StartTimeout => self.start_timeout(),
            MatchCommand::PauseRaidClock => self.pause_raid_clock(),
            MatchCommand::ResumeRaidClock => self.resume_raid_clock(),
            MatchCommand::Tick { seconds } => self.advance(seconds),
        }
    }

    pub fn start_match(&mut self) -> Result<MatchSnapshot> {
        let before = self.phase.phase();
        self.phase.start(&mut self.clocks.match_clock)?;
        if before == MatchPhase::NotStarted {
            self.next_raider = self.first_half_opener;
            self.push_phase_event();
        }
        Ok(self.snapshot())
    }

    pub fn pause_match(&mut self) -> Result<MatchSnapshot> {
        self.phase.pause(&mut self.clocks.match_clock)?;
        Ok(self.snapshot())
    }

    pub fn request_halftime(&mut self) -> Result<MatchSnapshot> {
        self.phase.request_halftime(&mut self.clocks.match_clock, self.raid.is_some())?;
        self.after_half_end();
        Ok(self.snapshot())
    }

    pub fn end_halftime(&mut self) -> Result<MatchSnapshot> {
        self.phase.end_halftime()?;
        self.push_phase_event();
        Ok(self.snapshot())
    }

    pub fn request_full_time(&mut self) -> Result<MatchSnapshot> {
        self.phase.request_full_time(&mut self.clocks.match_clock, self.raid.is_some())?;
        self.after_half_end();
        Ok(self.snapshot())
    }

    pub fn start_raid(&mut self, side: TeamSide) -> Result<MatchSnapshot> {
        let phase = self.phase.phase();
        if !phase.is_live() {
            return Err(MatchError::transition(format!(
                "cannot start a raid during {}",
                phase.label()
            )));
        }
        if let Some(raid) = &self.raid {
            return Err(MatchError::transition(format!(
                "{} team raid #{} is still open",
                raid.raiding_team, raid.number
            )));
        }
        if self.clocks.timeout_clock.running {
            return Err(MatchError::transition("a timeout is running"));
        }
        if self.clocks.match_clock.is_expired() {
            return Err(MatchError::transition(format!("{} has expired", phase.label())));
        }

        // undo reaches back only to the latest raid start, whichever team raided
        self.undo.iter_mut().for_each(UndoLog::clear);
        let raider = self.controls[side.index()]
            .selected
            .filter(|&i| self.teams[side].players.get(i).is_some_and(|p| p.alive));
        let do_or_die = self.empty_raids.before_raid(side, &self.config);
        self.raids_started += 1;
        let number = self.raids_started;
        self.raid = Some(RaidState { raiding_team: side, raider, do_or_die, number });
        self.clocks.raid_clock.reset();
        self.clocks.raid_clock.start();

        log::info!(
            "Raid #{} started by {}{}",
            number,
            self.teams[side].name,
            if do_or_die { " (do-or-die)" } else { "" }
        );
        self.events.push(MatchEvent::RaidStarted { team: side, number, do_or_die });
        Ok(self.snapshot())
    }

    pub fn end_raid(&mut self, side: TeamSide) -> Result<MatchSnapshot> {
        self.require_raid_by(side)?;
        self.close_raid(false);
        Ok(self.snapshot())
    }

    /// Select the first alive player named `name`.
    pub fn select_player(&mut self, side: TeamSide, name: &str) -> Result<MatchSnapshot> {
        self.require_not_ended()?;
        let team = &self.teams[side];
        let index = match team.find_alive(name) {
            Some(index) => index,
            None if team.find_any(name).is_some() => {
                return Err(MatchError::precondition(format!("{name} is out")));
            }
            None => {
                return Err(MatchError::PlayerNotFound { team: side, player: name.to_string() });
            }
        };
        self.set_selection(side, index);
        Ok(self.snapshot())
    }

    pub fn select_player_at(&mut self, side: TeamSide, index: usize) -> Result<MatchSnapshot> {
        self.require_not_ended()?;
        let player = self.teams[side].players.get(index).ok_or_else(|| {
            MatchError::PlayerNotFound { team: side, player: format!("#{index}") }
        })?;
        if !player.alive {
            return Err(MatchError::precondition(format!("{} is out", player.name)));
        }
        self.set_selection(side, index);
        Ok(self.snapshot())
    }

    pub fn toggle_foul(&mut self, side: TeamSide) -> Result<MatchSnapshot> {
        self.require_not_ended()?;
        let controls = &mut self.controls[side.index()];
        controls.foul = !controls.foul;
        Ok(self.snapshot())
    }

    /// Raid-points button. `points` is the button value (1..=7).
    pub fn score(&mut self, side: TeamSide, points: u8) -> Result<MatchSnapshot> {
        self.require_raid_by(side)?;
        let controls = self.controls[side.index()];
        let award = self.scoring().raid_points(points, controls.foul)?;
        let selected = self.require_selection(side)?;
        self.apply_award(side, award, selected);
        Ok(self.snapshot())
    }

    pub fn bonus(&mut self, side: TeamSide) -> Result<MatchSnapshot> {
        let raid = self.require_raid_by(side)?;
        let defenders_alive = self.teams[raid.defending_team()].alive_count();
        let award = self.scoring().bonus(defenders_alive)?;
        let selected = self.require_selection(side)?;
        self.apply_award(side, award, selected);
        Ok(self.snapshot())
    }

    /// Defensive points for `side` during the opponent's raid.
    pub fn tackle(&mut self, side: TeamSide) -> Result<MatchSnapshot> {
        self.require_raid_by(side.opponent())?;
        let selected = self.require_selection(side)?;
        let tacklers_alive = self.teams[side].alive_count();
        let award = self.scoring().tackle(tacklers_alive);
        if self.scoring().is_super_tackle(tacklers_alive) {
            log::info!("Super tackle by {}", self.teams[side].name);
        }
        self.apply_award(side, award, selected);
        Ok(self.snapshot())
    }

    /// Mark `side`'s player out inside the open raid.
    pub fn out(&mut self, side: TeamSide, player_index: usize) -> Result<MatchSnapshot> {
        let raiding = match &self.raid {
            Some(raid) => raid.raiding_team,
            None => return Err(MatchError::transition("no raid is open")),
        };

        let outcome = RosterManager::new(&mut self.teams, &self.config).mark_out(
            side,
            player_index,
            &mut self.undo[raiding.index()],
        )?;
        self.after_out(side, outcome);
        if self.undo[raiding.index()].scored_for(raiding) {
            self.empty_raids.record_score(raiding);
        }
        Ok(self.snapshot())
    }

    /// Roll back every action of `side`'s most recent raid.
    pub fn undo(&mut self, side: TeamSide) -> Result<MatchSnapshot> {
        if self.phase.phase() == MatchPhase::Ended {
            return Err(MatchError::transition("the match has ended"));
        }
        let reversed = self.undo[side.index()].rollback(&mut self.teams);
        if reversed > 0 {
            log::debug!("Undo: {} actions of {} reversed", reversed, self.teams[side].name);
            self.events.push(MatchEvent::RaidUndone { team: side, actions: reversed });
        }
        Ok(self.snapshot())
    }

    pub fn start_timeout(&mut self) -> Result<MatchSnapshot> {
        let phase = self.phase.phase();
        if !phase.is_live() {
            return Err(MatchError::transition(format!(
                "cannot call a timeout during {}",
                phase.label()
            )));
        }
        if self.raid.is_some() {
            return Err(MatchError::transition("cannot call a timeout during a raid"));
        }
        if self.clocks.timeout_clock.running {
            return Err(MatchError::transition("a timeout is already running"));
        }
        self.clocks.timeout_clock.reset();
        self.clocks.timeout_clock.start();
        log::info!("Timeout started");
        self.events.push(MatchEvent::TimeoutStarted);
        Ok(self.snapshot())
    }

    pub fn pause_raid_clock(&mut self) -> Result<MatchSnapshot> {
        self.require_open_raid()?;
        self.clocks.raid_clock.pause();
        Ok(self.snapshot())
    }

    pub fn resume_raid_clock(&mut self) -> Result<MatchSnapshot> {
        self.require_open_raid()?;
        self.clocks.raid_clock.start();
        Ok(self.snapshot())
    }

    /// One elapsed second. Returns the events this tick produced.
    pub fn tick(&mut self) -> Vec<MatchEvent> {
        let first_new = self.events.len();

        for clock_event in self.clocks.tick() {
            self.events.push(MatchEvent::ClockExpired { clock: clock_event });
            match clock_event {
                ClockEvent::MatchExpired => {
                    self.phase
                        .on_match_clock_expired(&mut self.clocks.match_clock, self.raid.is_some());
                }
                ClockEvent::RaidExpired => {
                    if self.raid.is_some() {
                        self.close_raid(true);
                    }
                }
                ClockEvent::TimeoutExpired => log::info!("Timeout over"),
            }
        }

        self.events[first_new..].to_vec()
    }

    pub fn advance(&mut self, seconds: u32) -> Result<MatchSnapshot> {
        for _ in 0..seconds {
            if !self.clocks.any_running() {
                break;
            }
            self.tick();
        }
        Ok(self.snapshot())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn phase(&self) -> MatchPhase {
        self.phase.phase()
    }

    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase.phase(),
            phase_end_pending: self.phase.phase_end_pending(),
            home: self.team_snapshot(TeamSide::Home),
            away: self.team_snapshot(TeamSide::Away),
            match_clock: ClockSnapshot::from(&self.clocks.match_clock),
            raid_clock: ClockSnapshot::from(&self.clocks.raid_clock),
            timeout_clock: ClockSnapshot::from(&self.clocks.timeout_clock),
            half_duration_seconds: self.half_duration_seconds,
            raid: self.raid.map(|raid| RaidSnapshot {
                raiding_team: raid.raiding_team,
                number: raid.number,
                raider: raid.raider,
                do_or_die: raid.do_or_die,
                actions: self.undo[raid.raiding_team.index()].actions().to_vec(),
            }),
            next_raider: self.next_raider,
            toss: self.toss,
            rules: self.rules,
        }
    }

    pub fn summary(&self) -> MatchSummary {
        let phase = self.phase.phase();
        MatchSummary {
            team1: TeamSummary::from(&self.teams.home),
            team2: TeamSummary::from(&self.teams.away),
            phase: phase.label().to_string(),
            timer: self.clocks.match_clock.text(),
            winner: (phase == MatchPhase::Ended)
                .then(|| decide_winner(&self.teams.home, &self.teams.away)),
        }
    }

    #[cfg(test)]
    pub(crate) fn teams_mut_for_test(&mut self) -> &mut Teams {
        &mut self.teams
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn scoring(&self) -> ScoringEngine<'_> {
        ScoringEngine::new(&self.config, self.rules)
    }

    fn team_snapshot(&self, side: TeamSide) -> TeamSnapshot {
        let team = &self.teams[side];
        TeamSnapshot {
            team: team.clone(),
            alive_count: team.alive_count(),
            empty_raids: self.empty_raids.counter(side),
            controls: self.controls[side.index()],
            undo_available: self.undo[side.index()].len(),
        }
    }

    fn require_not_ended(&self) -> Result<()> {
        if self.phase.phase() == MatchPhase::Ended {
            return Err(MatchError::transition("the match has ended"));
        }
        Ok(())
    }

    fn require_open_raid(&self) -> Result<RaidState> {
        self.raid.ok_or_else(|| MatchError::transition("no raid is open"))
    }

    fn require_raid_by(&self, side: TeamSide) -> Result<RaidState> {
        let raid = self.require_open_raid()?;
        if raid.raiding_team != side {
            return Err(MatchError::transition(format!(
                "the open raid belongs to the {} team",
                raid.raiding_team
            )));
        }
        Ok(raid)
    }

    /// Selected player of `side`, unless the foul flag waives it.
    fn require_selection(&self, side: TeamSide) -> Result<Option<usize>> {
        let controls = self.controls[side.index()];
        match controls.selected {
            Some(index) => Ok(Some(index)),
            None if controls.foul => Ok(None),
            None => Err(MatchError::SelectionRequired { team: side }),
        }
    }

    fn set_selection(&mut self, side: TeamSide, index: usize) {
        self.controls[side.index()].selected = Some(index);
        if let Some(raid) = self.raid.as_mut() {
            if raid.raiding_team == side {
                raid.raider = Some(index);
            }
        }
    }

    /// Book an award for `side` and log it into the open raid.
    fn apply_award(&mut self, side: TeamSide, award: ScoreAward, player: Option<usize>) {
        let Some(raid) = self.raid else {
            return;
        };

        let team = &mut self.teams[side];
        team.add_points(award.category, award.points);
        if let Some(p) = player.and_then(|i| team.players.get_mut(i)) {
            p.stats.credit(award.category, award.points);
        }

        self.undo[raid.raiding_team.index()]
            .push(RaidAction::Score { points: award.points, to_team: side });
        if side == raid.raiding_team && award.points > 0 {
            self.empty_raids.record_score(side);
        }

        log::debug!(
            "{} +{} ({:?}), score {}",
            self.teams[side].name,
            award.points,
            award.category,
            self.teams[side].score
        );
    }

    fn after_out(&mut self, side: TeamSide, outcome: OutOutcome) {
        if outcome.all_out {
            self.events.push(MatchEvent::AllOut { team: side, points: outcome.all_out_points });
        }
    }

    /// Close the open raid and apply every derived effect.
    fn close_raid(&mut self, expired: bool) {
        let Some(raid) = self.raid.take() else {
            return;
        };
        let side = raid.raiding_team;
        let empty = !self.undo[side.index()].scored_for(side);
        let outcome = self.empty_raids.close_raid(side, empty, &self.config);

        if outcome.requires_auto_out() {
            self.auto_out(side, raid.raider, outcome);
        }

        self.controls.iter_mut().for_each(TeamControls::reset);
        self.clocks.raid_clock.reset();
        self.next_raider = side.opponent();

        log::info!(
            "Raid #{} by {} ended{}: {:?}",
            raid.number,
            self.teams[side].name,
            if expired { " (time)" } else { "" },
            outcome
        );
        self.events.push(MatchEvent::RaidEnded { team: side, number: raid.number, outcome, expired });

        if self.phase.on_raid_closed(&mut self.clocks.match_clock).is_some() {
            self.after_half_end();
        }
    }

    /// Strike out the last-selected raider after a failed streak.
    fn auto_out(&mut self, side: TeamSide, raider: Option<usize>, outcome: EmptyRaidOutcome) {
        let Some(index) = raider.filter(|&i| self.teams[side].players.get(i).is_some_and(|p| p.alive))
        else {
            log::debug!("{:?} with no raider to strike out", outcome);
            return;
        };

        match RosterManager::new(&mut self.teams, &self.config).mark_out(
            side,
            index,
            &mut self.undo[side.index()],
        ) {
            Ok(out) => {
                log::info!("{} auto-out after {:?}", self.teams[side].players[index].name, outcome);
                self.events.push(MatchEvent::AutoOut { team: side, player_index: index });
                self.after_out(side, out);
            }
            Err(e) => log::warn!("Auto-out skipped: {}", e),
        }
    }

    /// Bookkeeping after the phase controller moved to Halftime or Ended.
    fn after_half_end(&mut self) {
        match self.phase.phase() {
            MatchPhase::Halftime => {
                self.next_raider = self.first_half_opener.opponent();
            }
            MatchPhase::Ended => {
                self.clocks.match_clock.pause();
            }
            _ => {}
        }
        self.clocks.raid_clock.reset();
        self.clocks.timeout_clock.reset();
        self.controls.iter_mut().for_each(TeamControls::reset);
        self.push_phase_event();
    }

    fn push_phase_event(&mut self) {
        self.events.push(MatchEvent::PhaseChanged { phase: self.phase.phase() });
    }
}
