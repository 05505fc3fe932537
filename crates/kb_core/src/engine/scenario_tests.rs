//! Cross-component match scenarios
//!
//! Full command sequences through `KabaddiMatch`: phases and clocks, rosters,
//! scoring, empty-raid escalation and undo together.

use super::config::RuleConfig;
use super::empty_raid::EmptyRaidOutcome;
use super::events::MatchEvent;
use super::match_phase::MatchPhase;
use super::test_fixtures::*;
use crate::error::MatchError;
use crate::models::TeamSide;

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_raid_points_scenario() {
    let mut m = live_match();
    m.start_raid(HOME).unwrap();
    m.select_player(HOME, "B4").unwrap();
    let snap = m.score(HOME, 3).unwrap();

    assert_eq!(snap.home.team.score, 3);
    assert_eq!(snap.home.team.players[3].stats.raid, 3);
    assert_eq!(snap.home.empty_raids.consecutive_empty_raids, 0);
}

#[test]
fn test_raid_while_opponent_raiding() {
    let mut m = live_match();
    m.start_raid(AWAY).unwrap();
    let err = m.start_raid(HOME).unwrap_err();
    assert!(matches!(err, MatchError::InvalidTransition(_)));
    assert_eq!(m.snapshot().raid.map(|r| r.raiding_team), Some(AWAY));
}

#[test]
fn test_bonus_needs_six_defenders() {
    let mut m = live_match();
    knock_out(&mut m, AWAY, 2);
    open_raid(&mut m, HOME, 0);
    assert!(matches!(m.bonus(HOME), Err(MatchError::PreconditionFailed(_))));
    assert_eq!(m.teams().home.score, 0);

    // a revived defender makes the bonus available again
    m.teams_mut_for_test().away.players[0].alive = true;
    let snap = m.bonus(HOME).unwrap();
    assert_eq!(snap.home.team.score, 1);
    assert_eq!(snap.home.team.raid_points, 1);
    assert_eq!(snap.home.team.players[0].stats.raid, 1);
}

#[test]
fn test_bonus_disabled_by_setup() {
    let mut setup = standard_setup();
    setup.bonus_allowed = false;
    let mut m = crate::engine::KabaddiMatch::new(&setup).unwrap();
    m.start_match().unwrap();
    open_raid(&mut m, HOME, 0);
    assert!(matches!(m.bonus(HOME), Err(MatchError::PreconditionFailed(_))));
}

#[test]
fn test_tackle_and_super_tackle() {
    let mut m = live_match();
    open_raid(&mut m, HOME, 0);
    m.select_player_at(AWAY, 6).unwrap();
    let snap = m.tackle(AWAY).unwrap();
    assert_eq!(snap.away.team.score, 1);
    assert_eq!(snap.away.team.players[6].stats.tackle, 1);
    m.end_raid(HOME).unwrap();

    knock_out(&mut m, AWAY, 4);
    open_raid(&mut m, HOME, 0);
    m.select_player_at(AWAY, 6).unwrap();
    let snap = m.tackle(AWAY).unwrap();
    assert_eq!(snap.away.team.score, 3);
    assert_eq!(snap.away.team.tackle_points, 3);
}

#[test]
fn test_super_tackle_disabled() {
    let mut setup = standard_setup();
    setup.super_tackle_allowed = false;
    let mut m = crate::engine::KabaddiMatch::new(&setup).unwrap();
    m.start_match().unwrap();
    knock_out(&mut m, AWAY, 5);
    open_raid(&mut m, HOME, 0);
    m.select_player_at(AWAY, 6).unwrap();
    assert_eq!(m.tackle(AWAY).unwrap().away.team.score, 1);
}

#[test]
fn test_tackle_needs_opponent_raid() {
    let mut m = live_match();
    open_raid(&mut m, HOME, 0);
    assert!(matches!(m.tackle(HOME), Err(MatchError::InvalidTransition(_))));
    assert!(matches!(m.tackle(AWAY), Err(MatchError::SelectionRequired { .. })));
}

#[test]
fn test_foul_point_revisions() {
    let mut m = live_match();
    open_raid(&mut m, HOME, 1);
    m.toggle_foul(HOME).unwrap();
    let snap = m.score(HOME, 3).unwrap();
    assert_eq!(snap.home.team.extra_points, 3);
    assert_eq!(snap.home.team.players[1].stats.extra, 3);

    let mut m = live_match_with(RuleConfig::legacy_foul_bonus());
    open_raid(&mut m, HOME, 1);
    m.toggle_foul(HOME).unwrap();
    let snap = m.score(HOME, 3).unwrap();
    assert_eq!(snap.home.team.score, 4);
    assert_eq!(snap.home.team.extra_points, 4);
}

// ============================================================================
// Rosters
// ============================================================================

#[test]
fn test_out_revives_first_opponent() {
    let mut m = live_match();
    knock_out(&mut m, HOME, 3);
    open_raid(&mut m, HOME, 5);
    let snap = m.out(AWAY, 2).unwrap();

    assert!(!snap.away.team.players[2].alive);
    assert!(snap.home.team.players[0].alive);
    assert!(!snap.home.team.players[1].alive);
    assert_eq!(snap.home.alive_count, 5);
}

#[test]
fn test_all_out_scenario() {
    let mut m = live_match();
    knock_out(&mut m, AWAY, 6);
    open_raid(&mut m, HOME, 0);
    let snap = m.out(AWAY, 6).unwrap();

    assert!(snap.away.team.players.iter().all(|p| p.alive));
    assert_eq!(snap.away.team.all_out_count, 1);
    assert_eq!(snap.home.team.score, 2);
    assert_eq!(snap.home.team.allout_points, 2);
    assert!(m.events().contains(&MatchEvent::AllOut { team: AWAY, points: 2 }));

    // all-out points count as scoring for the raid
    let snap = m.end_raid(HOME).unwrap();
    assert_eq!(snap.home.empty_raids.consecutive_empty_raids, 0);
}

// ============================================================================
// Empty raids
// ============================================================================

#[test]
fn test_do_or_die_after_two_empty_raids() {
    let mut m = live_match();
    empty_raid(&mut m, HOME, 2);
    empty_raid(&mut m, AWAY, 0);
    empty_raid(&mut m, HOME, 2);
    assert_eq!(m.snapshot().home.empty_raids.consecutive_empty_raids, 2);

    open_raid(&mut m, HOME, 2);
    let snap = m.snapshot();
    assert_eq!(snap.raid.map(|r| r.do_or_die), Some(true));
    assert!(snap.home.empty_raids.do_or_die_pending);
    assert_eq!(snap.home.empty_raids.consecutive_empty_raids, 0);

    let snap = m.end_raid(HOME).unwrap();
    assert!(!snap.home.team.players[2].alive);
    assert!(!snap.home.empty_raids.do_or_die_pending);
    assert_eq!(snap.home.empty_raids.consecutive_empty_raids, 0);
    assert!(m.events().contains(&MatchEvent::AutoOut { team: HOME, player_index: 2 }));

    // the away streak is independent
    assert_eq!(snap.away.empty_raids.consecutive_empty_raids, 1);
}

#[test]
fn test_do_or_die_cleared_by_score() {
    let mut m = live_match();
    empty_raid(&mut m, HOME, 0);
    empty_raid(&mut m, HOME, 0);
    open_raid(&mut m, HOME, 0);
    m.score(HOME, 1).unwrap();
    let snap = m.end_raid(HOME).unwrap();

    assert!(!snap.home.empty_raids.do_or_die_pending);
    assert!(snap.home.team.players[0].alive);

    open_raid(&mut m, HOME, 0);
    assert_eq!(m.snapshot().raid.map(|r| r.do_or_die), Some(false));
}

#[test]
fn test_strike_on_third_empty_raid() {
    let mut m = live_match_with(RuleConfig::strike_on_third());
    empty_raid(&mut m, AWAY, 4);
    empty_raid(&mut m, AWAY, 4);
    open_raid(&mut m, AWAY, 4);
    assert_eq!(m.snapshot().raid.map(|r| r.do_or_die), Some(false));

    let snap = m.end_raid(AWAY).unwrap();
    assert!(!snap.away.team.players[4].alive);
    assert_eq!(snap.away.empty_raids.consecutive_empty_raids, 0);
    assert!(m.events().iter().any(|e| matches!(
        e,
        MatchEvent::RaidEnded { outcome: EmptyRaidOutcome::StrikeOut, .. }
    )));
}

#[test]
fn test_auto_out_skipped_without_raider() {
    let mut m = live_match();
    empty_raid(&mut m, HOME, 0);
    empty_raid(&mut m, HOME, 0);
    m.start_raid(HOME).unwrap();
    let snap = m.end_raid(HOME).unwrap();

    assert_eq!(snap.home.alive_count, 7);
    assert!(!snap.home.empty_raids.do_or_die_pending);
}

#[test]
fn test_preselected_raider_struck_out() {
    let mut m = live_match();
    empty_raid(&mut m, HOME, 0);
    empty_raid(&mut m, HOME, 0);

    m.select_player_at(HOME, 0).unwrap();
    let snap = m.start_raid(HOME).unwrap();
    let raid = snap.raid.unwrap();
    assert!(raid.do_or_die);
    assert_eq!(raid.raider, Some(0));

    let snap = m.end_raid(HOME).unwrap();
    assert!(!snap.home.team.players[0].alive);
    assert!(m.events().contains(&MatchEvent::AutoOut { team: HOME, player_index: 0 }));
}

#[test]
fn test_preselected_raider_strike_on_third() {
    let mut m = live_match_with(RuleConfig::strike_on_third());
    empty_raid(&mut m, AWAY, 3);
    empty_raid(&mut m, AWAY, 3);
    m.select_player_at(AWAY, 3).unwrap();
    m.start_raid(AWAY).unwrap();

    let snap = m.end_raid(AWAY).unwrap();
    assert!(!snap.away.team.players[3].alive);
    assert!(m.events().contains(&MatchEvent::AutoOut { team: AWAY, player_index: 3 }));
}

#[test]
fn test_auto_out_can_trigger_all_out() {
    let mut m = live_match();
    empty_raid(&mut m, HOME, 6);
    empty_raid(&mut m, HOME, 6);
    knock_out(&mut m, HOME, 6);
    open_raid(&mut m, HOME, 6);
    let snap = m.end_raid(HOME).unwrap();

    assert_eq!(snap.home.alive_count, 7);
    assert_eq!(snap.home.team.all_out_count, 1);
    assert_eq!(snap.away.team.score, 2);
}

// ============================================================================
// Undo
// ============================================================================

#[test]
fn test_undo_reverts_one_raid() {
    let mut m = live_match();
    open_raid(&mut m, AWAY, 0);
    m.score(AWAY, 2).unwrap();
    m.end_raid(AWAY).unwrap();
    let before = m.snapshot();

    open_raid(&mut m, HOME, 1);
    m.score(HOME, 2).unwrap();
    m.out(AWAY, 3).unwrap();
    m.select_player_at(AWAY, 0).unwrap();
    m.tackle(AWAY).unwrap();
    m.out(HOME, 1).unwrap();
    m.end_raid(HOME).unwrap();

    let snap = m.undo(HOME).unwrap();
    assert_eq!(snap.home.team.score, before.home.team.score);
    assert_eq!(snap.away.team.score, before.away.team.score);
    for side in TeamSide::BOTH {
        let alive: Vec<bool> = snap.team(side).team.players.iter().map(|p| p.alive).collect();
        let was: Vec<bool> = before.team(side).team.players.iter().map(|p| p.alive).collect();
        assert_eq!(alive, was);
    }

    // tallies are left as they were
    assert_eq!(snap.home.team.raid_points, 2);
    assert_eq!(snap.home.team.players[1].stats.raid, 2);

    // only once; the earlier away raid is no longer reachable
    assert_eq!(m.undo(HOME).unwrap(), snap);
    assert_eq!(m.undo(AWAY).unwrap(), snap);
    assert_eq!(snap.away.team.score, 2);
}

#[test]
fn test_undo_blocked_after_opponent_raid() {
    let mut m = live_match();
    knock_out(&mut m, AWAY, 5);

    // B1 is tackled, P1 comes back
    open_raid(&mut m, HOME, 0);
    m.out(HOME, 0).unwrap();
    m.end_raid(HOME).unwrap();
    assert!(m.snapshot().away.team.players[0].alive);

    // P6 and P7 go out; P1 is the only one left
    open_raid(&mut m, AWAY, 5);
    m.out(AWAY, 5).unwrap();
    m.out(AWAY, 6).unwrap();
    let ended = m.end_raid(AWAY).unwrap();
    assert_eq!(ended.away.alive_count, 1);
    assert_eq!(ended.home.undo_available, 0);

    let snap = m.undo(HOME).unwrap();
    assert_eq!(snap, ended);
    assert_eq!(snap.away.alive_count, 1);
    assert!(snap.away.team.players[0].alive);
    assert!(!m.events().iter().any(|e| matches!(e, MatchEvent::RaidUndone { team: HOME, .. })));

    // the away raid itself is still undoable
    let snap = m.undo(AWAY).unwrap();
    assert_eq!(snap.away.alive_count, 3);
    assert!(snap.away.team.players[5].alive && snap.away.team.players[6].alive);
}

#[test]
fn test_undo_log_cleared_on_next_raid() {
    let mut m = live_match();
    open_raid(&mut m, HOME, 0);
    m.score(HOME, 4).unwrap();
    m.end_raid(HOME).unwrap();
    assert_eq!(m.snapshot().home.undo_available, 1);

    m.start_raid(HOME).unwrap();
    assert_eq!(m.snapshot().home.undo_available, 0);
    m.end_raid(HOME).unwrap();
    assert_eq!(m.undo(HOME).unwrap().home.team.score, 4);
}

#[test]
fn test_undo_of_all_out() {
    let mut m = live_match();
    knock_out(&mut m, AWAY, 6);
    open_raid(&mut m, HOME, 0);
    m.out(AWAY, 6).unwrap();
    m.end_raid(HOME).unwrap();

    let snap = m.undo(HOME).unwrap();
    assert_eq!(snap.home.team.score, 0);
    assert_eq!(snap.away.alive_count, 1);
    assert!(snap.away.team.players[6].alive);
}

// ============================================================================
// Phases and clocks
// ============================================================================

#[test]
fn test_halftime_at_zero() {
    let mut m = live_match();
    m.advance(1200).unwrap();
    assert!(!m.snapshot().match_clock.running);

    let snap = m.request_halftime().unwrap();
    assert_eq!(snap.phase, MatchPhase::Halftime);
    assert_eq!(snap.match_clock.remaining_seconds, 1200);
    assert_eq!(snap.next_raider, AWAY);
}

#[test]
fn test_halftime_early_rejected() {
    let mut m = live_match();
    m.advance(600).unwrap();
    let err = m.request_halftime().unwrap_err();
    assert!(matches!(err, MatchError::PreconditionFailed(_)));
    assert_eq!(m.phase(), MatchPhase::FirstHalf);
    assert_eq!(m.snapshot().match_clock.text, "10:00");
}

#[test]
fn test_full_time_early_rejected() {
    let mut m = live_match();
    m.advance(1200).unwrap();
    m.request_halftime().unwrap();
    m.end_halftime().unwrap();
    m.start_match().unwrap();
    assert!(matches!(m.request_full_time(), Err(MatchError::PreconditionFailed(_))));
    assert!(matches!(m.request_halftime(), Err(MatchError::InvalidTransition(_))));
}

#[test]
fn test_advance_stops_when_clocks_idle() {
    let mut m = new_match();
    let snap = m.advance(u32::MAX).unwrap();
    assert_eq!(snap.match_clock.remaining_seconds, 1200);

    let mut m = live_match();
    let snap = m.advance(u32::MAX).unwrap();
    assert_eq!(snap.match_clock.remaining_seconds, 0);
    assert!(!snap.match_clock.running);
    assert_eq!(snap.phase, MatchPhase::FirstHalf);
}

#[test]
fn test_expired_half_blocks_raids() {
    let mut m = live_match();
    m.advance(1200).unwrap();
    assert!(matches!(m.start_raid(HOME), Err(MatchError::InvalidTransition(_))));
    assert!(matches!(m.start_match(), Err(MatchError::InvalidTransition(_))));
}

#[test]
fn test_half_end_deferred_until_raid_ends() {
    let mut m = live_match();
    m.advance(1190).unwrap();
    open_raid(&mut m, HOME, 0);
    m.pause_raid_clock().unwrap();
    m.advance(10).unwrap();

    let snap = m.snapshot();
    assert_eq!(snap.phase, MatchPhase::FirstHalf);
    assert!(snap.phase_end_pending);
    assert!(snap.raid.is_some());
    m.score(HOME, 1).unwrap();

    let snap = m.end_raid(HOME).unwrap();
    assert_eq!(snap.phase, MatchPhase::Halftime);
    assert!(!snap.phase_end_pending);
    assert_eq!(snap.match_clock.remaining_seconds, 1200);
    assert_eq!(snap.home.team.score, 1);
}

#[test]
fn test_raid_and_half_expire_together() {
    let mut m = live_match();
    m.advance(1170).unwrap();
    open_raid(&mut m, HOME, 0);
    m.advance(30).unwrap();

    let snap = m.snapshot();
    assert_eq!(snap.phase, MatchPhase::Halftime);
    assert!(snap.raid.is_none());
}

#[test]
fn test_deferred_full_time() {
    let mut m = live_match();
    m.advance(1200).unwrap();
    m.request_halftime().unwrap();
    m.end_halftime().unwrap();
    m.start_match().unwrap();
    m.advance(1195).unwrap();
    open_raid(&mut m, AWAY, 0);
    m.score(AWAY, 2).unwrap();
    m.advance(5).unwrap();
    assert_eq!(m.phase(), MatchPhase::SecondHalf);

    let snap = m.end_raid(AWAY).unwrap();
    assert_eq!(snap.phase, MatchPhase::Ended);
    assert!(!snap.match_clock.running);
    assert_eq!(m.summary().winner.as_deref(), Some("Patna Pirates"));
    assert!(matches!(m.start_raid(HOME), Err(MatchError::InvalidTransition(_))));
}

#[test]
fn test_tie_at_full_time() {
    let mut m = live_match();
    m.advance(1200).unwrap();
    m.request_halftime().unwrap();
    m.end_halftime().unwrap();
    m.start_match().unwrap();
    m.advance(1200).unwrap();
    m.request_full_time().unwrap();
    assert_eq!(m.summary().winner.as_deref(), Some("Tie"));
}

#[test]
fn test_timeout_runs_alongside_match_clock() {
    let mut m = live_match();
    m.start_timeout().unwrap();
    let snap = m.advance(10).unwrap();
    assert_eq!(snap.timeout_clock.remaining_seconds, 20);
    assert_eq!(snap.match_clock.text, "19:50");
}

#[test]
fn test_event_timeline() {
    let mut m = live_match();
    open_raid(&mut m, HOME, 0);
    m.score(HOME, 1).unwrap();
    m.end_raid(HOME).unwrap();

    insta::assert_json_snapshot!(m.events(), @r###"
    [
      {
        "event": "phase_changed",
        "phase": "first_half"
      },
      {
        "event": "raid_started",
        "team": "home",
        "number": 1,
        "do_or_die": false
      },
      {
        "event": "raid_ended",
        "team": "home",
        "number": 1,
        "outcome": {
          "kind": "scored"
        },
        "expired": false
      }
    ]
    "###);
}

// ============================================================================
// Properties
// ============================================================================

mod proptests {
    use super::*;
    use crate::engine::{KabaddiMatch, MatchSnapshot};
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    #[derive(Debug, Clone)]
    enum Op {
        StartRaid(TeamSide),
        EndRaid(TeamSide),
        Select(TeamSide, usize),
        Foul(TeamSide),
        Score(TeamSide, u8),
        Bonus(TeamSide),
        Tackle(TeamSide),
        Out(TeamSide, usize),
        Undo(TeamSide),
        Tick(u32),
    }

    fn side() -> impl Strategy<Value = TeamSide> {
        prop_oneof![Just(TeamSide::Home), Just(TeamSide::Away)]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            side().prop_map(Op::StartRaid),
            side().prop_map(Op::EndRaid),
            (side(), 0usize..8).prop_map(|(s, i)| Op::Select(s, i)),
            side().prop_map(Op::Foul),
            (side(), 0u8..9).prop_map(|(s, p)| Op::Score(s, p)),
            side().prop_map(Op::Bonus),
            side().prop_map(Op::Tackle),
            (side(), 0usize..8).prop_map(|(s, i)| Op::Out(s, i)),
            side().prop_map(Op::Undo),
            (0u32..40).prop_map(Op::Tick),
        ]
    }

    fn run(m: &mut KabaddiMatch, op: &Op) {
        let _ = match *op {
            Op::StartRaid(s) => m.start_raid(s),
            Op::EndRaid(s) => m.end_raid(s),
            Op::Select(s, i) => m.select_player_at(s, i),
            Op::Foul(s) => m.toggle_foul(s),
            Op::Score(s, p) => m.score(s, p),
            Op::Bonus(s) => m.bonus(s),
            Op::Tackle(s) => m.tackle(s),
            Op::Out(s, i) => m.out(s, i),
            Op::Undo(s) => m.undo(s),
            Op::Tick(n) => m.advance(n),
        };
    }

    /// Commands inside an open raid; raid starts, undo and clock ticks are skipped.
    fn raid_ops(m: &mut KabaddiMatch, ops: &[Op]) {
        for op in ops {
            match op {
                Op::StartRaid(_) | Op::Undo(_) | Op::Tick(_) => {}
                other => run(m, other),
            }
        }
    }

    /// Scores and rosters match; tallies and streaks are not compared.
    fn prop_assert_same_board(
        after: &MatchSnapshot,
        before: &MatchSnapshot,
    ) -> Result<(), TestCaseError> {
        for side in TeamSide::BOTH {
            prop_assert_eq!(after.team(side).team.score, before.team(side).team.score);
            let alive: Vec<bool> = after.team(side).team.players.iter().map(|p| p.alive).collect();
            let was: Vec<bool> = before.team(side).team.players.iter().map(|p| p.alive).collect();
            prop_assert_eq!(alive, was);
        }
        Ok(())
    }

    proptest! {
        /// Property: no sequence of commands leaves a team fully out
        #[test]
        fn prop_snapshot_invariants(ops in prop::collection::vec(op(), 0..80)) {
            let mut m = live_match();
            for op in &ops {
                run(&mut m, op);
                let snap = m.snapshot();
                for side in TeamSide::BOTH {
                    let team = snap.team(side);
                    prop_assert!(team.alive_count >= 1);
                    prop_assert!(team.alive_count <= 7);
                    prop_assert!(team.empty_raids.consecutive_empty_raids < 3);
                }
                prop_assert!(matches!(snap.phase, MatchPhase::FirstHalf | MatchPhase::Halftime));
                if let Some(raid) = snap.raid {
                    prop_assert!(raid.number >= 1);
                }
            }
        }

        /// Property: a rejected command changes nothing
        #[test]
        fn prop_rejection_is_atomic(ops in prop::collection::vec(op(), 0..60)) {
            let mut m = live_match();
            for op in &ops {
                let before = m.snapshot();
                let events = m.events().len();
                let result = match *op {
                    Op::StartRaid(s) => m.start_raid(s),
                    Op::EndRaid(s) => m.end_raid(s),
                    Op::Select(s, i) => m.select_player_at(s, i),
                    Op::Score(s, p) => m.score(s, p),
                    Op::Bonus(s) => m.bonus(s),
                    Op::Tackle(s) => m.tackle(s),
                    Op::Out(s, i) => m.out(s, i),
                    _ => { run(&mut m, op); continue; }
                };
                if result.is_err() {
                    prop_assert_eq!(m.snapshot(), before);
                    prop_assert_eq!(m.events().len(), events);
                }
            }
        }

        /// Property: undo restores both scores and both rosters to their
        /// pre-raid values
        #[test]
        fn prop_undo_restores_pre_raid_state(
            raider in side(),
            knocked in (0usize..7, 0usize..7),
            streak in 0usize..3,
            preselect in prop::option::of(0usize..7),
            ops in prop::collection::vec(op(), 0..30),
        ) {
            let mut m = live_match();
            knock_out(&mut m, TeamSide::Home, knocked.0);
            knock_out(&mut m, TeamSide::Away, knocked.1);
            for _ in 0..streak {
                empty_raid(&mut m, raider, 6);
            }
            if let Some(i) = preselect {
                let _ = m.select_player_at(raider, i);
            }
            let before = m.snapshot();

            m.start_raid(raider).unwrap();
            raid_ops(&mut m, &ops);
            let _ = m.end_raid(raider);
            let after = m.undo(raider).unwrap();

            prop_assert_same_board(&after, &before)?;
        }

        /// Property: once the other team has raided, the earlier raid can no
        /// longer be undone; the latest one still can
        #[test]
        fn prop_undo_limited_to_latest_raid(
            first in side(),
            knocked in (0usize..7, 0usize..7),
            first_ops in prop::collection::vec(op(), 0..20),
            second_ops in prop::collection::vec(op(), 0..20),
        ) {
            let second = first.opponent();
            let mut m = live_match();
            knock_out(&mut m, TeamSide::Home, knocked.0);
            knock_out(&mut m, TeamSide::Away, knocked.1);

            m.start_raid(first).unwrap();
            raid_ops(&mut m, &first_ops);
            let _ = m.end_raid(first);
            let between = m.snapshot();

            m.start_raid(second).unwrap();
            raid_ops(&mut m, &second_ops);
            let _ = m.end_raid(second);
            let latest = m.snapshot();

            let stale = m.undo(first).unwrap();
            prop_assert_eq!(&stale, &latest);
            for side in TeamSide::BOTH {
                prop_assert!(stale.team(side).alive_count >= 1);
            }

            let undone = m.undo(second).unwrap();
            prop_assert_same_board(&undone, &between)?;
            for side in TeamSide::BOTH {
                prop_assert!(undone.team(side).alive_count >= 1);
            }
        }

        /// Property: the last player going out revives the whole team and
        /// pays the opponent exactly the all-out points
        #[test]
        fn prop_all_out_atomic(victim in side(), last in 0usize..7, opp_score in 0u8..8) {
            let mut m = live_match();
            let raider = victim.opponent();
            open_raid(&mut m, raider, 0);
            if opp_score > 0 {
                m.score(raider, opp_score.min(7)).unwrap();
            }
            for (i, p) in m.teams_mut_for_test()[victim].players.iter_mut().enumerate() {
                p.alive = i == last;
            }
            let before = m.snapshot();

            let snap = m.out(victim, last).unwrap();
            prop_assert!(snap.team(victim).team.players.iter().all(|p| p.alive));
            prop_assert_eq!(snap.team(raider).team.score, before.team(raider).team.score + 2);
            prop_assert_eq!(
                snap.team(victim).team.all_out_count,
                before.team(victim).team.all_out_count + 1
            );
        }
    }
}
