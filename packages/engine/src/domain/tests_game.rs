use crate::domain::game::MatchScore;
use crate::domain::scoring::{RoundOutcome, RoundScoreReport, TeamScore};
use crate::domain::state::{dealer_for_round, Team};
use crate::errors::domain::DomainError;

fn report(a: u16, b: u16) -> RoundScoreReport {
    let team = |total| TeamScore {
        card_points: total,
        total,
        ..TeamScore::default()
    };
    RoundScoreReport {
        teams: [team(a), team(b)],
        caller: Team::A,
        outcome: RoundOutcome::Passed,
        winning_declaration: None,
        instant_win: None,
    }
}

#[test]
fn accumulates_until_a_team_reaches_the_target() {
    let mut score = MatchScore::default();
    assert_eq!(score.points_to_win(), 1001);
    for _ in 0..6 {
        assert_eq!(score.apply(&report(162, 0)).unwrap(), None);
    }
    assert_eq!(score.total(Team::A), 972);
    assert_eq!(score.apply(&report(100, 62)).unwrap(), Some(Team::A));
    assert_eq!(score.winner(), Some(Team::A));
    assert_eq!(score.rounds_played(), 7);
    assert!(matches!(score.apply(&report(0, 162)), Err(DomainError::Invariant(_))));
}

#[test]
fn both_past_target_higher_total_wins() {
    let mut score = MatchScore::new(200);
    score.apply(&report(150, 150)).unwrap();
    assert_eq!(score.apply(&report(60, 102)).unwrap(), Some(Team::B));
}

#[test]
fn exact_tie_past_target_plays_on() {
    let mut score = MatchScore::new(200);
    score.apply(&report(150, 150)).unwrap();
    assert_eq!(score.apply(&report(81, 81)).unwrap(), None);
    assert_eq!(score.apply(&report(162, 0)).unwrap(), Some(Team::A));
}

#[test]
fn instant_win_ends_the_match() {
    let mut score = MatchScore::default();
    let mut run = report(0, 1001);
    run.outcome = RoundOutcome::InstantWin;
    run.instant_win = Some(Team::B);
    assert_eq!(score.apply(&run).unwrap(), Some(Team::B));
}

#[test]
fn dealer_rotates_each_round() {
    let dealers: Vec<u8> = (0..6).map(|r| dealer_for_round(2, r)).collect();
    assert_eq!(dealers, vec![2, 3, 0, 1, 2, 3]);
}
