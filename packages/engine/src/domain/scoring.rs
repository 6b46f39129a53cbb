//! Round scoring: card points, bonuses, declarations and the caller's contract.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RulesConfig;
use crate::domain::declarations::{CallValidator, Declaration};
use crate::domain::rules::{
    BELOT_RUN_POINTS, CARD_POINTS, CLEAN_SWEEP_BONUS, DECK_SIZE, LAST_TRICK_BONUS, PLAYERS,
    TRICKS_PER_ROUND,
};
use crate::domain::state::{is_valid_seat, round_start_seat, Seat, Team};
use crate::domain::tricks::{trick_winner, CompletedTrick, Trick};
use crate::errors::domain::DomainError;

/// One team's share of a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub card_points: u16,
    pub last_trick_bonus: u16,
    pub sweep_bonus: u16,
    pub declaration_points: u16,
    pub bela_points: u16,
    pub total: u16,
    pub tricks_won: u8,
}

impl TeamScore {
    fn compared(&self, include_bela: bool) -> u16 {
        let bela = if include_bela { self.bela_points } else { 0 };
        self.card_points + self.last_trick_bonus + self.sweep_bonus + self.declaration_points + bela
    }

    fn absorb(&mut self, other: &mut TeamScore, include_bela: bool) {
        self.card_points += std::mem::take(&mut other.card_points);
        self.last_trick_bonus += std::mem::take(&mut other.last_trick_bonus);
        self.sweep_bonus += std::mem::take(&mut other.sweep_bonus);
        self.declaration_points += std::mem::take(&mut other.declaration_points);
        if include_bela {
            self.bela_points += std::mem::take(&mut other.bela_points);
        }
    }

    fn finalize(&mut self) {
        self.total = self.compared(true);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The calling team beat the defenders.
    Passed,
    /// The calling team fell; the defenders took every compared point.
    Fell,
    /// A belot run ended the game.
    InstantWin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScoreReport {
    /// Indexed by `Team::index()`.
    pub teams: [TeamScore; 2],
    pub caller: Team,
    pub outcome: RoundOutcome,
    pub winning_declaration: Option<Declaration>,
    pub instant_win: Option<Team>,
}

impl RoundScoreReport {
    pub fn team(&self, team: Team) -> &TeamScore {
        &self.teams[team.index()]
    }

    pub fn total(&self, team: Team) -> u16 {
        self.team(team).total
    }

    pub fn passed(&self) -> bool {
        self.outcome == RoundOutcome::Passed
    }
}

/// Check that a round's tricks could come from one legal deal.
///
/// The first trick is led left of `dealer`, every later one by the previous
/// winner, and each seat plays once per trick.
fn check_tricks(tricks: &[CompletedTrick], dealer: Seat) -> Result<(), DomainError> {
    if tricks.len() != TRICKS_PER_ROUND {
        return Err(DomainError::invariant(format!(
            "expected {TRICKS_PER_ROUND} tricks, got {}",
            tricks.len()
        )));
    }
    let trump = tricks[0].trump;
    let mut seen = HashSet::with_capacity(DECK_SIZE);
    let mut points = 0u16;
    let mut leader = round_start_seat(dealer);
    for (i, done) in tricks.iter().enumerate() {
        if done.plays[0].0 != leader {
            return Err(DomainError::invariant(format!(
                "trick {i} led by seat {}, expected seat {leader}",
                done.plays[0].0
            )));
        }
        let mut played = [false; PLAYERS];
        for &(seat, _) in &done.plays {
            if !is_valid_seat(seat) || std::mem::replace(&mut played[seat as usize], true) {
                return Err(DomainError::invariant(format!(
                    "seat {seat} cannot play in trick {i}"
                )));
            }
        }

        if done.trump != trump {
            return Err(DomainError::invariant(format!(
                "trick {i} uses trump {} but the round uses {trump}",
                done.trump
            )));
        }
        let mut replay = Trick::new();
        for &(seat, card) in &done.plays {
            if !seen.insert(card) {
                return Err(DomainError::invariant(format!("card {card} played twice")));
            }
            replay.push(seat, card)?;
        }
        if trick_winner(&replay, trump) != Some(done.winner) {
            return Err(DomainError::invariant(format!(
                "trick {i} records seat {} as winner",
                done.winner
            )));
        }
        points += done.cards().map(|c| c.point_value(Some(trump))).sum::<u16>();
        leader = done.winner;
    }
    if points != CARD_POINTS {
        return Err(DomainError::invariant(format!(
            "tricks hold {points} card points, expected {CARD_POINTS}"
        )));
    }
    Ok(())
}

/// Score a finished round.
///
/// `caller` is the team that named trump; `dealer` breaks declaration ties.
pub fn score_round(
    tricks: &[CompletedTrick],
    declarations: &[Declaration],
    caller: Team,
    dealer: Seat,
    config: &RulesConfig,
) -> Result<RoundScoreReport, DomainError> {
    let resolved = CallValidator::new(config).resolve_declarations(declarations, dealer)?;

    if let Some(team) = resolved.belot_run_team() {
        let mut teams = [TeamScore::default(); 2];
        teams[team.index()].declaration_points = BELOT_RUN_POINTS;
        teams[team.index()].total = BELOT_RUN_POINTS;
        info!(%team, "belot run ends the game");
        return Ok(RoundScoreReport {
            teams,
            caller,
            outcome: RoundOutcome::InstantWin,
            winning_declaration: resolved.winning,
            instant_win: Some(team),
        });
    }

    check_tricks(tricks, dealer)?;

    let mut teams = [TeamScore::default(); 2];
    for done in tricks {
        let score = &mut teams[Team::of(done.winner).index()];
        score.card_points += done.points;
        score.tricks_won += 1;
    }
    if let Some(last) = tricks.last() {
        teams[Team::of(last.winner).index()].last_trick_bonus = LAST_TRICK_BONUS;
    }
    for score in teams.iter_mut() {
        if score.tricks_won as usize == TRICKS_PER_ROUND {
            score.sweep_bonus = CLEAN_SWEEP_BONUS;
        }
    }
    for team in Team::ALL {
        let score = &mut teams[team.index()];
        score.declaration_points = resolved.declaration_points(team);
        score.bela_points = resolved.bela_points(team);
    }

    let include_bela = config.bela_counts_toward_pass;
    let defender = caller.other();
    let passed =
        teams[caller.index()].compared(include_bela) > teams[defender.index()].compared(include_bela);

    if !passed {
        let [a, b] = &mut teams;
        let (caller_score, defender_score) = match caller {
            Team::A => (a, b),
            Team::B => (b, a),
        };
        defender_score.absorb(caller_score, include_bela);
    }
    for score in teams.iter_mut() {
        score.finalize();
    }

    let outcome = if passed {
        RoundOutcome::Passed
    } else {
        RoundOutcome::Fell
    };
    info!(
        %caller,
        ?outcome,
        team_a = teams[0].total,
        team_b = teams[1].total,
        "round scored"
    );
    Ok(RoundScoreReport {
        teams,
        caller,
        outcome,
        winning_declaration: resolved.winning,
        instant_win: None,
    })
}

/// Round scoring under one rules configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoring {
    config: RulesConfig,
}

impl Scoring {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn score_round(
        &self,
        tricks: &[CompletedTrick],
        declarations: &[Declaration],
        caller: Team,
        dealer: Seat,
    ) -> Result<RoundScoreReport, DomainError> {
        score_round(tricks, declarations, caller, dealer, &self.config)
    }
}
