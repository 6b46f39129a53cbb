//! In-memory match simulator.
//!
//! Plays complete matches through the engine's `Round` and `MatchScore`,
//! with every seat choosing uniformly among its legal options.

use belot_engine::domain::rules::{CLEAN_SWEEP_BONUS, ROUND_POINTS};
use belot_engine::domain::{
    dealer_for_round, derive_dealing_seed, derive_player_seed, BidChoice, CallValidator,
    Declaration, MatchScore, Phase, Round, RoundScoreReport, Suit, Team,
};
use belot_engine::{DomainError, RulesConfig, Seat};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

const PLAYERS: usize = 4;

/// A match that never reaches its target is a bug, not a long game.
const MAX_ROUNDS: u32 = 500;

/// Chance that a seat not forced to call names a suit.
const CALL_PROBABILITY: f64 = 0.35;

/// One played-out round.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub round_no: u32,
    pub dealer: Seat,
    pub caller: Seat,
    pub trump: Suit,
    pub forced: bool,
    pub declarations: Vec<Declaration>,
    pub report: RoundScoreReport,
}

/// Result of simulating a complete match.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub winner: Team,
    pub totals: [u32; 2],
    pub rounds: Vec<RoundRecord>,
}

impl GameResult {
    pub fn rounds_played(&self) -> usize {
        self.rounds.len()
    }

    pub fn ended_by_belot_run(&self) -> bool {
        self.rounds.last().is_some_and(|r| r.report.instant_win.is_some())
    }
}

pub struct Simulator {
    config: RulesConfig,
    validator: CallValidator,
    game_seed: u64,
    starting_dealer: Seat,
    seat_rngs: [StdRng; PLAYERS],
}

impl Simulator {
    pub fn new(game_seed: u64, config: RulesConfig) -> Self {
        Self {
            validator: CallValidator::new(&config),
            config,
            game_seed,
            starting_dealer: (game_seed % PLAYERS as u64) as Seat,
            seat_rngs: Self::seat_rngs(game_seed, 0),
        }
    }

    fn seat_rngs(game_seed: u64, round_no: u32) -> [StdRng; PLAYERS] {
        std::array::from_fn(|seat| {
            StdRng::seed_from_u64(derive_player_seed(game_seed, round_no, seat as u8))
        })
    }

    /// Play rounds until one team wins the match.
    pub fn simulate_game(mut self) -> Result<GameResult, SimulatorError> {
        let mut score = MatchScore::new(self.config.points_to_win);
        let mut rounds = Vec::new();

        for round_no in 0..MAX_ROUNDS {
            let record = self.play_round(round_no)?;
            let winner = score.apply(&record.report)?;
            rounds.push(record);
            if let Some(winner) = winner {
                return Ok(GameResult {
                    winner,
                    totals: [score.total(Team::A), score.total(Team::B)],
                    rounds,
                });
            }
        }
        Err(SimulatorError::NoWinner(MAX_ROUNDS))
    }

    fn play_round(&mut self, round_no: u32) -> Result<RoundRecord, SimulatorError> {
        self.seat_rngs = Self::seat_rngs(self.game_seed, round_no);
        let dealer = dealer_for_round(self.starting_dealer, round_no);
        let mut round = Round::new(dealer, self.config.clone())?;
        round.deal(derive_dealing_seed(self.game_seed, round_no))?;

        self.play_bidding(&mut round)?;
        self.announce_declarations(&mut round)?;
        self.play_tricks(&mut round)?;

        let call = round
            .call()
            .ok_or_else(|| SimulatorError::InvalidState("round finished without a call".into()))?;
        let report = round.finish()?;
        check_conservation(round_no, &report)?;

        Ok(RoundRecord {
            round_no,
            dealer,
            caller: call.seat,
            trump: call.suit,
            forced: call.forced,
            declarations: round.declarations().to_vec(),
            report,
        })
    }

    fn play_bidding(&mut self, round: &mut Round) -> Result<(), SimulatorError> {
        while round.phase() == Phase::Bidding {
            let seat = self.turn(round)?;
            let rng = &mut self.seat_rngs[seat as usize];
            let choice = if rng.random_bool(CALL_PROBABILITY) || round.bidding().bids().len() == PLAYERS - 1 {
                BidChoice::Call(Suit::ALL[rng.random_range(0..Suit::ALL.len())])
            } else {
                BidChoice::Pass
            };
            trace!(seat, ?choice, "bid");
            round.bid(seat, choice)?;
        }
        Ok(())
    }

    /// Every seat announces everything its dealt hand can declare.
    fn announce_declarations(&self, round: &mut Round) -> Result<(), SimulatorError> {
        let trump = round.trump();
        for seat in 0..PLAYERS as Seat {
            let hand = round
                .dealt_hand(seat)
                .ok_or_else(|| SimulatorError::InvalidState(format!("no hand for seat {seat}")))?;
            for found in self.validator.detect(hand, trump, seat) {
                if round.phase() != Phase::Playing {
                    return Ok(());
                }
                debug!(seat, kind = %found.kind, "declaring");
                round.declare(seat, found.kind, &found.cards)?;
            }
        }
        Ok(())
    }

    fn play_tricks(&mut self, round: &mut Round) -> Result<(), SimulatorError> {
        while round.phase() == Phase::Playing {
            let seat = self.turn(round)?;
            let legal = round.legal_moves(seat);
            let card = *legal
                .choose(&mut self.seat_rngs[seat as usize])
                .ok_or_else(|| SimulatorError::InvalidState(format!("seat {seat} has no legal card")))?;
            round.play(seat, card)?;
        }
        Ok(())
    }

    fn turn(&self, round: &Round) -> Result<Seat, SimulatorError> {
        round
            .turn()
            .ok_or_else(|| SimulatorError::InvalidState(format!("no seat to act in {:?}", round.phase())))
    }
}

/// Card points and the last-trick bonus always add up to 162, plus 90 on a sweep.
fn check_conservation(round_no: u32, report: &RoundScoreReport) -> Result<(), SimulatorError> {
    if report.instant_win.is_some() {
        return Ok(());
    }
    let taken: u16 = report
        .teams
        .iter()
        .map(|t| t.card_points + t.last_trick_bonus + t.sweep_bonus)
        .sum();
    let sweep = report.teams.iter().any(|t| t.sweep_bonus > 0);
    let expected = ROUND_POINTS + if sweep { CLEAN_SWEEP_BONUS } else { 0 };
    if taken != expected {
        return Err(SimulatorError::PointsNotConserved {
            round_no,
            taken,
            expected,
        });
    }
    Ok(())
}

#[derive(Debug)]
pub enum SimulatorError {
    /// The engine rejected an action the simulator chose.
    Domain(DomainError),
    /// A round's points do not add up.
    PointsNotConserved { round_no: u32, taken: u16, expected: u16 },
    NoWinner(u32),
    InvalidState(String),
}

impl From<DomainError> for SimulatorError {
    fn from(err: DomainError) -> Self {
        SimulatorError::Domain(err)
    }
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Domain(err) => write!(f, "Domain error: {err}"),
            SimulatorError::PointsNotConserved {
                round_no,
                taken,
                expected,
            } => write!(f, "Round {round_no} took {taken} points, expected {expected}"),
            SimulatorError::NoWinner(rounds) => write!(f, "No winner after {rounds} rounds"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
