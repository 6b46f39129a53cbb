//! One round ("mješanje"): deal, bid, declare, eight tricks, score.
//!
//! Every action validates against the current state before touching it,
//! so a rejected action leaves the round exactly as it was.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::domain::bidding::{BidChoice, Bidding, TrumpCall};
use crate::domain::declarations::{CallValidator, Declaration, DeclarationKind};
use crate::domain::dealing::deal_hands;
use crate::domain::hands::Hand;
use crate::domain::rules::{DECK_SIZE, HAND_SIZE, LAST_TRICK_BONUS, PLAYERS, TRICKS_PER_ROUND};
use crate::domain::scoring::{score_round, RoundScoreReport};
use crate::domain::state::{is_valid_seat, next_seat, nth_from, round_start_seat, Seat, Team};
use crate::domain::tricks::{is_playable, legal_moves, CompletedTrick, PlayCardResult, Trick};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, IllegalMove, InvalidBid, InvalidCard, InvalidDeclaration};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for cards.
    Dealing,
    /// Seats call or pass in turn, starting left of the dealer.
    Bidding,
    /// Trump is set; declarations open until the first trick closes.
    Playing,
    /// Eight tricks played or a belot run declared.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    config: RulesConfig,
    validator: CallValidator,
    dealer: Seat,
    phase: Phase,
    /// Current hands, indexed by seat.
    hands: [Hand; PLAYERS],
    /// Hands as dealt; declarations are checked against these.
    dealt: [Hand; PLAYERS],
    bidding: Bidding,
    call: Option<TrumpCall>,
    declarations: Vec<Declaration>,
    current: Trick,
    completed: Vec<CompletedTrick>,
    /// Card points plus last-trick bonus per team, as tricks close.
    running: [u16; 2],
    turn: Option<Seat>,
    report: Option<RoundScoreReport>,
}

impl Round {
    pub fn new(dealer: Seat, config: RulesConfig) -> Result<Self, DomainError> {
        if !is_valid_seat(dealer) {
            return Err(DomainError::config(format!("dealer seat {dealer} out of range")));
        }
        config.validate()?;
        Ok(Self {
            validator: CallValidator::new(&config),
            config,
            dealer,
            phase: Phase::Dealing,
            hands: Default::default(),
            dealt: Default::default(),
            bidding: Bidding::new(dealer),
            call: None,
            declarations: Vec::new(),
            current: Trick::new(),
            completed: Vec::with_capacity(TRICKS_PER_ROUND),
            running: [0; 2],
            turn: None,
            report: None,
        })
    }

    /// Shuffle, cut and deal from `seed`, starting left of the dealer.
    pub fn deal(&mut self, seed: u64) -> Result<(), DomainError> {
        self.require_phase(Phase::Dealing, "deal")?;
        let in_deal_order = deal_hands(seed, &self.config.deal_pattern)?;
        let first = round_start_seat(self.dealer);
        let mut by_seat: [Hand; PLAYERS] = Default::default();
        for (i, hand) in in_deal_order.into_iter().enumerate() {
            by_seat[nth_from(first, i as u8) as usize] = hand;
        }
        self.deal_from(by_seat)
    }

    /// Install pre-built hands, indexed by seat.
    pub fn deal_from(&mut self, hands: [Hand; PLAYERS]) -> Result<(), DomainError> {
        self.require_phase(Phase::Dealing, "deal")?;
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for (seat, hand) in hands.iter().enumerate() {
            if hand.len() != HAND_SIZE {
                return Err(DomainError::invariant(format!(
                    "seat {seat} holds {} cards, expected {HAND_SIZE}",
                    hand.len()
                )));
            }
            for card in hand.iter() {
                if !seen.insert(*card) {
                    return Err(InvalidCard::Duplicate(*card).into());
                }
            }
        }

        self.dealt = hands.clone();
        self.hands = hands;
        self.phase = Phase::Bidding;
        self.turn = self.bidding.expected_bidder();
        debug!(dealer = self.dealer, "hands dealt");
        Ok(())
    }

    pub fn bid(&mut self, seat: Seat, choice: BidChoice) -> Result<Option<TrumpCall>, DomainError> {
        if self.phase != Phase::Bidding {
            return Err(InvalidBid::BiddingClosed.into());
        }
        let call = self.bidding.place_bid(seat, choice)?;
        match call {
            Some(call) => {
                self.call = Some(call);
                self.phase = Phase::Playing;
                self.turn = Some(round_start_seat(self.dealer));
            }
            None => self.turn = self.bidding.expected_bidder(),
        }
        Ok(call)
    }

    /// Announce a declaration from the cards `seat` was dealt.
    pub fn declare(
        &mut self,
        seat: Seat,
        kind: DeclarationKind,
        cards: &[Card],
    ) -> Result<&Declaration, DomainError> {
        let trump = self.declarations_open()?;
        if !is_valid_seat(seat) {
            return Err(InvalidDeclaration::UnknownSeat(seat).into());
        }
        let declaration =
            self.validator
                .declare(seat, &self.dealt[seat as usize], kind, cards, Some(trump))?;
        // One sequence per suit and seat; other kinds only repeat verbatim.
        let taken = |d: &Declaration| match (d.kind, kind) {
            (DeclarationKind::Sequence(_), DeclarationKind::Sequence(_)) => {
                d.suit() == declaration.suit()
            }
            _ => d.kind == kind && d.cards == declaration.cards,
        };
        if self
            .declarations
            .iter()
            .any(|d| d.seat == declaration.seat && taken(d))
        {
            return Err(InvalidDeclaration::AlreadyDeclared(kind).into());
        }

        debug!(seat, kind = %kind, points = declaration.points, "declaration accepted");
        if kind == DeclarationKind::BelotRun {
            self.phase = Phase::Finished;
            self.turn = None;
        }
        self.declarations.push(declaration);
        self.declarations
            .last()
            .ok_or_else(|| DomainError::invariant("declaration vanished"))
    }

    /// Announce bela with the king and queen of trump.
    pub fn declare_bela(&mut self, seat: Seat) -> Result<&Declaration, DomainError> {
        let trump = self.declarations_open()?;
        let king = Card::new(Rank::King, trump);
        let queen = Card::new(Rank::Queen, trump);
        self.declare(seat, DeclarationKind::Bela, &[queen, king])
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<PlayCardResult, DomainError> {
        let trump = match self.phase {
            Phase::Dealing | Phase::Bidding => return Err(IllegalMove::TrumpNotSet.into()),
            Phase::Finished => return Err(IllegalMove::RoundOver.into()),
            Phase::Playing => self.trump().ok_or(IllegalMove::TrumpNotSet)?,
        };
        let expected = self
            .turn
            .ok_or_else(|| DomainError::invariant("playing phase without a seat to act"))?;
        if seat != expected {
            return Err(IllegalMove::OutOfTurn {
                expected,
                actual: seat,
            }
            .into());
        }

        let hand = &self.hands[seat as usize];
        if let Err(err) = is_playable(card, hand, &self.current, trump, &self.config) {
            debug!(seat, %card, %trump, error = %err, "play rejected");
            return Err(err.into());
        }

        let taken = self.hands[seat as usize]
            .take(card)
            .ok_or(IllegalMove::CardNotInHand(card))?;
        self.current.push(seat, taken)?;

        if !self.current.is_complete() {
            self.turn = Some(next_seat(seat));
            return Ok(PlayCardResult {
                completed: None,
                tricks_completed: self.completed.len(),
                next_to_act: self.turn,
                round_over: false,
            });
        }

        let done = self.current.complete(trump)?;
        let team = Team::of(done.winner);
        self.running[team.index()] += done.points;
        self.completed.push(done.clone());
        self.current = Trick::new();
        debug!(winner = done.winner, points = done.points, trick = self.completed.len(), "trick resolved");

        let round_over = self.completed.len() == TRICKS_PER_ROUND;
        if round_over {
            self.running[team.index()] += LAST_TRICK_BONUS;
            self.phase = Phase::Finished;
            self.turn = None;
        } else {
            self.turn = Some(done.winner);
        }
        Ok(PlayCardResult {
            completed: Some(done),
            tricks_completed: self.completed.len(),
            next_to_act: self.turn,
            round_over,
        })
    }

    /// Cards `seat` may legally play into the current trick.
    pub fn legal_moves(&self, seat: Seat) -> Vec<Card> {
        let (Phase::Playing, Some(trump)) = (self.phase, self.trump()) else {
            return Vec::new();
        };
        if !is_valid_seat(seat) {
            return Vec::new();
        }
        legal_moves(&self.hands[seat as usize], &self.current, trump, &self.config)
    }

    /// Score the round once it is over.
    pub fn finish(&mut self) -> Result<RoundScoreReport, DomainError> {
        if let Some(report) = &self.report {
            return Ok(report.clone());
        }
        if self.phase != Phase::Finished {
            return Err(DomainError::invariant(format!(
                "round not finished: {} of {TRICKS_PER_ROUND} tricks played",
                self.completed.len()
            )));
        }
        let call = self
            .call
            .ok_or_else(|| DomainError::invariant("finished round without a trump call"))?;
        let report = score_round(
            &self.completed,
            &self.declarations,
            Team::of(call.seat),
            self.dealer,
            &self.config,
        )?;
        info!(
            dealer = self.dealer,
            trump = %call.suit,
            outcome = ?report.outcome,
            team_a = report.teams[0].total,
            team_b = report.teams[1].total,
            "round finished"
        );
        self.report = Some(report.clone());
        Ok(report)
    }

    fn require_phase(&self, phase: Phase, action: &str) -> Result<(), DomainError> {
        if self.phase != phase {
            return Err(DomainError::invariant(format!(
                "cannot {action} in phase {:?}",
                self.phase
            )));
        }
        Ok(())
    }

    fn declarations_open(&self) -> Result<Suit, DomainError> {
        let trump = self.trump().ok_or(InvalidDeclaration::MissingTrump)?;
        if self.phase != Phase::Playing || !self.completed.is_empty() {
            return Err(InvalidDeclaration::Closed.into());
        }
        Ok(trump)
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trump(&self) -> Option<Suit> {
        self.call.map(|c| c.suit)
    }

    pub fn call(&self) -> Option<TrumpCall> {
        self.call
    }

    pub fn bidding(&self) -> &Bidding {
        &self.bidding
    }

    pub fn turn(&self) -> Option<Seat> {
        self.turn
    }

    pub fn hand(&self, seat: Seat) -> Option<&Hand> {
        self.hands.get(seat as usize)
    }

    pub fn dealt_hand(&self, seat: Seat) -> Option<&Hand> {
        self.dealt.get(seat as usize)
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current
    }

    pub fn completed_tricks(&self) -> &[CompletedTrick] {
        &self.completed
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Points taken so far by `team` (cards, plus the last-trick bonus at the end).
    pub fn running_total(&self, team: Team) -> u16 {
        self.running[team.index()]
    }
}
