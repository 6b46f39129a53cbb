//! Table constants and the `Rules` facade over trick and bid validation.

use crate::config::RulesConfig;
use crate::domain::bidding::{validate_bid, BidChoice};
use crate::domain::state::Seat;
use crate::domain::tricks::{is_playable, legal_moves, trick_winner, Trick};
use crate::domain::{Card, Suit};
use crate::errors::domain::{IllegalMove, InvalidBid};

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: usize = 8;
pub const TRICKS_PER_ROUND: usize = 8;
pub const DECK_SIZE: usize = 32;

/// Card points in the deck with any trump suit.
pub const CARD_POINTS: u16 = 152;
pub const LAST_TRICK_BONUS: u16 = 10;
/// Card points plus the last-trick bonus.
pub const ROUND_POINTS: u16 = CARD_POINTS + LAST_TRICK_BONUS;
/// Bonus for a team that takes all eight tricks.
pub const CLEAN_SWEEP_BONUS: u16 = 90;
pub const BELOT_RUN_POINTS: u16 = 1001;
pub const DEFAULT_POINTS_TO_WIN: u16 = 1001;

/// Trick and bid rules under one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules {
    config: RulesConfig,
}

impl Rules {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn is_playable(
        &self,
        card: Card,
        hand: &[Card],
        trick: &Trick,
        trump: Suit,
    ) -> Result<(), IllegalMove> {
        is_playable(card, hand, trick, trump, &self.config)
    }

    pub fn legal_moves(&self, hand: &[Card], trick: &Trick, trump: Suit) -> Vec<Card> {
        legal_moves(hand, trick, trump, &self.config)
    }

    pub fn trick_winner(&self, trick: &Trick, trump: Suit) -> Option<Seat> {
        trick_winner(trick, trump)
    }

    pub fn validate_bid(
        &self,
        seat: Seat,
        rotation_index: usize,
        choice: BidChoice,
    ) -> Result<(), InvalidBid> {
        validate_bid(seat, rotation_index, choice)
    }
}
