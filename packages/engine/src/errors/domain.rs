//! Domain-level error types for the rules engine.
//!
//! Each rule family gets its own enum so callers can match on the exact
//! violation; `DomainError` wraps them all for code that only needs `?`.

use thiserror::Error;

use crate::domain::declarations::{DeclarationKind, SequenceLength};
use crate::domain::{Card, Rank, Seat, Suit};

/// A card, rank or suit outside the 32-card Belot deck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCard {
    #[error("unknown card code: {0:?}")]
    UnknownCode(String),
    #[error("unknown rank: {0:?}")]
    UnknownRank(String),
    #[error("unknown suit: {0:?}")]
    UnknownSuit(String),
    #[error("card {0} is already in the deck")]
    AlreadyInDeck(Card),
    #[error("card {0} appears more than once")]
    Duplicate(Card),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("insufficient cards: need {needed}, deck holds {available}")]
    InsufficientCards { needed: usize, available: usize },
    #[error("deck is empty")]
    EmptyDeck,
}

/// A play rejected by the trick rules or by turn order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("trick already holds four cards")]
    TrickComplete,
    #[error("must follow suit {lead}")]
    MustFollowSuit { lead: Suit },
    #[error("must beat {best} in suit {lead}")]
    MustPlayHigher { lead: Suit, best: Card },
    #[error("must play trump {trump}")]
    MustTrump { trump: Suit },
    #[error("must overtrump {best}")]
    MustOvertrump { best: Card },
    #[error("out of turn: expected seat {expected}, got seat {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("trump has not been called")]
    TrumpNotSet,
    #[error("round is over")]
    RoundOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBid {
    #[error("unknown seat {0}")]
    UnknownSeat(Seat),
    #[error("bidding rotation index {0} is out of range")]
    RotationOutOfRange(usize),
    #[error("last bidder must call a trump suit")]
    MustCall,
    #[error("out of turn: expected seat {expected}, got seat {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("bidding is closed")]
    BiddingClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDeclaration {
    #[error("expected {expected} cards, got {actual}")]
    WrongCardCount { expected: usize, actual: usize },
    #[error("sequence needs at least 3 cards, got {0}")]
    SequenceTooShort(usize),
    #[error("{actual} cards cannot form a sequence of {kind}")]
    LengthMismatch { kind: SequenceLength, actual: usize },
    #[error("cards are not all of one suit")]
    MixedSuits,
    #[error("ranks are not contiguous")]
    NotContiguous,
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("expected rank {expected}, found {found}")]
    WrongRank { expected: Rank, found: Rank },
    #[error("four of {0} cannot be declared")]
    RankNotDeclarable(Rank),
    #[error("bela requires a trump suit")]
    MissingTrump,
    #[error("card {0} is not a trump")]
    NotTrumpSuit(Card),
    #[error("bela must be the king and queen of trump")]
    NotBelaPair,
    #[error("cards are not in hand")]
    CardsNotInHand,
    #[error("sequence is not the longest run in {0}")]
    NotLongestSequence(Suit),
    #[error("unknown seat {0}")]
    UnknownSeat(Seat),
    #[error("declarations are closed")]
    Closed,
    #[error("{0} already declared")]
    AlreadyDeclared(DeclarationKind),
}

/// Umbrella error for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Card(#[from] InvalidCard),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Move(#[from] IllegalMove),
    #[error(transparent)]
    Bid(#[from] InvalidBid),
    #[error(transparent)]
    Declaration(#[from] InvalidDeclaration),
    /// Rejected configuration values
    #[error("config error: {0}")]
    Config(String),
    /// Orchestration bug: inputs that cannot come from a legal round
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }
}
