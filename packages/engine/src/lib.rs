#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;


// Re-exports for public API
pub use config::{RulesConfig, UnderTrumpRule};
pub use domain::{
    BidChoice, CallValidator, Card, CompletedTrick, Declaration, DeclarationKind, Deck, Hand,
    MatchScore, Phase, Rank, Round, RoundOutcome, RoundScoreReport, Rules, Scoring, Seat, Suit,
    Team, Trick,
};
pub use errors::{DeckError, DomainError, IllegalMove, InvalidBid, InvalidCard, InvalidDeclaration};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
