//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod declarations;
pub mod game;
pub mod hands;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod domain_prop_helpers;
#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_game;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_round;

// Re-exports for ergonomics
pub use bidding::{validate_bid, BidChoice, Bidding, TrumpCall};
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{deal_hands, Deck};
pub use declarations::{
    CallValidator, Declaration, DeclarationKind, ResolvedDeclarations, SequenceLength,
};
pub use game::MatchScore;
pub use hands::Hand;
pub use round::{Phase, Round};
pub use rules::Rules;
pub use scoring::{score_round, RoundOutcome, RoundScoreReport, Scoring, TeamScore};
pub use seed_derivation::{derive_dealing_seed, derive_player_seed};
pub use state::{dealer_for_round, Seat, Team};
pub use tricks::{legal_moves, trick_winner, CompletedTrick, PlayCardResult, Trick};
