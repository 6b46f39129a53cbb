//! Card fixtures for scenario tests.

use belot_engine::domain::{Card, Hand, Rank, Suit};

/// Centralized helper for parsing hardcoded card tokens in fixtures.
pub struct CardFixtures;

impl CardFixtures {
    /// Parse hardcoded card tokens into Card instances.
    ///
    /// Only for tokens known to be valid (e.g. `["AS", "10H"]`); panics otherwise.
    pub fn parse_hardcoded(tokens: &[&str]) -> Vec<Card> {
        tokens
            .iter()
            .map(|s| {
                #[allow(clippy::expect_used)]
                s.parse::<Card>().expect("hardcoded valid card token")
            })
            .collect()
    }

    /// A hand built from hardcoded tokens.
    pub fn hand(tokens: &[&str]) -> Hand {
        Hand::new(Self::parse_hardcoded(tokens))
    }

    /// All eight cards of one suit, 7 through A.
    pub fn suit_run(suit: Suit) -> Hand {
        Rank::ALL.iter().map(|&rank| Card::new(rank, suit)).collect()
    }

    /// Four hands, one whole suit each, indexed by seat.
    pub fn suited_deal(suits: [Suit; 4]) -> [Hand; 4] {
        suits.map(Self::suit_run)
    }
}
