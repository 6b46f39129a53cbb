//! Parsing of card codes ("AS", "10H") and their parts.

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::InvalidCard;

// Write-once intern table from code to card.
static CARDS_BY_CODE: Lazy<HashMap<&'static str, Card>> =
    Lazy::new(|| Card::all().map(|card| (card.code(), card)).collect());

impl FromStr for Card {
    type Err = InvalidCard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        CARDS_BY_CODE
            .get(code.as_str())
            .copied()
            .ok_or_else(|| InvalidCard::UnknownCode(s.to_string()))
    }
}

impl FromStr for Rank {
    type Err = InvalidCard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "10" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(InvalidCard::UnknownRank(s.to_string())),
        }
    }
}

impl FromStr for Suit {
    type Err = InvalidCard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" | "SPADES" => Ok(Suit::Spades),
            "H" | "HEARTS" => Ok(Suit::Hearts),
            "D" | "DIAMONDS" => Ok(Suit::Diamonds),
            "C" | "CLUBS" => Ok(Suit::Clubs),
            _ => Err(InvalidCard::UnknownSuit(s.to_string())),
        }
    }
}

impl Card {
    /// Build a card from textual rank and suit, e.g. `("10", "H")`.
    pub fn try_new(rank: &str, suit: &str) -> Result<Self, InvalidCard> {
        Ok(Card::new(rank.parse()?, suit.parse()?))
    }
}

/// Parse a list of card codes, failing on the first bad token.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, InvalidCard>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|t| t.as_ref().parse()).collect()
}
