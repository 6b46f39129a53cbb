//! A player's hand: the cards they still hold.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::cards_logic::hand_has_suit;
use super::cards_types::{Card, Suit};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        hand_has_suit(&self.0, suit)
    }

    /// Remove `card` from the hand, handing it to the caller.
    pub fn take(&mut self, card: Card) -> Option<Card> {
        let pos = self.0.iter().position(|&c| c == card)?;
        Some(self.0.remove(pos))
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    pub(crate) fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
    }

    pub fn sorted(&self) -> Vec<Card> {
        let mut cards = self.0.clone();
        cards.sort();
        cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.0
    }
}

impl Deref for Hand {
    type Target = [Card];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
