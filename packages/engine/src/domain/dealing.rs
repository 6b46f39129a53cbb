//! The 32-card deck: shuffling, cutting and patterned dealing.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::hands::Hand;
use crate::domain::rules::{DECK_SIZE, PLAYERS};
use crate::domain::Card;
use crate::errors::domain::{DeckError, DomainError, InvalidCard};

/// Ordered cards; the last element is the top of the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// All 32 cards in canonical order.
    pub fn new() -> Self {
        Self {
            cards: Card::all().collect(),
        }
    }

    /// A fresh deck shuffled by a seeded ChaCha8 stream.
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::new();
        deck.shuffle_with(&mut ChaCha8Rng::seed_from_u64(seed));
        deck
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Uniform shuffle from the thread RNG.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Lift the top `at` cards to the bottom.
    pub fn cut(&mut self, at: usize) {
        if self.cards.is_empty() {
            return;
        }
        let at = at % self.cards.len();
        self.cards.rotate_right(at);
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::EmptyDeck)
    }

    /// Put cards back on top. Rejects the whole batch if any card is
    /// already in the deck or repeats within the batch.
    pub fn return_cards(&mut self, cards: &[Card]) -> Result<(), InvalidCard> {
        for (i, card) in cards.iter().enumerate() {
            if self.cards.contains(card) {
                return Err(InvalidCard::AlreadyInDeck(*card));
            }
            if cards[..i].contains(card) {
                return Err(InvalidCard::Duplicate(*card));
            }
        }
        self.cards.extend_from_slice(cards);
        Ok(())
    }

    /// Deal packets round-robin: for each packet size in `pattern`, every
    /// player in turn receives that many cards from the top.
    ///
    /// Hands come back in deal order; index 0 is the first player served.
    pub fn deal(&mut self, num_players: usize, pattern: &[usize]) -> Result<Vec<Hand>, DomainError> {
        if num_players == 0 {
            return Err(DomainError::config("cannot deal to zero players"));
        }
        if pattern.is_empty() || pattern.contains(&0) {
            return Err(DomainError::config(format!(
                "invalid deal pattern {pattern:?}"
            )));
        }
        let needed = num_players * pattern.iter().sum::<usize>();
        if needed > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                needed,
                available: self.cards.len(),
            }
            .into());
        }

        let mut hands = vec![Hand::default(); num_players];
        for &packet in pattern {
            for hand in hands.iter_mut() {
                let start = self.cards.len() - packet;
                hand.extend(self.cards.drain(start..).rev());
            }
        }
        debug!(num_players, ?pattern, remaining = self.cards.len(), "dealt hands");
        Ok(hands)
    }
}

/// Shuffle, cut and deal a full deck to four players, deterministically per seed.
///
/// Hands come back in deal order (index 0 sits left of the dealer).
pub fn deal_hands(seed: u64, pattern: &[usize]) -> Result<[Hand; PLAYERS], DomainError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut deck = Deck::new();
    deck.shuffle_with(&mut rng);
    deck.cut(rng.random_range(1..DECK_SIZE));

    let hands = deck.deal(PLAYERS, pattern)?;
    if !deck.is_empty() {
        return Err(DomainError::config(format!(
            "deal pattern {pattern:?} leaves {} cards undealt",
            deck.len()
        )));
    }
    hands
        .try_into()
        .map_err(|_| DomainError::invariant("deal did not produce four hands"))
}
