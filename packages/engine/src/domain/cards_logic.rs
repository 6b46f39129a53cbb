//! Card game logic: point values, trick strength, suit checks

use super::cards_types::{Card, Rank, Suit};

/// Offset that lifts every trump above every non-trump card.
pub const TRUMP_STRENGTH_OFFSET: u16 = 100;

/// Weakest to strongest outside trump.
pub const NON_TRUMP_ORDER: [Rank; 8] = [
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ten,
    Rank::Ace,
];

/// Weakest to strongest inside trump.
pub const TRUMP_ORDER: [Rank; 8] = [
    Rank::Seven,
    Rank::Eight,
    Rank::Queen,
    Rank::King,
    Rank::Ten,
    Rank::Ace,
    Rank::Nine,
    Rank::Jack,
];

fn order_index(order: &[Rank; 8], rank: Rank) -> u16 {
    order.iter().position(|&r| r == rank).unwrap_or(0) as u16
}

impl Card {
    /// Points this card is worth when captured.
    pub fn point_value(self, trump: Option<Suit>) -> u16 {
        if trump == Some(self.suit) {
            match self.rank {
                Rank::Jack => 20,
                Rank::Nine => 14,
                Rank::Ace => 11,
                Rank::Ten => 10,
                Rank::King => 4,
                Rank::Queen => 3,
                Rank::Eight | Rank::Seven => 0,
            }
        } else {
            match self.rank {
                Rank::Ace => 11,
                Rank::Ten => 10,
                Rank::King => 4,
                Rank::Queen => 3,
                Rank::Jack => 2,
                Rank::Nine | Rank::Eight | Rank::Seven => 0,
            }
        }
    }

    /// Strength within one trick. Zero means the card cannot win.
    pub fn trick_strength(self, lead: Suit, trump: Suit) -> u16 {
        if self.suit == trump {
            TRUMP_STRENGTH_OFFSET + order_index(&TRUMP_ORDER, self.rank)
        } else if self.suit == lead {
            1 + order_index(&NON_TRUMP_ORDER, self.rank)
        } else {
            0
        }
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Suit) -> bool {
    a.trick_strength(lead, trump) > b.trick_strength(lead, trump)
}
