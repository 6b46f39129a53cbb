// Proptest generators for domain types.
// Cards are drawn without replacement so hands and tricks never share a card.

use proptest::prelude::*;

use crate::domain::state::Seat;
use crate::domain::{Card, Rank, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Spades),
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
    ]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    (0usize..8).prop_map(|i| Rank::ALL[i])
}

/// Generate a single Card
pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card::new(rank, suit))
}

/// Generate a Seat (0-3)
pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..=3u8
}

/// Generate `count` unique cards from the 32-card deck
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut all_cards: Vec<Card> = Card::all().collect();
        for i in 0..count.min(all_cards.len()) {
            let j = rng.random_range(i..all_cards.len());
            all_cards.swap(i, j);
        }
        all_cards.truncate(count);
        all_cards
    })
}

/// Generate a hand of 1 to 8 unique cards
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    (1usize..=8).prop_flat_map(unique_cards)
}

/// A whole deck split into four 8-card hands
pub fn full_deal() -> impl Strategy<Value = [Vec<Card>; 4]> {
    unique_cards(32).prop_map(|cards| {
        let mut hands: [Vec<Card>; 4] = Default::default();
        for (i, card) in cards.into_iter().enumerate() {
            hands[i / 8].push(card);
        }
        hands
    })
}

/// Complete trick: 4 unique cards played clockwise from a random leader.
/// Returns (plays, trump)
pub fn complete_trick() -> impl Strategy<Value = (Vec<(Seat, Card)>, Suit)> {
    (seat(), unique_cards(4), suit()).prop_map(|(leader, cards, trump)| {
        let plays = cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| ((leader + i as u8) % 4, card))
            .collect();
        (plays, trump)
    })
}

/// A partial trick (0-3 cards) plus a disjoint hand of 1-8 cards and a trump.
/// Returns (trick plays, hand, trump)
pub fn trick_and_hand() -> impl Strategy<Value = (Vec<(Seat, Card)>, Vec<Card>, Suit)> {
    (0usize..=3, 1usize..=8, seat(), suit()).prop_flat_map(|(played, held, leader, trump)| {
        unique_cards(played + held).prop_map(move |cards| {
            let plays = cards[..played]
                .iter()
                .enumerate()
                .map(|(i, &card)| ((leader + i as u8) % 4, card))
                .collect();
            (plays, cards[played..].to_vec(), trump)
        })
    })
}
