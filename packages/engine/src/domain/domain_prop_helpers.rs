// Independent oracles used by the property tests.

use crate::domain::cards_logic::{NON_TRUMP_ORDER, TRUMP_ORDER};
use crate::domain::state::Seat;
use crate::domain::{Card, Suit};

/// Index of the winning play, computed straight from the rank orders:
/// highest trump if any trump was played, else highest card of the lead suit.
pub fn oracle_trick_winner(plays: &[(Seat, Card)], trump: Suit) -> usize {
    let lead = plays[0].1.suit;
    let rank_pos = |order: &[crate::domain::Rank; 8], card: Card| {
        order.iter().position(|&r| r == card.rank).unwrap_or(0)
    };

    let trumps: Vec<usize> = (0..plays.len()).filter(|&i| plays[i].1.suit == trump).collect();
    if !trumps.is_empty() {
        return trumps
            .into_iter()
            .max_by_key(|&i| rank_pos(&TRUMP_ORDER, plays[i].1))
            .unwrap();
    }
    (0..plays.len())
        .filter(|&i| plays[i].1.suit == lead)
        .max_by_key(|&i| rank_pos(&NON_TRUMP_ORDER, plays[i].1))
        .unwrap()
}
