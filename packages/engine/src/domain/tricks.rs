use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{RulesConfig, UnderTrumpRule};
use crate::domain::rules::PLAYERS;
use crate::domain::state::Seat;
use crate::domain::{hand_has_suit, Card, Suit};
use crate::errors::domain::{DomainError, IllegalMove};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// The trick this card closed, if it was the fourth.
    pub completed: Option<CompletedTrick>,
    /// Tricks completed so far in the round, including this one.
    pub tricks_completed: usize,
    /// Seat expected to act next, if the round continues.
    pub next_to_act: Option<Seat>,
    pub round_over: bool,
}

/// A trick in progress: zero to four (seat, card) plays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    plays: Vec<(Seat, Card)>,
}

impl Trick {
    pub fn new() -> Self {
        Self {
            plays: Vec::with_capacity(PLAYERS),
        }
    }

    pub fn plays(&self) -> &[(Seat, Card)] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYERS
    }

    pub fn leader(&self) -> Option<Seat> {
        self.plays.first().map(|&(seat, _)| seat)
    }

    /// Suit of the first card; fixed once it lands.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|&(_, card)| card.suit)
    }

    pub fn contains_suit(&self, suit: Suit) -> bool {
        self.plays.iter().any(|&(_, c)| c.suit == suit)
    }

    /// Strongest card of `suit` in the trick.
    pub fn best_of_suit(&self, suit: Suit, trump: Suit) -> Option<Card> {
        let lead = self.lead_suit()?;
        self.plays
            .iter()
            .map(|&(_, c)| c)
            .filter(|c| c.suit == suit)
            .max_by_key(|c| c.trick_strength(lead, trump))
    }

    /// Append a play without rule checks.
    pub fn push(&mut self, seat: Seat, card: Card) -> Result<(), IllegalMove> {
        if self.is_complete() {
            return Err(IllegalMove::TrickComplete);
        }
        self.plays.push((seat, card));
        Ok(())
    }

    /// Freeze a four-card trick into its resolved form.
    pub fn complete(&self, trump: Suit) -> Result<CompletedTrick, DomainError> {
        let plays: [(Seat, Card); PLAYERS] = self.plays.clone().try_into().map_err(|_| {
            DomainError::invariant(format!(
                "cannot complete a trick holding {} cards",
                self.plays.len()
            ))
        })?;
        let lead = plays[0].1.suit;
        let winner = trick_winner(self, trump)
            .ok_or_else(|| DomainError::invariant("complete trick without a winner"))?;
        let points: u16 = plays.iter().map(|&(_, c)| c.point_value(Some(trump))).sum();
        Ok(CompletedTrick {
            plays,
            lead,
            trump,
            winner,
            points,
        })
    }
}

/// An immutable four-card trick with its winner and card points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub plays: [(Seat, Card); PLAYERS],
    pub lead: Suit,
    pub trump: Suit,
    pub winner: Seat,
    pub points: u16,
}

impl CompletedTrick {
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|&(_, c)| c)
    }
}

/// Check whether `card` may be played from `hand` onto `trick`.
///
/// Order of checks:
/// 1. the card is in hand and the trick has room
/// 2. lead suit must be followed, beating the best lead card when possible
///    (waived once a trump has cut a non-trump lead)
/// 3. void in lead: trump is forced, overtrumping when possible; under-trump
///    handling follows `config.under_trump`
/// 4. void in lead and trump: anything goes
pub fn is_playable(
    card: Card,
    hand: &[Card],
    trick: &Trick,
    trump: Suit,
    config: &RulesConfig,
) -> Result<(), IllegalMove> {
    if trick.is_complete() {
        return Err(IllegalMove::TrickComplete);
    }
    if !hand.contains(&card) {
        return Err(IllegalMove::CardNotInHand(card));
    }
    let Some(lead) = trick.lead_suit() else {
        return Ok(());
    };

    if hand_has_suit(hand, lead) {
        if card.suit != lead {
            return Err(IllegalMove::MustFollowSuit { lead });
        }
        let waived = lead != trump && trick.contains_suit(trump);
        if waived {
            return Ok(());
        }
        if let Some(best) = trick.best_of_suit(lead, trump) {
            let best_strength = best.trick_strength(lead, trump);
            let can_beat = hand
                .iter()
                .any(|c| c.suit == lead && c.trick_strength(lead, trump) > best_strength);
            if can_beat && card.trick_strength(lead, trump) <= best_strength {
                return Err(IllegalMove::MustPlayHigher { lead, best });
            }
        }
        return Ok(());
    }

    if !hand_has_suit(hand, trump) {
        return Ok(());
    }

    let Some(best_trump) = trick.best_of_suit(trump, trump) else {
        if card.suit != trump {
            return Err(IllegalMove::MustTrump { trump });
        }
        return Ok(());
    };

    let best_strength = best_trump.trick_strength(lead, trump);
    let can_overtrump = hand
        .iter()
        .any(|c| c.suit == trump && c.trick_strength(lead, trump) > best_strength);

    if can_overtrump {
        if card.suit != trump {
            return Err(IllegalMove::MustTrump { trump });
        }
        if config.must_overtrump && card.trick_strength(lead, trump) <= best_strength {
            return Err(IllegalMove::MustOvertrump { best: best_trump });
        }
        return Ok(());
    }

    match config.under_trump {
        UnderTrumpRule::MustPlayTrump if card.suit != trump => Err(IllegalMove::MustTrump { trump }),
        _ => Ok(()),
    }
}

/// Compute legal cards the player may play, independent of turn enforcement.
pub fn legal_moves(hand: &[Card], trick: &Trick, trump: Suit, config: &RulesConfig) -> Vec<Card> {
    let mut legal: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&card| {
            let verdict = is_playable(card, hand, trick, trump, config);
            trace!(%card, %trump, ok = verdict.is_ok(), "legality check");
            verdict.is_ok()
        })
        .collect();
    legal.sort();
    legal
}

/// Seat holding the strongest card so far; `None` for an empty trick.
pub fn trick_winner(trick: &Trick, trump: Suit) -> Option<Seat> {
    let lead = trick.lead_suit()?;
    trick
        .plays
        .iter()
        .fold(None, |best: Option<(Seat, u16)>, &(seat, card)| {
            let strength = card.trick_strength(lead, trump);
            match best {
                Some((_, best_strength)) if best_strength >= strength => best,
                _ => Some((seat, strength)),
            }
        })
        .map(|(seat, _)| seat)
}
