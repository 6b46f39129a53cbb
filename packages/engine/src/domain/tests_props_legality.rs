use proptest::prelude::*;

use crate::config::{RulesConfig, UnderTrumpRule};
use crate::domain::tricks::{is_playable, legal_moves, Trick};
use crate::domain::{hand_has_suit, test_gens, test_prelude, Card, Suit};
use crate::errors::domain::IllegalMove;

fn build_trick(plays: &[(u8, Card)]) -> Trick {
    let mut trick = Trick::new();
    for &(seat, card) in plays {
        trick.push(seat, card).unwrap();
    }
    trick
}

fn configs() -> [RulesConfig; 3] {
    [
        RulesConfig::default(),
        RulesConfig {
            under_trump: UnderTrumpRule::MayDiscard,
            ..RulesConfig::default()
        },
        RulesConfig {
            must_overtrump: false,
            ..RulesConfig::default()
        },
    ]
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: a hand always has at least one legal card, and legal_moves
    /// is exactly the set is_playable accepts.
    #[test]
    fn prop_legal_moves_agree_with_is_playable(
        (plays, hand, trump) in test_gens::trick_and_hand(),
    ) {
        let trick = build_trick(&plays);
        for cfg in configs() {
            let legal = legal_moves(&hand, &trick, trump, &cfg);
            prop_assert!(!legal.is_empty(), "no legal move: hand={:?} trick={:?}", hand, plays);
            for &card in &hand {
                let ok = is_playable(card, &hand, &trick, trump, &cfg).is_ok();
                prop_assert_eq!(ok, legal.contains(&card));
            }
            let mut sorted = legal.clone();
            sorted.sort();
            prop_assert_eq!(sorted, legal);
        }
    }

    /// Property: holding the lead suit, only lead-suit cards are legal.
    #[test]
    fn prop_follow_suit(
        (plays, hand, trump) in test_gens::trick_and_hand(),
    ) {
        prop_assume!(!plays.is_empty());
        let lead = plays[0].1.suit;
        prop_assume!(hand_has_suit(&hand, lead));
        let trick = build_trick(&plays);
        for card in legal_moves(&hand, &trick, trump, &RulesConfig::default()) {
            prop_assert_eq!(card.suit, lead);
        }
    }

    /// Property: holding a lead card that beats the trick's best lead card,
    /// weaker lead cards are rejected unless a trump cut a plain lead.
    #[test]
    fn prop_must_play_higher(
        (plays, hand, trump) in test_gens::trick_and_hand(),
    ) {
        prop_assume!(!plays.is_empty());
        let lead = plays[0].1.suit;
        let trick = build_trick(&plays);
        let best = plays
            .iter()
            .filter(|(_, c)| c.suit == lead)
            .map(|(_, c)| c.trick_strength(lead, trump))
            .max()
            .unwrap();
        let can_beat = hand
            .iter()
            .any(|c| c.suit == lead && c.trick_strength(lead, trump) > best);
        let waived = lead != trump && plays.iter().any(|(_, c)| c.suit == trump);
        prop_assume!(can_beat && !waived);

        for card in legal_moves(&hand, &trick, trump, &RulesConfig::default()) {
            prop_assert!(card.trick_strength(lead, trump) > best);
        }
    }

    /// Property: void in lead but holding trump, a non-trump is only legal
    /// under MayDiscard with no way to overtrump.
    #[test]
    fn prop_void_in_lead_forces_trump(
        (plays, hand, trump) in test_gens::trick_and_hand(),
    ) {
        prop_assume!(!plays.is_empty());
        let lead = plays[0].1.suit;
        prop_assume!(!hand_has_suit(&hand, lead) && hand_has_suit(&hand, trump));
        let trick = build_trick(&plays);
        for &card in hand.iter().filter(|c| c.suit != trump) {
            let verdict = is_playable(card, &hand, &trick, trump, &RulesConfig::default());
            prop_assert_eq!(verdict, Err(IllegalMove::MustTrump { trump }));
        }
    }
}

#[test]
fn cards_outside_the_hand_are_rejected() {
    let hand: Vec<Card> = vec!["AS".parse().unwrap()];
    let other: Card = "KS".parse().unwrap();
    assert_eq!(
        is_playable(other, &hand, &Trick::new(), Suit::Hearts, &RulesConfig::default()),
        Err(IllegalMove::CardNotInHand(other))
    );
}
