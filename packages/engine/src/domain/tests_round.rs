use crate::config::RulesConfig;
use crate::domain::bidding::BidChoice;
use crate::domain::declarations::{DeclarationKind, SequenceLength};
use crate::domain::hands::Hand;
use crate::domain::round::{Phase, Round};
use crate::domain::scoring::RoundOutcome;
use crate::domain::{try_parse_cards, Card, Rank, Suit, Team};
use crate::errors::domain::{DomainError, IllegalMove, InvalidBid, InvalidCard, InvalidDeclaration};

fn c(code: &str) -> Card {
    code.parse().unwrap()
}

fn suit_hand(suit: Suit) -> Hand {
    Rank::ALL.iter().map(|&r| Card::new(r, suit)).collect()
}

/// Seat 0 holds every heart, seat 1 spades, seat 2 diamonds, seat 3 clubs.
fn suited_round(dealer: u8) -> Round {
    let mut round = Round::new(dealer, RulesConfig::default()).unwrap();
    round
        .deal_from([
            suit_hand(Suit::Hearts),
            suit_hand(Suit::Spades),
            suit_hand(Suit::Diamonds),
            suit_hand(Suit::Clubs),
        ])
        .unwrap();
    round
}

/// Play every remaining trick with the lowest legal card.
fn play_out(round: &mut Round) {
    while round.phase() == Phase::Playing {
        let seat = round.turn().unwrap();
        let card = round.legal_moves(seat)[0];
        round.play(seat, card).unwrap();
    }
}

#[test]
fn first_trick_end_to_end() {
    let mut round = suited_round(3);
    assert_eq!(round.turn(), Some(0));
    let call = round.bid(0, BidChoice::Call(Suit::Hearts)).unwrap().unwrap();
    assert_eq!(call.seat, 0);
    assert_eq!(round.phase(), Phase::Playing);
    assert_eq!(round.turn(), Some(0));

    round.play(0, c("JH")).unwrap();
    round.play(1, c("AS")).unwrap();
    round.play(2, c("AD")).unwrap();
    let result = round.play(3, c("AC")).unwrap();

    let done = result.completed.unwrap();
    assert_eq!(done.winner, 0);
    let expected: u16 = ["JH", "AS", "AD", "AC"]
        .iter()
        .map(|code| c(code).point_value(Some(Suit::Hearts)))
        .sum();
    assert_eq!(expected, 53);
    assert_eq!(round.running_total(Team::A), expected);
    assert_eq!(round.running_total(Team::B), 0);
    assert_eq!(result.next_to_act, Some(0));
    assert_eq!(round.hand(0).unwrap().len(), 7);
}

#[test]
fn rejected_actions_leave_the_round_unchanged() {
    let mut round = suited_round(3);
    let before = round.clone();
    assert!(matches!(
        round.bid(1, BidChoice::Pass),
        Err(DomainError::Bid(InvalidBid::OutOfTurn { expected: 0, actual: 1 }))
    ));
    assert!(matches!(
        round.play(0, c("JH")),
        Err(DomainError::Move(IllegalMove::TrumpNotSet))
    ));
    assert_eq!(round, before);

    round.bid(0, BidChoice::Call(Suit::Spades)).unwrap();
    round.play(0, c("AH")).unwrap();
    let before = round.clone();
    assert!(matches!(
        round.play(2, c("AD")),
        Err(DomainError::Move(IllegalMove::OutOfTurn { expected: 1, actual: 2 }))
    ));
    // Seat 1 holds only spades (trump) and must trump the heart lead.
    assert!(matches!(
        round.play(1, c("AD")),
        Err(DomainError::Move(IllegalMove::CardNotInHand(_)))
    ));
    assert_eq!(round, before);
}

#[test]
fn forced_trump_over_the_lead() {
    let mut round = suited_round(3);
    round.bid(0, BidChoice::Call(Suit::Spades)).unwrap();
    round.play(0, c("AH")).unwrap();
    assert_eq!(round.legal_moves(1).len(), 8);
    round.play(1, c("7S")).unwrap();
    // Seat 2 holds no hearts and no spades: anything goes.
    assert_eq!(round.legal_moves(2).len(), 8);
}

#[test]
fn full_round_scores_all_points() {
    for seed in 0..16u64 {
        let mut round = Round::new((seed % 4) as u8, RulesConfig::default()).unwrap();
        round.deal(seed).unwrap();
        let first = round.turn().unwrap();
        round.bid(first, BidChoice::Call(Suit::Clubs)).unwrap();
        play_out(&mut round);

        assert_eq!(round.completed_tricks().len(), 8);
        let running = round.running_total(Team::A) + round.running_total(Team::B);
        assert_eq!(running, 162);

        let report = round.finish().unwrap();
        let sweep = report.teams.iter().map(|t| t.sweep_bonus).sum::<u16>();
        assert_eq!(report.total(Team::A) + report.total(Team::B), 162 + sweep);
        assert_eq!(round.finish().unwrap(), report);
        assert!(matches!(
            round.play(first, c("7S")),
            Err(DomainError::Move(IllegalMove::RoundOver))
        ));
    }
}

#[test]
fn deal_places_hands_by_seat() {
    let mut round = Round::new(2, RulesConfig::default()).unwrap();
    round.deal(99).unwrap();
    let mut all: Vec<Card> = (0..4).flat_map(|s| round.hand(s).unwrap().to_vec()).collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 32);
    assert_eq!(round.phase(), Phase::Bidding);
    assert_eq!(round.turn(), Some(3));
    assert!(round.deal(100).is_err());
}

#[test]
fn deal_from_rejects_bad_hands() {
    let mut round = Round::new(0, RulesConfig::default()).unwrap();
    let dup = [
        suit_hand(Suit::Hearts),
        suit_hand(Suit::Hearts),
        suit_hand(Suit::Diamonds),
        suit_hand(Suit::Clubs),
    ];
    assert!(matches!(
        round.deal_from(dup),
        Err(DomainError::Card(InvalidCard::Duplicate(_)))
    ));
    assert_eq!(round.phase(), Phase::Dealing);
    assert!(matches!(Round::new(4, RulesConfig::default()), Err(DomainError::Config(_))));
}

#[test]
fn declarations_close_after_the_first_trick() {
    let mut round = suited_round(3);
    assert!(matches!(
        round.declare_bela(0),
        Err(DomainError::Declaration(InvalidDeclaration::MissingTrump))
    ));
    round.bid(0, BidChoice::Call(Suit::Spades)).unwrap();

    let bela = round.declare_bela(1).unwrap();
    assert_eq!(bela.points, 20);
    assert!(matches!(
        round.declare_bela(1),
        Err(DomainError::Declaration(InvalidDeclaration::AlreadyDeclared(DeclarationKind::Bela)))
    ));
    assert!(matches!(
        round.declare_bela(2),
        Err(DomainError::Declaration(InvalidDeclaration::CardsNotInHand))
    ));

    for (seat, code) in [(0, "AH"), (1, "7S"), (2, "7D"), (3, "7C")] {
        round.play(seat, c(code)).unwrap();
    }
    let late = try_parse_cards(["JD", "QD", "KD"]).unwrap();
    assert!(matches!(
        round.declare(2, DeclarationKind::Sequence(SequenceLength::Three), &late),
        Err(DomainError::Declaration(InvalidDeclaration::Closed))
    ));
    assert_eq!(round.declarations().len(), 1);
}

#[test]
fn belot_run_ends_the_round_at_once() {
    let mut round = suited_round(3);
    round.bid(0, BidChoice::Pass).unwrap();
    round.bid(1, BidChoice::Call(Suit::Clubs)).unwrap();
    let diamonds = round.dealt_hand(2).unwrap().to_vec();
    round.declare(2, DeclarationKind::BelotRun, &diamonds).unwrap();
    assert_eq!(round.phase(), Phase::Finished);

    let report = round.finish().unwrap();
    assert_eq!(report.outcome, RoundOutcome::InstantWin);
    assert_eq!(report.instant_win, Some(Team::A));
    assert_eq!(report.total(Team::A), 1001);
}

#[test]
fn finish_before_the_end_is_an_error() {
    let mut round = suited_round(0);
    assert!(matches!(round.finish(), Err(DomainError::Invariant(_))));
}

fn hand(codes: &[&str]) -> Hand {
    Hand::new(try_parse_cards(codes).unwrap())
}

/// Seat 0 holds a hearts quarta with QH and AH apart; seat 1 a six-card spade run.
fn sequence_round() -> Round {
    let mut round = Round::new(3, RulesConfig::default()).unwrap();
    round
        .deal_from([
            hand(&["7H", "8H", "9H", "10H", "QH", "AH", "7S", "8S"]),
            hand(&["JH", "KH", "9S", "10S", "JS", "QS", "KS", "AS"]),
            suit_hand(Suit::Diamonds),
            suit_hand(Suit::Clubs),
        ])
        .unwrap();
    round.bid(0, BidChoice::Call(Suit::Clubs)).unwrap();
    round
}

#[test]
fn one_sequence_per_suit_and_seat() {
    let mut round = sequence_round();
    let quarta = try_parse_cards(["7H", "8H", "9H", "10H"]).unwrap();
    assert_eq!(
        round
            .declare(0, DeclarationKind::Sequence(SequenceLength::Four), &quarta)
            .unwrap()
            .points,
        50
    );

    let before = round.clone();
    let terca = try_parse_cards(["7H", "8H", "9H"]).unwrap();
    assert!(matches!(
        round.declare(0, DeclarationKind::Sequence(SequenceLength::Three), &terca),
        Err(DomainError::Declaration(InvalidDeclaration::NotLongestSequence(Suit::Hearts)))
    ));
    assert!(matches!(
        round.declare(0, DeclarationKind::Sequence(SequenceLength::Four), &quarta),
        Err(DomainError::Declaration(InvalidDeclaration::AlreadyDeclared(_)))
    ));
    assert_eq!(round, before);

    let six = try_parse_cards(["9S", "10S", "JS", "QS", "KS", "AS"]).unwrap();
    round
        .declare(1, DeclarationKind::Sequence(SequenceLength::FivePlus), &six)
        .unwrap();
    assert_eq!(round.declarations().len(), 2);
}

#[test]
fn full_suit_holder_cannot_split_it_into_sequences() {
    let mut round = suited_round(3);
    round.bid(0, BidChoice::Call(Suit::Spades)).unwrap();
    for (len, codes) in [
        (SequenceLength::Four, ["7H", "8H", "9H", "10H"].as_slice()),
        (SequenceLength::Three, ["7H", "8H", "9H"].as_slice()),
        (SequenceLength::Three, ["JH", "QH", "KH"].as_slice()),
    ] {
        let cards = try_parse_cards(codes).unwrap();
        assert!(matches!(
            round.declare(0, DeclarationKind::Sequence(len), &cards),
            Err(DomainError::Declaration(InvalidDeclaration::NotLongestSequence(Suit::Hearts)))
        ));
    }
    assert!(round.declarations().is_empty());
}

#[test]
fn declaring_from_an_unknown_seat_is_a_declaration_error() {
    let mut round = suited_round(3);
    round.bid(0, BidChoice::Call(Suit::Spades)).unwrap();
    assert!(matches!(
        round.declare_bela(4),
        Err(DomainError::Declaration(InvalidDeclaration::UnknownSeat(4)))
    ));
}
