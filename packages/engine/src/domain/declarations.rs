//! Declarations ("zvanja"): validation, detection and priority.
//!
//! Every kind has its own validator, dispatched by exhaustive match. Only
//! the team holding the single strongest non-bela declaration scores its
//! declarations; bela always scores for whoever announced it.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RulesConfig;
use crate::domain::rules::{BELOT_RUN_POINTS, HAND_SIZE, PLAYERS};
use crate::domain::state::{deal_order_position, Seat, Team};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, InvalidDeclaration};

pub const MIN_SEQUENCE_LEN: usize = 3;
pub const BELA_POINTS: u16 = 20;

/// Ranks whose four-of-a-kind can be declared, strongest first.
pub const DECLARABLE_RANKS: [Rank; 5] = [Rank::Jack, Rank::Nine, Rank::Ace, Rank::King, Rank::Queen];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceLength {
    Three,
    Four,
    FivePlus,
}

impl SequenceLength {
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            0..=2 => None,
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            _ => Some(Self::FivePlus),
        }
    }

    pub fn min_len(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Four => 4,
            Self::FivePlus => 5,
        }
    }
}

impl fmt::Display for SequenceLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Three => f.write_str("3"),
            Self::Four => f.write_str("4"),
            Self::FivePlus => f.write_str("5+"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// King and queen of trump.
    Bela,
    Sequence(SequenceLength),
    FourOfRank(Rank),
    /// All eight cards of one suit; ends the game.
    BelotRun,
}

impl DeclarationKind {
    pub fn points(self) -> u16 {
        match self {
            Self::Bela => BELA_POINTS,
            Self::Sequence(SequenceLength::Three) => 20,
            Self::Sequence(SequenceLength::Four) => 50,
            Self::Sequence(SequenceLength::FivePlus) => 100,
            Self::FourOfRank(Rank::Jack) => 200,
            Self::FourOfRank(Rank::Nine) => 150,
            Self::FourOfRank(Rank::Ace | Rank::King | Rank::Queen) => 100,
            Self::FourOfRank(_) => 0,
            Self::BelotRun => BELOT_RUN_POINTS,
        }
    }

    /// Rank among competing declarations; bela never competes.
    pub fn priority(self) -> u8 {
        match self {
            Self::Bela => 0,
            Self::Sequence(SequenceLength::Three) => 1,
            Self::Sequence(SequenceLength::Four) => 2,
            Self::Sequence(SequenceLength::FivePlus) => 3,
            Self::FourOfRank(Rank::King | Rank::Queen) => 4,
            Self::FourOfRank(Rank::Ace) => 5,
            Self::FourOfRank(Rank::Nine) => 6,
            Self::FourOfRank(Rank::Jack) => 7,
            Self::FourOfRank(_) => 0,
            Self::BelotRun => 8,
        }
    }

    pub fn is_bela(self) -> bool {
        matches!(self, Self::Bela)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Bela => "bela",
            Self::Sequence(SequenceLength::Three) => "sequence_3",
            Self::Sequence(SequenceLength::Four) => "sequence_4",
            Self::Sequence(SequenceLength::FivePlus) => "sequence_5_plus",
            Self::FourOfRank(Rank::Jack) => "four_jacks",
            Self::FourOfRank(Rank::Nine) => "four_nines",
            Self::FourOfRank(Rank::Ace) => "four_aces",
            Self::FourOfRank(Rank::King) => "four_kings",
            Self::FourOfRank(Rank::Queen) => "four_queens",
            Self::FourOfRank(Rank::Ten) => "four_tens",
            Self::FourOfRank(Rank::Eight) => "four_eights",
            Self::FourOfRank(Rank::Seven) => "four_sevens",
            Self::BelotRun => "belot",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A validated declaration. `seat` is set once it is attributed to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub cards: Vec<Card>,
    pub points: u16,
    pub seat: Option<Seat>,
}

impl Declaration {
    fn new(kind: DeclarationKind, mut cards: Vec<Card>) -> Self {
        cards.sort();
        Self {
            kind,
            cards,
            points: kind.points(),
            seat: None,
        }
    }

    pub fn with_seat(mut self, seat: Seat) -> Self {
        self.seat = Some(seat);
        self
    }

    /// Suit of the first card; the only suit for sequences and belot runs.
    pub fn suit(&self) -> Option<Suit> {
        self.cards.first().map(|c| c.suit)
    }

    pub fn team(&self) -> Option<Team> {
        self.seat.map(Team::of)
    }

    /// Highest natural rank in the declaration.
    pub fn top_rank(&self) -> Option<Rank> {
        self.cards.iter().map(|c| c.rank).max()
    }
}

/// Declarations that count for a round, after priority resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDeclarations {
    /// The single strongest non-bela declaration.
    pub winning: Option<Declaration>,
    pub winning_team: Option<Team>,
    /// The winning team's declarations plus every bela.
    pub scored: Vec<Declaration>,
}

impl ResolvedDeclarations {
    /// Non-bela declaration points for `team`.
    pub fn declaration_points(&self, team: Team) -> u16 {
        self.scored
            .iter()
            .filter(|d| !d.kind.is_bela() && d.team() == Some(team))
            .map(|d| d.points)
            .sum()
    }

    pub fn bela_points(&self, team: Team) -> u16 {
        self.scored
            .iter()
            .filter(|d| d.kind.is_bela() && d.team() == Some(team))
            .map(|d| d.points)
            .sum()
    }

    /// Owner of a scored belot run, if any.
    pub fn belot_run_team(&self) -> Option<Team> {
        self.scored
            .iter()
            .find(|d| d.kind == DeclarationKind::BelotRun)
            .and_then(Declaration::team)
    }
}

/// Longest run of naturally consecutive ranks within one suit, if at
/// least three long. Equal-length runs resolve to the higher one.
pub fn find_longest_sequence(cards: &[Card]) -> Option<Vec<Card>> {
    let mut sorted = cards.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut best: Option<&[Card]> = None;
    let mut start = 0;
    for i in 1..=sorted.len() {
        let breaks = i == sorted.len()
            || sorted[i].suit != sorted[i - 1].suit
            || sorted[i].rank.index() != sorted[i - 1].rank.index() + 1;
        if breaks {
            let run = &sorted[start..i];
            if run.len() >= MIN_SEQUENCE_LEN && best.map_or(true, |b| run.len() >= b.len()) {
                best = Some(run);
            }
            start = i;
        }
    }
    best.map(<[Card]>::to_vec)
}

/// At most one sequence per suit: the longest.
pub fn find_sequences(hand: &[Card]) -> Vec<Vec<Card>> {
    Suit::ALL
        .into_iter()
        .filter_map(|suit| {
            let suited: Vec<Card> = hand.iter().copied().filter(|c| c.suit == suit).collect();
            find_longest_sequence(&suited)
        })
        .collect()
}

fn check_count(cards: &[Card], expected: usize) -> Result<(), InvalidDeclaration> {
    if cards.len() != expected {
        return Err(InvalidDeclaration::WrongCardCount {
            expected,
            actual: cards.len(),
        });
    }
    Ok(())
}

fn check_single_suit(cards: &[Card]) -> Result<Suit, InvalidDeclaration> {
    let suit = cards.first().map(|c| c.suit).ok_or(InvalidDeclaration::MixedSuits)?;
    if cards.iter().any(|c| c.suit != suit) {
        return Err(InvalidDeclaration::MixedSuits);
    }
    Ok(suit)
}

/// Validates and ranks declarations under one rules configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallValidator {
    sequence_high_card_tiebreak: bool,
}

impl CallValidator {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            sequence_high_card_tiebreak: config.sequence_high_card_tiebreak,
        }
    }

    pub fn validate(
        &self,
        kind: DeclarationKind,
        cards: &[Card],
        trump: Option<Suit>,
    ) -> Result<Declaration, InvalidDeclaration> {
        let mut seen = HashSet::with_capacity(cards.len());
        if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
            return Err(InvalidDeclaration::DuplicateCard(*dup));
        }

        match kind {
            DeclarationKind::Bela => self.validate_bela(cards, trump)?,
            DeclarationKind::Sequence(len) => self.validate_sequence(len, cards)?,
            DeclarationKind::FourOfRank(rank) => self.validate_four_of_rank(rank, cards)?,
            DeclarationKind::BelotRun => self.validate_belot_run(cards)?,
        }
        Ok(Declaration::new(kind, cards.to_vec()))
    }

    pub fn validate_bela(&self, cards: &[Card], trump: Option<Suit>) -> Result<(), InvalidDeclaration> {
        let trump = trump.ok_or(InvalidDeclaration::MissingTrump)?;
        check_count(cards, 2)?;
        if let Some(off) = cards.iter().find(|c| c.suit != trump) {
            return Err(InvalidDeclaration::NotTrumpSuit(*off));
        }
        let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
        ranks.sort();
        if ranks != [Rank::Queen, Rank::King] {
            return Err(InvalidDeclaration::NotBelaPair);
        }
        Ok(())
    }

    pub fn validate_sequence(&self, len: SequenceLength, cards: &[Card]) -> Result<(), InvalidDeclaration> {
        if cards.len() < MIN_SEQUENCE_LEN {
            return Err(InvalidDeclaration::SequenceTooShort(cards.len()));
        }
        check_single_suit(cards)?;
        let mut ranks: Vec<usize> = cards.iter().map(|c| c.rank.index()).collect();
        ranks.sort_unstable();
        if ranks.windows(2).any(|w| w[1] != w[0] + 1) {
            return Err(InvalidDeclaration::NotContiguous);
        }
        if SequenceLength::from_len(cards.len()) != Some(len) {
            return Err(InvalidDeclaration::LengthMismatch {
                kind: len,
                actual: cards.len(),
            });
        }
        Ok(())
    }

    pub fn validate_four_of_rank(&self, rank: Rank, cards: &[Card]) -> Result<(), InvalidDeclaration> {
        if !DECLARABLE_RANKS.contains(&rank) {
            return Err(InvalidDeclaration::RankNotDeclarable(rank));
        }
        check_count(cards, 4)?;
        if let Some(other) = cards.iter().find(|c| c.rank != rank) {
            return Err(InvalidDeclaration::WrongRank {
                expected: rank,
                found: other.rank,
            });
        }
        Ok(())
    }

    pub fn validate_belot_run(&self, cards: &[Card]) -> Result<(), InvalidDeclaration> {
        check_count(cards, HAND_SIZE)?;
        check_single_suit(cards)?;
        Ok(())
    }

    /// Cards in `hand` that would form a declaration of `kind`, if any.
    pub fn can_declare(&self, hand: &[Card], kind: DeclarationKind, trump: Option<Suit>) -> Option<Vec<Card>> {
        match kind {
            DeclarationKind::Bela => {
                let trump = trump?;
                let king = Card::new(Rank::King, trump);
                let queen = Card::new(Rank::Queen, trump);
                (hand.contains(&king) && hand.contains(&queen)).then(|| vec![queen, king])
            }
            DeclarationKind::Sequence(len) => find_sequences(hand)
                .into_iter()
                .find(|run| SequenceLength::from_len(run.len()) == Some(len)),
            DeclarationKind::FourOfRank(rank) => {
                if !DECLARABLE_RANKS.contains(&rank) {
                    return None;
                }
                let cards: Vec<Card> = hand.iter().copied().filter(|c| c.rank == rank).collect();
                (cards.len() == 4).then_some(cards)
            }
            DeclarationKind::BelotRun => Suit::ALL.into_iter().find_map(|suit| {
                let cards: Vec<Card> = hand.iter().copied().filter(|c| c.suit == suit).collect();
                (cards.len() == HAND_SIZE).then_some(cards)
            }),
        }
    }

    /// Every declaration `hand` can make. A belot run is reported alone.
    pub fn detect(&self, hand: &[Card], trump: Option<Suit>, seat: Seat) -> Vec<Declaration> {
        if let Some(cards) = self.can_declare(hand, DeclarationKind::BelotRun, trump) {
            return vec![Declaration::new(DeclarationKind::BelotRun, cards).with_seat(seat)];
        }

        let mut found = Vec::new();
        for rank in DECLARABLE_RANKS {
            let kind = DeclarationKind::FourOfRank(rank);
            if let Some(cards) = self.can_declare(hand, kind, trump) {
                found.push(Declaration::new(kind, cards).with_seat(seat));
            }
        }
        for run in find_sequences(hand) {
            if let Some(len) = SequenceLength::from_len(run.len()) {
                found.push(Declaration::new(DeclarationKind::Sequence(len), run).with_seat(seat));
            }
        }
        if let Some(cards) = self.can_declare(hand, DeclarationKind::Bela, trump) {
            found.push(Declaration::new(DeclarationKind::Bela, cards).with_seat(seat));
        }
        found
    }

    /// Validate a declaration made by `seat` from the cards they hold.
    ///
    /// A sequence must be the longest run its suit holds in `hand`.
    pub fn declare(
        &self,
        seat: Seat,
        hand: &[Card],
        kind: DeclarationKind,
        cards: &[Card],
        trump: Option<Suit>,
    ) -> Result<Declaration, InvalidDeclaration> {
        if cards.iter().any(|c| !hand.contains(c)) {
            return Err(InvalidDeclaration::CardsNotInHand);
        }
        let declaration = self.validate(kind, cards, trump)?;
        if let (DeclarationKind::Sequence(_), Some(suit)) = (kind, declaration.suit()) {
            let suited: Vec<Card> = hand.iter().copied().filter(|c| c.suit == suit).collect();
            if find_longest_sequence(&suited).as_deref() != Some(declaration.cards.as_slice()) {
                return Err(InvalidDeclaration::NotLongestSequence(suit));
            }
        }
        Ok(declaration.with_seat(seat))
    }

    /// Order two declarations; `Greater` means `a` takes precedence.
    pub fn compare(&self, a: &Declaration, b: &Declaration, dealer: Seat) -> Ordering {
        a.kind
            .priority()
            .cmp(&b.kind.priority())
            .then_with(|| {
                if self.sequence_high_card_tiebreak {
                    sequence_strength(a).cmp(&sequence_strength(b))
                } else {
                    Ordering::Equal
                }
            })
            // Closer to the dealer in deal order wins.
            .then_with(|| position(b, dealer).cmp(&position(a, dealer)))
    }

    /// Index of the single strongest non-bela declaration.
    pub fn resolve_priority(&self, declarations: &[Declaration], dealer: Seat) -> Option<usize> {
        declarations
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.kind.is_bela())
            .max_by(|(_, a), (_, b)| self.compare(a, b, dealer))
            .map(|(i, _)| i)
    }

    /// Keep the winning team's declarations and every bela.
    pub fn resolve_declarations(
        &self,
        declarations: &[Declaration],
        dealer: Seat,
    ) -> Result<ResolvedDeclarations, DomainError> {
        if let Some(d) = declarations.iter().find(|d| d.seat.is_none()) {
            return Err(DomainError::invariant(format!(
                "declaration {} has no owning seat",
                d.kind
            )));
        }

        let counted = longest_sequences_only(declarations);
        if counted.len() < declarations.len() {
            debug!(
                dropped = declarations.len() - counted.len(),
                "shorter sequences of an already counted suit dropped"
            );
        }
        let declarations = counted.as_slice();

        let winning = self
            .resolve_priority(declarations, dealer)
            .map(|i| declarations[i].clone());
        let winning_team = winning.as_ref().and_then(Declaration::team);
        let scored: Vec<Declaration> = declarations
            .iter()
            .filter(|d| d.kind.is_bela() || (winning_team.is_some() && d.team() == winning_team))
            .cloned()
            .collect();

        if let Some(w) = &winning {
            debug!(kind = %w.kind, seat = ?w.seat, scored = scored.len(), "declarations resolved");
        }
        Ok(ResolvedDeclarations {
            winning,
            winning_team,
            scored,
        })
    }
}

/// Keep one sequence per (seat, suit): the longest, then the highest.
fn longest_sequences_only(declarations: &[Declaration]) -> Vec<Declaration> {
    let slot = |d: &Declaration| match (d.kind, d.seat, d.suit()) {
        (DeclarationKind::Sequence(_), Some(seat), Some(suit)) => Some((seat, suit)),
        _ => None,
    };

    let mut best: HashMap<(Seat, Suit), usize> = HashMap::new();
    for (i, d) in declarations.iter().enumerate() {
        if let Some(key) = slot(d) {
            let kept = best.entry(key).or_insert(i);
            if sequence_strength(d) > sequence_strength(&declarations[*kept]) {
                *kept = i;
            }
        }
    }

    declarations
        .iter()
        .enumerate()
        .filter(|(i, d)| slot(*d).map_or(true, |key| best.get(&key) == Some(i)))
        .map(|(_, d)| d.clone())
        .collect()
}

fn sequence_strength(d: &Declaration) -> (usize, Option<Rank>) {
    match d.kind {
        DeclarationKind::Sequence(_) => (d.cards.len(), d.top_rank()),
        _ => (0, None),
    }
}

fn position(d: &Declaration, dealer: Seat) -> u8 {
    d.seat
        .map(|s| deal_order_position(s, dealer))
        .unwrap_or(PLAYERS as u8)
}
