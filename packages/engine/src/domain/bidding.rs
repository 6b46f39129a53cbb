use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::rules::PLAYERS;
use crate::domain::state::{is_valid_seat, nth_from, round_start_seat, Seat};
use crate::domain::Suit;
use crate::errors::domain::InvalidBid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidChoice {
    Pass,
    Call(Suit),
}

/// The settled trump call.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TrumpCall {
    pub seat: Seat,
    pub suit: Suit,
    /// The last bidder was forced to call after three passes ("mus").
    pub forced: bool,
}

/// Validate one bid by its position in the rotation (0 = left of dealer).
///
/// The first three bidders may pass; the fourth must name a suit.
pub fn validate_bid(seat: Seat, rotation_index: usize, choice: BidChoice) -> Result<(), InvalidBid> {
    if !is_valid_seat(seat) {
        return Err(InvalidBid::UnknownSeat(seat));
    }
    if rotation_index >= PLAYERS {
        return Err(InvalidBid::RotationOutOfRange(rotation_index));
    }
    if rotation_index == PLAYERS - 1 && choice == BidChoice::Pass {
        return Err(InvalidBid::MustCall);
    }
    Ok(())
}

/// Bidding rotation for one round, starting left of the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bidding {
    dealer: Seat,
    bids: Vec<(Seat, BidChoice)>,
    call: Option<TrumpCall>,
}

impl Bidding {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            bids: Vec::with_capacity(PLAYERS),
            call: None,
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn bids(&self) -> &[(Seat, BidChoice)] {
        &self.bids
    }

    pub fn call(&self) -> Option<TrumpCall> {
        self.call
    }

    pub fn is_closed(&self) -> bool {
        self.call.is_some()
    }

    /// Seat whose bid is due, or `None` once trump is set.
    pub fn expected_bidder(&self) -> Option<Seat> {
        if self.is_closed() {
            return None;
        }
        Some(nth_from(round_start_seat(self.dealer), self.bids.len() as u8))
    }

    /// Record a bid; returns the trump call when this bid settles it.
    pub fn place_bid(&mut self, seat: Seat, choice: BidChoice) -> Result<Option<TrumpCall>, InvalidBid> {
        let Some(expected) = self.expected_bidder() else {
            return Err(InvalidBid::BiddingClosed);
        };
        if !is_valid_seat(seat) {
            return Err(InvalidBid::UnknownSeat(seat));
        }
        if seat != expected {
            return Err(InvalidBid::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        let rotation_index = self.bids.len();
        validate_bid(seat, rotation_index, choice)?;

        self.bids.push((seat, choice));
        if let BidChoice::Call(suit) = choice {
            let call = TrumpCall {
                seat,
                suit,
                forced: rotation_index == PLAYERS - 1,
            };
            debug!(seat, trump = %suit, forced = call.forced, "trump called");
            self.call = Some(call);
            return Ok(Some(call));
        }
        Ok(None)
    }
}
