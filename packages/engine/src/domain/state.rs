use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::rules::PLAYERS;

pub type Seat = u8; // 0..=3, clockwise

/// Partnership: seats 0 and 2 play as `A`, seats 1 and 3 as `B`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    pub fn of(seat: Seat) -> Team {
        if seat % 2 == 0 {
            Team::A
        } else {
            Team::B
        }
    }

    pub fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    pub fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn seats(self) -> [Seat; 2] {
        match self {
            Team::A => [0, 2],
            Team::B => [1, 3],
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => f.write_str("A"),
            Team::B => f.write_str("B"),
        }
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
/// Counter-clockwise direction is negative (-1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as Seat
}

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Returns the previous seat counter-clockwise.
#[inline]
pub fn prev_seat(seat: Seat) -> Seat {
    seat_offset(seat, -1)
}

/// Seat left of the dealer: first to bid, first to receive cards, first to lead.
#[inline]
pub fn round_start_seat(dealer: Seat) -> Seat {
    next_seat(dealer)
}

/// Seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    ((start as usize + n as usize) % PLAYERS) as Seat
}

/// Dealer for a given round, rotating clockwise from the starting dealer.
///
/// `round_no` is 0-based.
#[inline]
pub fn dealer_for_round(starting_dealer: Seat, round_no: u32) -> Seat {
    ((starting_dealer as u32 + round_no) % PLAYERS as u32) as Seat
}

/// Position of `seat` in deal order: 0 for the seat left of the dealer,
/// 3 for the dealer.
#[inline]
pub fn deal_order_position(seat: Seat, dealer: Seat) -> u8 {
    ((seat as usize + PLAYERS - round_start_seat(dealer) as usize) % PLAYERS) as u8
}

#[inline]
pub fn is_valid_seat(seat: Seat) -> bool {
    (seat as usize) < PLAYERS
}
