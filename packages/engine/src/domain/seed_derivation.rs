//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Provides functions to derive unique-but-deterministic seeds for different
//! contexts (dealing, per-seat player choices) from a base game seed.

/// Derive a seed for dealing cards in a round.
///
/// # Arguments
///
/// * `game_seed` - Base RNG seed for the match
/// * `round_no` - Round number (0-based)
///
/// # Returns
///
/// Derived seed that is unique per (game, round) combination.
pub fn derive_dealing_seed(game_seed: u64, round_no: u32) -> u64 {
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2) // Offset to distinguish from player seeds
}

/// Derive a seed for one seat's choices within a round.
///
/// Same game + round + seat gives the same stream; different seats diverge.
pub fn derive_player_seed(game_seed: u64, round_no: u32, seat: u8) -> u64 {
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(10_000))
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(1)
}
