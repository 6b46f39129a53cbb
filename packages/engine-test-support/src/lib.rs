//! Engine test support utilities
//!
//! Shared helpers for the engine's integration tests: unified logging
//! initialization and card fixtures.

pub mod fixtures;
pub mod logging;
