pub mod domain;

pub use domain::{DeckError, DomainError, IllegalMove, InvalidBid, InvalidCard, InvalidDeclaration};
