//! Deck construction from a rule document's deck configuration.

pub mod builder;

pub use builder::DeckBuilder;
