pub mod basic;
pub mod deck;

pub use basic::{format_cards, Card, Suit, HIGHEST_PIP, MAX_VALUE, MIN_VALUE};
pub use deck::{new_deck, shuffle, DECK_SIZE};
