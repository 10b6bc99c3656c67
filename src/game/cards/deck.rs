use rand::seq::SliceRandom;
use rand::Rng;
use strum::IntoEnumIterator;

use super::basic::{Card, Suit, MAX_VALUE, MIN_VALUE};

pub const DECK_SIZE: usize = 40;

/// Builds the full 40 card deck, suit-major with values ascending.
pub fn new_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::iter() {
        for value in MIN_VALUE..=MAX_VALUE {
            cards.push(Card::new(suit, value));
        }
    }
    cards
}

/// Fisher-Yates shuffle driven by the caller's generator.
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}
