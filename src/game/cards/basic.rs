use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// The four suits of an Italian deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
pub enum Suit {
    Denari,
    Coppe,
    Bastoni,
    Spade,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Denari => "Denari",
                Suit::Coppe => "Coppe",
                Suit::Bastoni => "Bastoni",
                Suit::Spade => "Spade",
            }
        )
    }
}

pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 10;

/// Values above this are face cards (Fante, Cavallo, Re).
pub const HIGHEST_PIP: u8 = 7;

/// A card is a plain value: two cards are the same card iff suit and value match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "CardWire", try_from = "CardWire")]
pub struct Card {
    pub suit: Suit,
    pub value: u8,
}

impl Card {
    pub const SETTEBELLO: Card = Card {
        suit: Suit::Denari,
        value: 7,
    };

    /// # Panics
    ///
    /// Panics when `value` is outside 1..=10. Use [`Card::try_new`] for untrusted input.
    pub fn new(suit: Suit, value: u8) -> Self {
        match Self::try_new(suit, value) {
            Ok(card) => card,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(suit: Suit, value: u8) -> Result<Self, String> {
        if (MIN_VALUE..=MAX_VALUE).contains(&value) {
            Ok(Self { suit, value })
        } else {
            Err(format!(
                "card value {} is outside {}..={}",
                value, MIN_VALUE, MAX_VALUE
            ))
        }
    }

    pub fn is_face(&self) -> bool {
        self.value > HIGHEST_PIP
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Card::SETTEBELLO {
            return write!(f, "Settebello");
        }
        match self.value {
            8 => write!(f, "Fante di {}", self.suit),
            9 => write!(f, "Cavallo di {}", self.suit),
            10 => write!(f, "Re di {}", self.suit),
            v => write!(f, "{} di {}", v, self.suit),
        }
    }
}

/// Renders a list of cards as `[a, b, c]` for error messages.
pub fn format_cards(cards: &[Card]) -> String {
    let names: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    format!("[{}]", names.join(", "))
}

/// JSON shape of a card. `name` is output only.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardWire {
    suit: Suit,
    value: u8,
    #[serde(default, skip_deserializing)]
    name: String,
}

impl From<Card> for CardWire {
    fn from(card: Card) -> Self {
        Self {
            suit: card.suit,
            value: card.value,
            name: card.to_string(),
        }
    }
}

impl TryFrom<CardWire> for Card {
    type Error = String;

    fn try_from(wire: CardWire) -> Result<Self, Self::Error> {
        Card::try_new(wire.suit, wire.value)
    }
}
