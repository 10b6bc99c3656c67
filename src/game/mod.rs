// Public API
pub use cards::{Card, Suit};
pub use logic::{Game, GameError, Move, MoveError, Player, HAND_SIZE, MAX_TENS_ON_TABLE, TABLE_SIZE};
pub use scoring::Award;
pub use view::{PlayerView, PublicPlayer};

// Internal modules
pub mod cards;
mod logic;
pub mod scoring;
mod view;
