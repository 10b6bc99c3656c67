// Match event fan-out
//
// Every change to a match is announced on that match's broadcast channel so each connected
// player can re-render their own view of it.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::MatchEvent;

// Internal modules
mod bus;
mod events;
