// Public API
pub use handler::{run_session, websocket_handler, JoinParams};
pub use messages::{MessageType, WebSocketMessage};
pub use socket::{SocketError, SocketWrapper};

// Internal modules
mod handler;
mod messages;
mod socket;
