pub mod game_state;
pub mod messages;

// Re-export important types
pub use game_state::*;
pub use messages::*;

use uuid::Uuid;

/// Identifies one WebSocket connection for its lifetime.
pub type ConnectionId = Uuid;

/// Identifies one game in the store.
pub type GameId = Uuid;
