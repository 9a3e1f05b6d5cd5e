use actix::Message;
use serde::{Deserialize, Serialize};

use crate::models::{ConnectionId, GameId, Outcome, Symbol};

/// Message sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    Register(String),
    Challenge(ChallengePayload),
    MakeMove(MovePayload),
    ChatMessage(String),
    Typing,
    StopTyping,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengePayload {
    pub opponent_identifier: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovePayload {
    pub index: usize,
}

/// Message sent from server to client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome(UserPayload),
    UsersOnline(Vec<String>),
    ChatMessage(ChatPayload),
    ChallengeError(String),
    GameStart(GameStartPayload),
    MoveMade(MoveMadePayload),
    GameOver(GameOverPayload),
    OpponentLeft,
    UserTyping(UserPayload),
    UserStopTyping(UserPayload),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserPayload {
    pub user: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatPayload {
    pub user: String,
    pub text: String,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameStartPayload {
    pub game_id: GameId,
    pub symbol: Symbol,
    pub opponent: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveMadePayload {
    pub index: usize,
    pub symbol: Symbol,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameOverPayload {
    pub winner: Outcome,
}

/// Who an outbound message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Connection(ConnectionId),
    Everyone,
    EveryoneExcept(ConnectionId),
}

impl Audience {
    pub fn includes(&self, connection: ConnectionId) -> bool {
        match self {
            Audience::Connection(id) => *id == connection,
            Audience::Everyone => true,
            Audience::EveryoneExcept(id) => *id != connection,
        }
    }
}

/// An outbound message together with its audience.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub to: Audience,
    pub message: ServerMessage,
}

impl Envelope {
    pub fn to(connection: ConnectionId, message: ServerMessage) -> Self {
        Self {
            to: Audience::Connection(connection),
            message,
        }
    }

    pub fn everyone(message: ServerMessage) -> Self {
        Self {
            to: Audience::Everyone,
            message,
        }
    }

    pub fn everyone_except(connection: ConnectionId, message: ServerMessage) -> Self {
        Self {
            to: Audience::EveryoneExcept(connection),
            message,
        }
    }

    /// One unicast copy of `message` per connection.
    pub fn to_each(connections: &[ConnectionId], message: ServerMessage) -> Vec<Self> {
        connections
            .iter()
            .map(|connection| Self::to(*connection, message.clone()))
            .collect()
    }
}

/// Messages produced by handling one inbound event, in delivery order.
pub type Outbox = Vec<Envelope>;

/// Message type for WebSocket communication
#[derive(Message)]
#[rtype(result = "()")]
pub struct LobbyWebSocketMessage(pub String);
