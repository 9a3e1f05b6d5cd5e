use chrono::{SecondsFormat, Utc};
use log::debug;

use crate::error::Ignored;
use crate::lobby::Lobby;
use crate::models::{ChatPayload, ConnectionId, Envelope, Outbox, ServerMessage, UserPayload};

impl Lobby {
    /// Relays a chat line to every connection, sender included.
    pub fn chat(&self, connection: ConnectionId, text: &str) -> Result<Outbox, Ignored> {
        let user = self.sender(connection)?;
        if text.trim().is_empty() {
            return Err(Ignored::EmptyMessage);
        }
        debug!("Chat from {}: {}", user, text);

        Ok(vec![Envelope::everyone(ServerMessage::ChatMessage(ChatPayload {
            user,
            text: text.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }))])
    }

    pub fn typing(&self, connection: ConnectionId) -> Result<Outbox, Ignored> {
        let user = self.sender(connection)?;
        Ok(vec![Envelope::everyone_except(
            connection,
            ServerMessage::UserTyping(UserPayload { user }),
        )])
    }

    pub fn stop_typing(&self, connection: ConnectionId) -> Result<Outbox, Ignored> {
        let user = self.sender(connection)?;
        Ok(vec![Envelope::everyone_except(
            connection,
            ServerMessage::UserStopTyping(UserPayload { user }),
        )])
    }

    fn sender(&self, connection: ConnectionId) -> Result<String, Ignored> {
        self.sessions
            .resolve(connection)
            .map(str::to_string)
            .ok_or(Ignored::Unregistered)
    }
}
