use log::info;
use std::time::Duration;

use crate::error::Ignored;
use crate::game::GameStore;
use crate::models::{
    ChallengePayload, ClientMessage, ConnectionId, Envelope, MovePayload, Outbox, ServerMessage,
    UserPayload,
};
use crate::session::{normalize_identifier, SessionRegistry};

/// All mutable server state: who is online and which games exist.
///
/// Every handler takes `&mut self`, runs to completion and returns the
/// messages to deliver. Callers serialize access (see `AppState`).
#[derive(Debug)]
pub struct Lobby {
    pub(crate) sessions: SessionRegistry,
    pub(crate) games: GameStore,
    pub(crate) finished_game_ttl: Duration,
}

impl Lobby {
    pub fn new(finished_game_ttl: Duration) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            games: GameStore::new(),
            finished_game_ttl,
        }
    }

    #[cfg(test)]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    #[cfg(test)]
    pub fn games(&self) -> &GameStore {
        &self.games
    }

    /// Dispatches one decoded client event.
    pub fn handle(
        &mut self,
        connection: ConnectionId,
        message: ClientMessage,
    ) -> Result<Outbox, Ignored> {
        match message {
            ClientMessage::Register(identifier) => self.register(connection, &identifier),
            ClientMessage::Challenge(ChallengePayload {
                opponent_identifier,
            }) => self.challenge(connection, &opponent_identifier),
            ClientMessage::MakeMove(MovePayload { index }) => self.make_move(connection, index),
            ClientMessage::ChatMessage(text) => self.chat(connection, &text),
            ClientMessage::Typing => self.typing(connection),
            ClientMessage::StopTyping => self.stop_typing(connection),
        }
    }

    /// Binds `identifier` to the connection. Switching to a different
    /// identifier forfeits the ongoing game, if any.
    pub fn register(
        &mut self,
        connection: ConnectionId,
        identifier: &str,
    ) -> Result<Outbox, Ignored> {
        let identifier = normalize_identifier(identifier).ok_or(Ignored::EmptyIdentifier)?;

        let renamed = self
            .sessions
            .resolve(connection)
            .map_or(false, |current| current != identifier);
        let mut outbox = if renamed {
            self.leave_ongoing_game(connection)
        } else {
            Vec::new()
        };

        if let Some(displaced) = self.sessions.register(identifier.clone(), connection) {
            info!(
                "Identifier {} moved from connection {} to {}",
                identifier, displaced, connection
            );
        } else {
            info!("Registered {} on connection {}", identifier, connection);
        }

        outbox.push(Envelope::to(
            connection,
            ServerMessage::Welcome(UserPayload { user: identifier }),
        ));
        outbox.push(self.users_online());
        Ok(outbox)
    }

    /// Forgets the connection and abandons its game, if any.
    pub fn deregister(&mut self, connection: ConnectionId) -> Outbox {
        let Some(session) = self.sessions.deregister(connection) else {
            return Vec::new();
        };
        info!("Deregistered {} from connection {}", session.identifier, connection);

        let mut outbox = Vec::new();
        if let Some(game_id) = session.game_id {
            outbox.extend(self.abandon(game_id, connection));
        }
        outbox.push(self.users_online());
        outbox
    }

    pub(crate) fn users_online(&self) -> Envelope {
        Envelope::everyone(ServerMessage::UsersOnline(self.sessions.online()))
    }
}
