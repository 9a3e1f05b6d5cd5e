use std::collections::HashMap;

use crate::models::{ConnectionId, GameId};

/// Trims and case-folds a user supplied identifier. Returns `None` when
/// nothing is left.
pub fn normalize_identifier(raw: &str) -> Option<String> {
    let identifier = raw.trim().to_lowercase();
    if identifier.is_empty() {
        None
    } else {
        Some(identifier)
    }
}

/// The live binding of a connection to an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identifier: String,
    pub game_id: Option<GameId>,
}

/// Bidirectional identifier <-> connection mapping.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    by_identifier: HashMap<String, ConnectionId>,
    by_connection: HashMap<ConnectionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an already normalized identifier to `connection`. A previous
    /// connection holding the identifier is displaced silently and returned.
    pub fn register(
        &mut self,
        identifier: String,
        connection: ConnectionId,
    ) -> Option<ConnectionId> {
        if let Some(session) = self.by_connection.get_mut(&connection) {
            if session.identifier != identifier {
                if self.by_identifier.get(&session.identifier) == Some(&connection) {
                    self.by_identifier.remove(&session.identifier);
                }
                session.identifier = identifier.clone();
            }
        } else {
            self.by_connection.insert(
                connection,
                Session {
                    identifier: identifier.clone(),
                    game_id: None,
                },
            );
        }

        self.by_identifier
            .insert(identifier, connection)
            .filter(|previous| *previous != connection)
    }

    pub fn resolve(&self, connection: ConnectionId) -> Option<&str> {
        self.by_connection
            .get(&connection)
            .map(|session| session.identifier.as_str())
    }

    pub fn lookup(&self, identifier: &str) -> Option<ConnectionId> {
        let identifier = normalize_identifier(identifier)?;
        self.by_identifier.get(&identifier).copied()
    }

    pub fn session(&self, connection: ConnectionId) -> Option<&Session> {
        self.by_connection.get(&connection)
    }

    pub fn attach_game(&mut self, connection: ConnectionId, game_id: GameId) {
        if let Some(session) = self.by_connection.get_mut(&connection) {
            session.game_id = Some(game_id);
        }
    }

    /// Clears the attachment only if it still points at `game_id`.
    pub fn detach_game(&mut self, connection: ConnectionId, game_id: GameId) {
        if let Some(session) = self.by_connection.get_mut(&connection) {
            if session.game_id == Some(game_id) {
                session.game_id = None;
            }
        }
    }

    /// Removes the connection. The identifier mapping is only dropped if it
    /// still points here, so a displaced connection closing late does not
    /// evict its replacement.
    pub fn deregister(&mut self, connection: ConnectionId) -> Option<Session> {
        let session = self.by_connection.remove(&connection)?;
        if self.by_identifier.get(&session.identifier) == Some(&connection) {
            self.by_identifier.remove(&session.identifier);
        }
        Some(session)
    }

    /// Sorted identifiers of everyone online.
    pub fn online(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.by_identifier.keys().cloned().collect();
        identifiers.sort();
        identifiers
    }
}
