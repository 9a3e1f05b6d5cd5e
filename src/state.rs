use actix::Addr;
use log::{debug, info, warn};
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;

use crate::config::ServerConfig;
use crate::lobby::Lobby;
use crate::models::{Audience, ClientMessage, ConnectionId, LobbyWebSocketMessage, Outbox};
use crate::websocket::LobbyWebSocket;

/// Application state shared between connections
///
/// Lock order is `lobby` then `sessions`. Outboxes are delivered while the
/// lobby is still locked, so every client sees events in the order the
/// lobby produced them.
pub struct AppState {
    pub config: ServerConfig,
    pub lobby: Mutex<Lobby>,
    pub sessions: Mutex<HashMap<ConnectionId, Addr<LobbyWebSocket>>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let lobby = Lobby::new(config.finished_game_ttl);
        Self {
            config,
            lobby: Mutex::new(lobby),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn connect(&self, connection: ConnectionId, addr: Addr<LobbyWebSocket>) {
        let mut sessions = self.sessions.lock();
        sessions.insert(connection, addr);
        info!("Total active connections: {}", sessions.len());
    }

    /// Runs one client event through the lobby and delivers the result.
    pub fn dispatch(&self, connection: ConnectionId, message: ClientMessage) {
        let mut lobby = self.lobby.lock();
        match lobby.handle(connection, message) {
            Ok(outbox) => self.deliver(&lobby, outbox),
            Err(reason) => debug!("Ignored message from {}: {}", connection, reason),
        }
    }

    /// Drops the connection's address and tears down its session.
    pub fn disconnect(&self, connection: ConnectionId) {
        let mut lobby = self.lobby.lock();
        let remaining = {
            let mut sessions = self.sessions.lock();
            sessions.remove(&connection);
            sessions.len()
        };
        info!("Total active connections: {}", remaining);

        let outbox = lobby.deregister(connection);
        self.deliver(&lobby, outbox);
    }

    /// Serializes each envelope once and hands it to every addressed actor.
    /// Takes the lobby guard so delivery cannot interleave with another event.
    fn deliver(&self, _lobby: &MutexGuard<'_, Lobby>, outbox: Outbox) {
        if outbox.is_empty() {
            return;
        }
        let sessions = self.sessions.lock();

        for envelope in outbox {
            let text = match serde_json::to_string(&envelope.message) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Error serializing message: {}", e);
                    continue;
                }
            };

            match envelope.to {
                Audience::Connection(connection) => match sessions.get(&connection) {
                    Some(addr) => addr.do_send(LobbyWebSocketMessage(text)),
                    None => debug!("Connection {} not found in sessions", connection),
                },
                audience => {
                    for (connection, addr) in sessions.iter() {
                        if audience.includes(*connection) {
                            addr.do_send(LobbyWebSocketMessage(text.clone()));
                        }
                    }
                }
            }
        }
    }
}
