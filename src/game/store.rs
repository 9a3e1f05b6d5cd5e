use log::info;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::models::{ConnectionId, GameId, GameState};

/// Every game known to the server, keyed by id.
#[derive(Debug, Default)]
pub struct GameStore {
    games: HashMap<GameId, GameState>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game with the challenger as X and returns its id.
    pub fn create(
        &mut self,
        challenger: (String, ConnectionId),
        opponent: (String, ConnectionId),
    ) -> GameId {
        let game_id = Uuid::new_v4();
        info!(
            "Creating game {}: {} (X) vs {} (O)",
            game_id, challenger.0, opponent.0
        );
        self.games
            .insert(game_id, GameState::new(challenger, opponent));
        game_id
    }

    pub fn get(&self, game_id: &GameId) -> Option<&GameState> {
        self.games.get(game_id)
    }

    pub fn get_mut(&mut self, game_id: &GameId) -> Option<&mut GameState> {
        self.games.get_mut(game_id)
    }

    pub fn remove(&mut self, game_id: &GameId) -> Option<GameState> {
        self.games.remove(game_id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Drops games that finished at least `ttl` before `now`.
    pub fn evict_finished(&mut self, ttl: Duration, now: Instant) -> usize {
        let before = self.games.len();
        self.games.retain(|_, game| match game.finished_at {
            Some(finished_at) => now.saturating_duration_since(finished_at) < ttl,
            None => true,
        });
        let evicted = before - self.games.len();
        if evicted > 0 {
            info!("Evicted {} finished games", evicted);
        }
        evicted
    }
}
