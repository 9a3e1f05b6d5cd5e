use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use crate::error::Ignored;
use crate::models::ConnectionId;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Marker a player places on the board. X always moves first.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    X,
    O,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::X => f.write_str("X"),
            Symbol::O => f.write_str("O"),
        }
    }
}

/// Result of a finished game as reported in `game_over`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl From<Symbol> for Outcome {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Outcome::X,
            Symbol::O => Outcome::O,
        }
    }
}

/// 3x3 board, cells in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Symbol>; BOARD_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.cells.get(index).copied().flatten()
    }

    /// Places `symbol` on an empty cell. Occupied cells are never overwritten.
    pub fn place(&mut self, index: usize, symbol: Symbol) -> Result<(), Ignored> {
        match self.cells.get_mut(index) {
            None => Err(Ignored::OutOfRange(index)),
            Some(Some(_)) => Err(Ignored::CellOccupied(index)),
            Some(cell) => {
                *cell = Some(symbol);
                Ok(())
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[cfg(test)]
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(symbol)).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished,
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub symbol: Symbol,
    pub connection: ConnectionId,
}

/// Game state for a specific game
#[derive(Debug, Clone)]
pub struct GameState {
    pub players: HashMap<String, Player>,
    pub board: Board,
    /// Identifier of the player to move.
    pub turn: String,
    pub status: GameStatus,
    pub finished_at: Option<Instant>,
}

impl GameState {
    /// Seats the challenger as X (to move) and the opponent as O.
    pub fn new(challenger: (String, ConnectionId), opponent: (String, ConnectionId)) -> Self {
        let (challenger_id, challenger_conn) = challenger;
        let (opponent_id, opponent_conn) = opponent;

        let mut players = HashMap::with_capacity(2);
        players.insert(
            challenger_id.clone(),
            Player {
                symbol: Symbol::X,
                connection: challenger_conn,
            },
        );
        players.insert(
            opponent_id,
            Player {
                symbol: Symbol::O,
                connection: opponent_conn,
            },
        );

        Self {
            players,
            board: Board::new(),
            turn: challenger_id,
            status: GameStatus::Ongoing,
            finished_at: None,
        }
    }

    pub fn player(&self, identifier: &str) -> Option<&Player> {
        self.players.get(identifier)
    }

    pub fn opponent_of(&self, identifier: &str) -> Option<(&str, &Player)> {
        self.players
            .iter()
            .find(|(id, _)| id.as_str() != identifier)
            .map(|(id, player)| (id.as_str(), player))
    }

    /// Both players' connections, X first.
    pub fn connections(&self) -> Vec<ConnectionId> {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by_key(|player| player.symbol);
        players.into_iter().map(|player| player.connection).collect()
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == GameStatus::Ongoing
    }

    pub fn pass_turn(&mut self) {
        let next = self.opponent_of(&self.turn).map(|(id, _)| id.to_string());
        if let Some(next) = next {
            self.turn = next;
        }
    }

    pub fn finish(&mut self, at: Instant) {
        self.status = GameStatus::Finished;
        self.finished_at = Some(at);
    }
}
