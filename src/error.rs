use thiserror::Error;

use crate::models::GameId;

/// A challenge that could not be turned into a game. The message is sent
/// back to the challenger as `challenge_error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("No opponent given")]
    MissingOpponent,
    #[error("User {0} is not online")]
    NotOnline(String),
    #[error("You cannot challenge yourself")]
    SelfChallenge,
}

/// Reason an inbound event was dropped without any reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Ignored {
    #[error("Connection has not registered")]
    Unregistered,
    #[error("Empty identifier")]
    EmptyIdentifier,
    #[error("Empty chat message")]
    EmptyMessage,
    #[error("Not attached to a game")]
    NoGame,
    #[error("Game {0} not found")]
    GameNotFound(GameId),
    #[error("Game {0} is finished")]
    GameFinished(GameId),
    #[error("Not a player in this game")]
    NotAPlayer,
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Cell {0} is outside the board")]
    OutOfRange(usize),
    #[error("Cell {0} is already occupied")]
    CellOccupied(usize),
}
