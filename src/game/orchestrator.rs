use log::{debug, info};
use std::time::Instant;

use crate::error::{ChallengeError, Ignored};
use crate::game::evaluate;
use crate::lobby::Lobby;
use crate::models::{
    ConnectionId, Envelope, GameId, GameOverPayload, GameStartPayload, MoveMadePayload, Outbox,
    Outcome, ServerMessage, Symbol,
};
use crate::session::normalize_identifier;

impl Lobby {
    /// Starts a game between the registered challenger and an online
    /// opponent. Validation failures go back to the challenger only.
    pub fn challenge(
        &mut self,
        connection: ConnectionId,
        opponent: &str,
    ) -> Result<Outbox, Ignored> {
        let challenger = self
            .sessions
            .resolve(connection)
            .ok_or(Ignored::Unregistered)?
            .to_string();

        let (opponent, opponent_conn) = match self.validate_challenge(&challenger, opponent) {
            Ok(found) => found,
            Err(e) => {
                info!("Challenge from {} rejected: {}", challenger, e);
                return Ok(vec![Envelope::to(
                    connection,
                    ServerMessage::ChallengeError(e.to_string()),
                )]);
            }
        };

        // A session plays one game at a time; leaving an ongoing one forfeits it.
        let mut outbox = self.leave_ongoing_game(connection);
        outbox.extend(self.leave_ongoing_game(opponent_conn));

        self.games.evict_finished(self.finished_game_ttl, Instant::now());
        let game_id = self.games.create(
            (challenger.clone(), connection),
            (opponent.clone(), opponent_conn),
        );
        self.sessions.attach_game(connection, game_id);
        self.sessions.attach_game(opponent_conn, game_id);

        outbox.push(Envelope::to(
            connection,
            ServerMessage::GameStart(GameStartPayload {
                game_id,
                symbol: Symbol::X,
                opponent: opponent.clone(),
            }),
        ));
        outbox.push(Envelope::to(
            opponent_conn,
            ServerMessage::GameStart(GameStartPayload {
                game_id,
                symbol: Symbol::O,
                opponent: challenger,
            }),
        ));
        Ok(outbox)
    }

    fn validate_challenge(
        &self,
        challenger: &str,
        opponent: &str,
    ) -> Result<(String, ConnectionId), ChallengeError> {
        let opponent = normalize_identifier(opponent).ok_or(ChallengeError::MissingOpponent)?;
        if opponent == challenger {
            return Err(ChallengeError::SelfChallenge);
        }
        let opponent_conn = self
            .sessions
            .lookup(&opponent)
            .ok_or_else(|| ChallengeError::NotOnline(opponent.clone()))?;
        Ok((opponent, opponent_conn))
    }

    /// Applies a move for the player on `connection`. Anything illegal is
    /// returned as `Ignored` and nothing is sent.
    pub fn make_move(
        &mut self,
        connection: ConnectionId,
        index: usize,
    ) -> Result<Outbox, Ignored> {
        let session = self.sessions.session(connection).ok_or(Ignored::Unregistered)?;
        let game_id = session.game_id.ok_or(Ignored::NoGame)?;
        let identifier = session.identifier.clone();

        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(Ignored::GameNotFound(game_id))?;
        if !game.is_ongoing() {
            return Err(Ignored::GameFinished(game_id));
        }
        let symbol = game.player(&identifier).ok_or(Ignored::NotAPlayer)?.symbol;
        if game.turn != identifier {
            return Err(Ignored::NotYourTurn);
        }
        game.board.place(index, symbol)?;
        debug!("Game {}: {} placed {} on {}", game_id, identifier, symbol, index);

        let players = game.connections();
        let mut outbox = Envelope::to_each(
            &players,
            ServerMessage::MoveMade(MoveMadePayload { index, symbol }),
        );

        let outcome = match evaluate(&game.board) {
            Some(winner) => Some(Outcome::from(winner)),
            None if game.board.is_full() => Some(Outcome::Draw),
            None => None,
        };

        match outcome {
            Some(winner) => {
                game.finish(Instant::now());
                info!("Game {} over: {:?}", game_id, winner);
                outbox.extend(Envelope::to_each(
                    &players,
                    ServerMessage::GameOver(GameOverPayload { winner }),
                ));
            }
            None => game.pass_turn(),
        }

        Ok(outbox)
    }

    /// Abandons the game `connection` is attached to, if it is still being
    /// played. Finished games stay in the store until evicted.
    pub(crate) fn leave_ongoing_game(&mut self, connection: ConnectionId) -> Outbox {
        let Some(game_id) = self.sessions.session(connection).and_then(|s| s.game_id) else {
            return Vec::new();
        };
        let ongoing = self
            .games
            .get(&game_id)
            .map_or(false, |game| game.is_ongoing());
        if ongoing {
            self.abandon(game_id, connection)
        } else {
            self.sessions.detach_game(connection, game_id);
            Vec::new()
        }
    }

    /// Deletes the game the `leaver` connection was attached to. If it was
    /// still being played and the other player is still attached to it, that
    /// player is told its opponent left.
    pub(crate) fn abandon(&mut self, game_id: GameId, leaver: ConnectionId) -> Outbox {
        let Some(game) = self.games.remove(&game_id) else {
            return Vec::new();
        };
        info!("Game {} removed after connection {} left", game_id, leaver);
        self.sessions.detach_game(leaver, game_id);

        let Some(opponent) = game.players.values().find(|p| p.connection != leaver) else {
            return Vec::new();
        };
        let attached = self
            .sessions
            .session(opponent.connection)
            .and_then(|session| session.game_id)
            == Some(game_id);
        self.sessions.detach_game(opponent.connection, game_id);

        if game.is_ongoing() && attached {
            vec![Envelope::to(opponent.connection, ServerMessage::OpponentLeft)]
        } else {
            Vec::new()
        }
    }
}
