use anyhow::anyhow;
use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{GameError, GameResult};
use boggle_core::{
    Board, ScoringEngine, SessionClock, WordValidator, average_time_limit, is_valid_time_limit,
    normalize_nickname, normalize_word,
};
use boggle_persistence::{
    GameRepository, GameSession, SessionStart, UserRepository, WordRepository,
};
use boggle_types::{GameId, GameState, GameStatus, PlayerStatus, User, WordPlayed};

/// Result of a successful join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The caller opened a new session and waits for an opponent.
    Pending(GameId),
    /// The caller filled the pending session, which is now running.
    Started(GameId),
}

impl JoinOutcome {
    pub fn game_id(&self) -> GameId {
        match self {
            JoinOutcome::Pending(id) | JoinOutcome::Started(id) => *id,
        }
    }
}

/// The game engine. Every operation runs in a single store transaction; an
/// error returns before commit and the dropped transaction rolls back.
pub struct GameManager {
    db: DatabaseConnection,
    word_validator: Arc<WordValidator>,
    board_size: usize,
}

impl GameManager {
    pub fn new(
        db: DatabaseConnection,
        word_validator: Arc<WordValidator>,
        board_size: usize,
    ) -> Self {
        Self {
            db,
            word_validator,
            board_size,
        }
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn register(&self, nickname: Option<&str>) -> GameResult<User> {
        let nickname = normalize_nickname(nickname)
            .ok_or_else(|| GameError::invalid_input("nickname must be 1 to 50 characters"))?;

        let txn = self.db.begin().await?;
        let user = UserRepository::new(&txn).create_user(&nickname).await?;
        txn.commit().await?;

        info!("Registered user {:?}", user.nickname);
        Ok(user)
    }

    pub async fn join(
        &self,
        token: Option<&str>,
        time_limit: Option<i32>,
    ) -> GameResult<JoinOutcome> {
        let token = token.ok_or_else(|| GameError::invalid_input("missing user token"))?;
        let time_limit = time_limit
            .filter(|limit| is_valid_time_limit(*limit))
            .ok_or_else(|| GameError::invalid_input("time limit must be 5 to 120 seconds"))?;

        let txn = self.db.begin().await?;
        if !UserRepository::new(&txn).exists(token).await? {
            return Err(GameError::invalid_input("unknown user token"));
        }

        let games = GameRepository::new(&txn);
        let pending = games.find_pending().await?;
        if pending.as_ref().is_some_and(|session| session.player1 == token) {
            return Err(GameError::conflict("already waiting for an opponent"));
        }

        let now = Utc::now();
        let in_active_game = games
            .find_started_for_player(token)
            .await?
            .iter()
            .any(|session| clock(session).state(now) == GameState::Active);
        if in_active_game {
            return Err(GameError::conflict("already playing an active game"));
        }

        let outcome = match pending {
            Some(session) => {
                let combined_limit = average_time_limit(session.time_limit, time_limit);
                let board = Board::random(self.board_size);
                let start = SessionStart {
                    player2: token.to_string(),
                    board: board.to_string(),
                    time_limit: combined_limit,
                    start_time: now,
                };

                if !games.start_pending(session.id, start).await? {
                    return Err(
                        anyhow!("pending game {} was filled concurrently", session.id).into(),
                    );
                }

                info!(
                    "Started game {} with a {} second limit",
                    session.id, combined_limit
                );
                JoinOutcome::Started(session.id)
            }
            None => {
                let session = games.create_pending(token, time_limit).await?;
                info!("Created pending game {}", session.id);
                JoinOutcome::Pending(session.id)
            }
        };

        txn.commit().await?;
        Ok(outcome)
    }

    pub async fn cancel(&self, token: Option<&str>) -> GameResult<()> {
        let token = token.ok_or_else(|| GameError::invalid_input("missing user token"))?;

        let txn = self.db.begin().await?;
        if !UserRepository::new(&txn).exists(token).await? {
            return Err(GameError::forbidden("unknown user token"));
        }

        let games = GameRepository::new(&txn);
        let session = games
            .find_pending()
            .await?
            .filter(|session| session.player1 == token)
            .ok_or_else(|| GameError::forbidden("not waiting in a pending game"))?;

        if !games.delete_pending(session.id).await? {
            return Err(anyhow!("pending game {} disappeared during cancel", session.id).into());
        }
        txn.commit().await?;

        info!("Cancelled pending game {}", session.id);
        Ok(())
    }

    pub async fn get_status(&self, game_id: &str, brief: bool) -> GameResult<GameStatus> {
        let game_id = parse_game_id(game_id)
            .ok_or_else(|| GameError::invalid_input("malformed game id"))?;

        let txn = self.db.begin().await?;
        let session = GameRepository::new(&txn)
            .find_by_id(game_id)
            .await?
            .ok_or_else(|| GameError::invalid_input("unknown game id"))?;

        let now = Utc::now();
        let session_clock = clock(&session);
        let game_state = session_clock.state(now);
        if game_state == GameState::Pending {
            return Ok(GameStatus::pending());
        }

        let player2 = session
            .player2
            .as_deref()
            .ok_or_else(|| anyhow!("started game {} has no second player", game_id))?;

        let words = WordRepository::new(&txn);
        let player1_words = words.words_for_player(game_id, &session.player1).await?;
        let player2_words = words.words_for_player(game_id, player2).await?;

        let mut status = GameStatus {
            game_state,
            board: None,
            time_limit: None,
            time_left: session_clock.time_left(now),
            player1: Some(player_status(&player1_words)),
            player2: Some(player_status(&player2_words)),
        };

        if !brief {
            let users = UserRepository::new(&txn);
            let nickname1 = nickname_of(&users, &session.player1).await?;
            let nickname2 = nickname_of(&users, player2).await?;
            let completed = game_state == GameState::Completed;

            status.board = session.board.clone();
            status.time_limit = Some(session.time_limit);
            if let Some(player) = status.player1.as_mut() {
                player.nickname = Some(nickname1);
                player.words_played = completed.then_some(player1_words);
            }
            if let Some(player) = status.player2.as_mut() {
                player.nickname = Some(nickname2);
                player.words_played = completed.then_some(player2_words);
            }
        }

        txn.commit().await?;
        debug!("Status of game {}: {}", game_id, game_state);
        Ok(status)
    }

    /// Score `word` for `token` in game `game_id` and record it unless the
    /// player has already played it. Returns the points for this play.
    pub async fn play_word(
        &self,
        game_id: &str,
        token: Option<&str>,
        word: Option<&str>,
    ) -> GameResult<i32> {
        let word = word
            .and_then(normalize_word)
            .ok_or_else(|| GameError::invalid_input("word must not be empty"))?;
        let token = token.ok_or_else(|| GameError::invalid_input("missing user token"))?;
        let game_id = parse_game_id(game_id)
            .ok_or_else(|| GameError::invalid_input("malformed game id"))?;

        let txn = self.db.begin().await?;
        if !UserRepository::new(&txn).exists(token).await? {
            return Err(GameError::forbidden("unknown user token"));
        }

        let session = GameRepository::new(&txn)
            .find_by_id(game_id)
            .await?
            .ok_or_else(|| GameError::forbidden("unknown game id"))?;
        if !session.is_participant(token) {
            return Err(GameError::forbidden("not a player in this game"));
        }
        if clock(&session).state(Utc::now()) != GameState::Active {
            return Err(GameError::conflict("game is not active"));
        }

        let board: Board = session
            .board
            .as_deref()
            .ok_or_else(|| anyhow!("active game {} has no board", game_id))?
            .parse()?;

        let words = WordRepository::new(&txn);
        let previous: Vec<String> = words
            .words_for_player(game_id, token)
            .await?
            .into_iter()
            .map(|played| played.word)
            .collect();

        let result = ScoringEngine::score_word(&word, &board, &self.word_validator, &previous);
        if result.is_recorded() {
            words
                .record_word(game_id, token, &word, result.points())
                .await?;
        }
        txn.commit().await?;

        info!("Game {}: {} scored {:?}", game_id, word, result);
        Ok(result.points())
    }
}

fn clock(session: &GameSession) -> SessionClock {
    SessionClock::new(session.start_time, session.time_limit)
}

fn parse_game_id(raw: &str) -> Option<GameId> {
    raw.trim().parse().ok()
}

fn player_status(words: &[WordPlayed]) -> PlayerStatus {
    PlayerStatus {
        score: words.iter().map(|played| played.score).sum(),
        nickname: None,
        words_played: None,
    }
}

async fn nickname_of<C: sea_orm::ConnectionTrait>(
    users: &UserRepository<'_, C>,
    token: &str,
) -> GameResult<String> {
    match users.find_by_token(token).await? {
        Some(user) => Ok(user.nickname),
        None => {
            warn!("Game refers to missing user {}", token);
            Err(anyhow!("game refers to a missing user").into())
        }
    }
}
