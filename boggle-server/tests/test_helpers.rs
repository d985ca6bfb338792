#![allow(dead_code)]

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;

use boggle_core::WordValidator;
use boggle_persistence::{GameRepository, connect_to_memory_database};
use boggle_server::{GameError, GameManager, JoinOutcome};
use boggle_types::GameId;

// C A T S
// X O Q E
// D G N R
// A B E L
pub const TEST_BOARD: &str = "CATSXOQEDGNRABEL";

pub const TEST_WORDS: &[&str] = &[
    "cat", "cats", "cog", "dog", "bel", "abel", "que", "at", "zebra", "gnr",
];

/// Test setup backed by a fresh in-memory database
pub struct TestGameServerSetup {
    pub game_manager: Arc<GameManager>,
}

impl TestGameServerSetup {
    pub async fn new() -> Self {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let word_validator = WordValidator::from_word_list(&TEST_WORDS.join("\n"));
        Self {
            game_manager: Arc::new(GameManager::new(db, Arc::new(word_validator), 4)),
        }
    }

    /// Registers a user and returns its token
    pub async fn register(&self, nickname: &str) -> String {
        self.game_manager
            .register(Some(nickname))
            .await
            .unwrap()
            .user_token
    }

    pub async fn join(&self, token: &str, time_limit: i32) -> Result<JoinOutcome, GameError> {
        self.game_manager.join(Some(token), Some(time_limit)).await
    }

    /// Registers two players and starts a game between them on the test board
    pub async fn start_game(
        &self,
        first_limit: i32,
        second_limit: i32,
    ) -> (GameId, String, String) {
        let alice = self.register("Alice").await;
        let bob = self.register("Bob").await;

        let first = self.join(&alice, first_limit).await.unwrap();
        let second = self.join(&bob, second_limit).await.unwrap();
        assert_eq!(first, JoinOutcome::Pending(first.game_id()));
        assert_eq!(second, JoinOutcome::Started(first.game_id()));

        let game_id = second.game_id();
        self.rig_game(game_id, TEST_BOARD, 0).await;
        (game_id, alice, bob)
    }

    /// Replaces the board and moves the start time `seconds_ago` into the past
    pub async fn rig_game(&self, game_id: GameId, board: &str, seconds_ago: i64) {
        let start_time = Utc::now() - Duration::seconds(seconds_ago);
        let updated = GameRepository::new(self.game_manager.database())
            .set_board_and_start(game_id, board, start_time)
            .await
            .unwrap();
        assert!(updated, "game {} not found", game_id);
    }

    pub async fn play(&self, game_id: GameId, token: &str, word: &str) -> Result<i32, GameError> {
        self.game_manager
            .play_word(&game_id.to_string(), Some(token), Some(word))
            .await
    }
}

pub fn assert_invalid_input<T: std::fmt::Debug>(result: Result<T, GameError>) {
    assert!(
        matches!(result, Err(GameError::InvalidInput(_))),
        "Expected InvalidInput, got {:?}",
        result
    );
}

pub fn assert_forbidden<T: std::fmt::Debug>(result: Result<T, GameError>) {
    assert!(
        matches!(result, Err(GameError::Forbidden(_))),
        "Expected Forbidden, got {:?}",
        result
    );
}

pub fn assert_conflict<T: std::fmt::Debug>(result: Result<T, GameError>) {
    assert!(
        matches!(result, Err(GameError::Conflict(_))),
        "Expected Conflict, got {:?}",
        result
    );
}
