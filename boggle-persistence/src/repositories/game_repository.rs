use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::entities::{games, prelude::*};
use boggle_types::GameId;

/// A stored game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub id: GameId,
    pub player1: String,
    pub player2: Option<String>,
    pub board: Option<String>,
    pub time_limit: i32,
    pub start_time: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn is_participant(&self, token: &str) -> bool {
        self.player1 == token || self.player2.as_deref() == Some(token)
    }
}

impl From<games::Model> for GameSession {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            player1: model.player1,
            player2: model.player2,
            board: model.board,
            time_limit: model.time_limit,
            start_time: model.start_time,
        }
    }
}

/// Fields written when a pending session gains its second player.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub player2: String,
    pub board: String,
    pub time_limit: i32,
    pub start_time: DateTime<Utc>,
}

pub struct GameRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> GameRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: GameId) -> Result<Option<GameSession>> {
        let model = Games::find_by_id(id).one(self.conn).await?;
        Ok(model.map(GameSession::from))
    }

    /// The session waiting for a second player, if any.
    pub async fn find_pending(&self) -> Result<Option<GameSession>> {
        let model = Games::find()
            .filter(games::Column::Player2.is_null())
            .order_by_asc(games::Column::Id)
            .one(self.conn)
            .await?;

        Ok(model.map(GameSession::from))
    }

    /// Sessions that have started and include `token` as either player.
    pub async fn find_started_for_player(&self, token: &str) -> Result<Vec<GameSession>> {
        let models = Games::find()
            .filter(
                Condition::any()
                    .add(games::Column::Player1.eq(token))
                    .add(games::Column::Player2.eq(token)),
            )
            .filter(games::Column::StartTime.is_not_null())
            .order_by_asc(games::Column::Id)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(GameSession::from).collect())
    }

    pub async fn create_pending(&self, player1: &str, time_limit: i32) -> Result<GameSession> {
        let model = games::ActiveModel {
            id: ActiveValue::NotSet,
            player1: ActiveValue::Set(player1.to_string()),
            player2: ActiveValue::Set(None),
            board: ActiveValue::Set(None),
            time_limit: ActiveValue::Set(time_limit),
            start_time: ActiveValue::Set(None),
        };

        let saved = model.insert(self.conn).await?;
        Ok(GameSession::from(saved))
    }

    /// Attach the second player to pending session `id`. Only succeeds while
    /// the slot is still open; returns whether the row was updated.
    pub async fn start_pending(&self, id: GameId, start: SessionStart) -> Result<bool> {
        let result = Games::update_many()
            .col_expr(games::Column::Player2, Expr::value(start.player2))
            .col_expr(games::Column::Board, Expr::value(start.board))
            .col_expr(games::Column::TimeLimit, Expr::value(start.time_limit))
            .col_expr(games::Column::StartTime, Expr::value(start.start_time))
            .filter(games::Column::Id.eq(id))
            .filter(games::Column::Player2.is_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Delete session `id` if it is still pending.
    pub async fn delete_pending(&self, id: GameId) -> Result<bool> {
        let result = Games::delete_many()
            .filter(games::Column::Id.eq(id))
            .filter(games::Column::Player2.is_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Overwrite the board and start time of started session `id`. Pending
    /// sessions are left alone.
    #[cfg(any(test, feature = "test-support"))]
    pub async fn set_board_and_start(
        &self,
        id: GameId,
        board: &str,
        start_time: DateTime<Utc>,
    ) -> Result<bool> {
        let result = Games::update_many()
            .col_expr(games::Column::Board, Expr::value(board))
            .col_expr(games::Column::StartTime, Expr::value(start_time))
            .filter(games::Column::Id.eq(id))
            .filter(games::Column::Player2.is_not_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
