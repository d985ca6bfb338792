use anyhow::Result;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{prelude::*, words};
use boggle_types::{GameId, WordPlayed};

pub struct WordRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> WordRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Words recorded for `player` in `game_id`, in play order.
    pub async fn words_for_player(&self, game_id: GameId, player: &str) -> Result<Vec<WordPlayed>> {
        let models = Words::find()
            .filter(words::Column::GameId.eq(game_id))
            .filter(words::Column::Player.eq(player))
            .order_by_asc(words::Column::Id)
            .all(self.conn)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| WordPlayed {
                word: model.word,
                score: model.score,
            })
            .collect())
    }

    pub async fn record_word(
        &self,
        game_id: GameId,
        player: &str,
        word: &str,
        score: i32,
    ) -> Result<()> {
        let word_model = words::ActiveModel {
            id: ActiveValue::NotSet,
            game_id: ActiveValue::Set(game_id),
            player: ActiveValue::Set(player.to_string()),
            word: ActiveValue::Set(word.to_string()),
            score: ActiveValue::Set(score),
        };
        Words::insert(word_model)
            .exec_without_returning(self.conn)
            .await?;

        Ok(())
    }
}
