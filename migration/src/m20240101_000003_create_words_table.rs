use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;
use crate::m20240101_000002_create_games_table::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Words::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Words::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Words::GameId).integer().not_null())
                    .col(ColumnDef::new(Words::Player).string().not_null())
                    .col(ColumnDef::new(Words::Word).string().not_null())
                    .col(ColumnDef::new(Words::Score).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_words_game")
                            .from(Words::Table, Words::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_words_player")
                            .from(Words::Table, Words::Player)
                            .to(Users::Table, Users::Token),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per word per player per game
        manager
            .create_index(
                Index::create()
                    .name("idx_words_game_player_word")
                    .table(Words::Table)
                    .col(Words::GameId)
                    .col(Words::Player)
                    .col(Words::Word)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Words::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Words {
    Table,
    Id,
    GameId,
    Player,
    Word,
    Score,
}
