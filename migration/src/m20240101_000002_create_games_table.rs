use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Player1).string().not_null())
                    .col(ColumnDef::new(Games::Player2).string().null())
                    .col(ColumnDef::new(Games::Board).string().null())
                    .col(ColumnDef::new(Games::TimeLimit).integer().not_null())
                    .col(
                        ColumnDef::new(Games::StartTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_player1")
                            .from(Games::Table, Games::Player1)
                            .to(Users::Table, Users::Token),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_player2")
                            .from(Games::Table, Games::Player2)
                            .to(Users::Table, Users::Token),
                    )
                    .to_owned(),
            )
            .await?;

        // Pending-slot lookups filter on player2 IS NULL
        manager
            .create_index(
                Index::create()
                    .name("idx_games_player2")
                    .table(Games::Table)
                    .col(Games::Player2)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_player1")
                    .table(Games::Table)
                    .col(Games::Player1)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Games {
    Table,
    Id,
    Player1,
    Player2,
    Board,
    TimeLimit,
    StartTime,
}
