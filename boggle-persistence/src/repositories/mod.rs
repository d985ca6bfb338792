//! Repositories borrow any [`sea_orm::ConnectionTrait`], so the same queries
//! run against the pool or inside a caller's transaction.

pub mod game_repository;
pub mod user_repository;
pub mod word_repository;

pub use game_repository::{GameRepository, GameSession, SessionStart};
pub use user_repository::UserRepository;
pub use word_repository::WordRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::DatabaseConnection;

    pub async fn setup_test_db() -> DatabaseConnection {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
