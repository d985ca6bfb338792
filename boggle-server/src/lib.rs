pub mod config;
pub mod error;
pub mod game_manager;
pub mod protocol;
pub mod server;

pub use config::Config;
pub use error::{GameError, GameResult};
pub use game_manager::{GameManager, JoinOutcome};
pub use server::BoggleServer;
