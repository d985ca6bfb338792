use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use boggle_core::WordValidator;
use boggle_persistence::connect_and_migrate;
use boggle_server::protocol::{RequestDispatcher, RouteTable};
use boggle_server::server::shutdown_signal;
use boggle_server::{BoggleServer, Config, GameManager};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Boggle server...");

    let config = Config::new();

    info!("Loading dictionary from {}", config.dictionary_path);
    let word_validator = match WordValidator::from_file(&config.dictionary_path) {
        Ok(validator) => Arc::new(validator),
        Err(e) => {
            error!("Failed to load dictionary: {:#}", e);
            error!("Set DICTIONARY_PATH to a file with one word per line.");
            std::process::exit(1);
        }
    };
    if word_validator.is_empty() {
        warn!("Dictionary is empty; every word will be scored as invalid");
    }

    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let routes = match RouteTable::new(&config.service_prefix) {
        Ok(routes) => routes,
        Err(e) => {
            error!("Invalid SERVICE_PREFIX {:?}: {}", config.service_prefix, e);
            std::process::exit(1);
        }
    };

    let game_manager = Arc::new(GameManager::new(db, word_validator, config.board_size));
    let dispatcher = Arc::new(RequestDispatcher::new(routes, game_manager));

    let server =
        match BoggleServer::bind(&config.bind_address(), dispatcher, config.max_body_bytes).await {
            Ok(server) => server.with_shutdown_grace(config.shutdown_grace()),
            Err(e) => {
                error!("Failed to bind {}: {}", config.bind_address(), e);
                std::process::exit(1);
            }
        };

    if let Ok(addr) = server.local_addr() {
        info!(
            "Server started successfully on {}. Press Ctrl+C to stop.",
            addr
        );
    }
    server.run_until(shutdown_signal()).await;
    info!("Server shutdown complete.");
}
