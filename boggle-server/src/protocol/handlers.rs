use http::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::framer::FramedRequest;
use super::response::Response;
use super::routes::{Operation, RouteTable};
use crate::error::{GameError, GameResult};
use crate::game_manager::{GameManager, JoinOutcome};
use boggle_types::{
    CancelRequest, JoinRequest, JoinResponse, PlayWordRequest, PlayWordResponse, RegisterRequest,
    RegisterResponse,
};

/// Turns a framed request into exactly one response.
pub struct RequestDispatcher {
    routes: RouteTable,
    game_manager: Arc<GameManager>,
}

impl RequestDispatcher {
    pub fn new(routes: RouteTable, game_manager: Arc<GameManager>) -> Self {
        Self {
            routes,
            game_manager,
        }
    }

    pub fn game_manager(&self) -> &Arc<GameManager> {
        &self.game_manager
    }

    pub async fn dispatch(&self, request: &FramedRequest) -> Response {
        let Some(operation) = self.routes.resolve(&request.request_line) else {
            warn!("No route for request line {:?}", request.request_line);
            return Response::forbidden();
        };

        let result = match operation {
            Operation::Register => self.handle_register(&request.body).await,
            Operation::Join => self.handle_join(&request.body).await,
            Operation::Cancel => self.handle_cancel(&request.body).await,
            Operation::GetStatus { game_id, brief } => {
                self.handle_get_status(&game_id, brief).await
            }
            Operation::PlayWord { game_id } => {
                self.handle_play_word(&game_id, &request.body).await
            }
        };

        match result {
            Ok(response) => {
                info!("{} -> {}", request.request_line, response.status);
                response
            }
            Err(e) => {
                match &e {
                    GameError::Internal(_) => error!("{} failed: {}", request.request_line, e),
                    _ => info!("{} rejected: {}", request.request_line, e),
                }
                Response::status(e.status_code())
            }
        }
    }

    async fn handle_register(&self, body: &[u8]) -> GameResult<Response> {
        let request: RegisterRequest = decode_body(body)?;
        let user = self
            .game_manager
            .register(request.nickname.as_deref())
            .await?;

        Ok(Response::json(
            StatusCode::CREATED,
            &RegisterResponse {
                user_token: user.user_token,
            },
        ))
    }

    async fn handle_join(&self, body: &[u8]) -> GameResult<Response> {
        let request: JoinRequest = decode_body(body)?;
        let outcome = self
            .game_manager
            .join(request.user_token.as_deref(), request.time_limit)
            .await?;

        let status = match outcome {
            JoinOutcome::Pending(_) => StatusCode::ACCEPTED,
            JoinOutcome::Started(_) => StatusCode::CREATED,
        };
        Ok(Response::json(
            status,
            &JoinResponse {
                game_id: outcome.game_id().to_string(),
            },
        ))
    }

    async fn handle_cancel(&self, body: &[u8]) -> GameResult<Response> {
        let request: CancelRequest = decode_body(body)?;
        self.game_manager
            .cancel(request.user_token.as_deref())
            .await?;

        Ok(Response::empty(StatusCode::OK))
    }

    async fn handle_get_status(&self, game_id: &str, brief: bool) -> GameResult<Response> {
        let status = self.game_manager.get_status(game_id, brief).await?;
        Ok(Response::json(StatusCode::OK, &status))
    }

    async fn handle_play_word(&self, game_id: &str, body: &[u8]) -> GameResult<Response> {
        let request: PlayWordRequest = decode_body(body)?;
        let score = self
            .game_manager
            .play_word(
                game_id,
                request.user_token.as_deref(),
                request.word.as_deref(),
            )
            .await?;

        Ok(Response::json(StatusCode::OK, &PlayWordResponse { score }))
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> GameResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| GameError::invalid_input(format!("malformed request body: {}", e)))
}
