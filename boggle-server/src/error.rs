use http::StatusCode;
use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a game engine operation.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl GameError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        GameError::InvalidInput(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        GameError::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        GameError::Conflict(message.into())
    }

    /// Status sent to the client. Malformed requests share 403 with
    /// permission failures.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::InvalidInput(_) | GameError::Forbidden(_) => StatusCode::FORBIDDEN,
            GameError::Conflict(_) => StatusCode::CONFLICT,
            GameError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for GameError {
    fn from(err: DbErr) -> Self {
        GameError::Internal(err.into())
    }
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GameError::invalid_input("bad").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(GameError::forbidden("no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(GameError::conflict("busy").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            GameError::from(anyhow::anyhow!("disk on fire")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GameError::from(DbErr::Custom("gone".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
