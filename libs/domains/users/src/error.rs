use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("Nickname '{0}' is already taken")]
    DuplicateNickname(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Nickname parameter is required")]
    MissingNickname,

    #[error("Nickname parameter is not valid UTF-8")]
    InvalidNickname,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database operation '{0}' timed out")]
    Timeout(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::DuplicateNickname(_) => AppError::Conflict(err.to_string()),
            UserError::Validation(errors) => AppError::ValidationError(errors),
            UserError::MissingNickname => AppError::MissingParameter(err.to_string()),
            UserError::InvalidNickname => AppError::BadRequest(err.to_string()),
            UserError::Database(msg) => AppError::Database(msg),
            UserError::Timeout(_) => AppError::DatabaseTimeout(err.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::NotFound("ana".into()), StatusCode::NOT_FOUND),
            (UserError::DuplicateNickname("ana".into()), StatusCode::CONFLICT),
            (UserError::MissingNickname, StatusCode::BAD_REQUEST),
            (UserError::InvalidNickname, StatusCode::BAD_REQUEST),
            (UserError::Database("socket closed".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (UserError::Timeout("find_by_nickname"), StatusCode::INTERNAL_SERVER_ERROR),
            (UserError::Internal("bson".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_message_names_the_nickname() {
        match AppError::from(UserError::NotFound("ana".into())) {
            AppError::NotFound(msg) => assert_eq!(msg, "User 'ana' not found"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
