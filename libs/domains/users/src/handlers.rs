use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestParameterResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{NicknameQuery, User};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const USER_CREATED: &str = "User created successfully.";
pub const USER_UPDATED: &str = "User updated successfully.";
pub const USER_DELETED: &str = "User deleted successfully.";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, get_user_by_nickname, update_user, delete_user),
    components(
        schemas(User),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestParameterResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User account lifecycle (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router: `/create`, `/getByNickName`, `/update`, `/delete`.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create", post(create_user))
        .route("/getByNickName", get(get_user_by_nickname))
        .route("/update", put(update_user))
        .route("/delete", delete(delete_user))
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/create",
    tag = "Users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = String, content_type = "text/plain",
            example = json!("User created successfully.")),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<User>,
) -> UserResult<impl IntoResponse> {
    service.create_user(input).await?;
    Ok((StatusCode::CREATED, USER_CREATED))
}

/// Look up a user by nickname
#[utoipa::path(
    get,
    path = "/getByNickName",
    tag = "Users",
    params(NicknameQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestParameterResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_by_nickname<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<NicknameQuery>,
) -> UserResult<Json<User>> {
    let user = service.get_user(query.nickname.as_deref()).await?;
    Ok(Json(user))
}

/// Replace the fields of an existing user
///
/// The record is matched by `nickname`, which cannot itself be changed.
#[utoipa::path(
    put,
    path = "/update",
    tag = "Users",
    request_body = User,
    responses(
        (status = 200, description = "User updated", body = String, content_type = "text/plain",
            example = json!("User updated successfully.")),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<User>,
) -> UserResult<impl IntoResponse> {
    let outcome = service.update_user(input).await?;
    tracing::debug!(?outcome, "Update applied");
    Ok((StatusCode::OK, USER_UPDATED))
}

/// Delete a user by nickname
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "Users",
    params(NicknameQuery),
    responses(
        (status = 200, description = "User deleted", body = String, content_type = "text/plain",
            example = json!("User deleted successfully.")),
        (status = 400, response = BadRequestParameterResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<NicknameQuery>,
) -> UserResult<impl IntoResponse> {
    service.delete_user(query.nickname.as_deref()).await?;
    Ok((StatusCode::OK, USER_DELETED))
}
