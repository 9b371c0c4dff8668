//! HTTP API routes
//!
//! Nested under `/api` by `axum_helpers::create_router`.

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/v1/user", users::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment, UsersConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::Client;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn app() -> Router {
        // Never contacted: these requests are rejected before any backend call
        let mongo_client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let state = AppState {
            config: Config {
                app: app_info!(),
                mongodb: MongoConfig::with_database("mongodb://127.0.0.1:1", "chat_test"),
                server: ServerConfig::default(),
                users: UsersConfig {
                    collection: "users".to_string(),
                    operation_timeout: Duration::from_millis(100),
                },
                environment: Environment::Development,
            },
            db: mongo_client.database("chat_test"),
            mongo_client,
        };

        axum_helpers::create_router::<crate::openapi::ApiDoc>(routes(&state), &state.config.server)
            .unwrap()
    }

    #[tokio::test]
    async fn test_user_routes_are_mounted_under_api_v1_user() {
        let response = app()
            .await
            .oneshot(
                Request::get("/api/v1/user/getByNickName")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "MISSING_PARAMETER");
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_routed() {
        let response = app()
            .await
            .oneshot(Request::get("/api/v1/user/create").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
