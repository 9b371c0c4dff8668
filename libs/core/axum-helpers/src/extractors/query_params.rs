//! Query string extractor that rejects with the JSON error envelope.

use crate::errors::AppError;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// Like [`axum::extract::Query`], but an undecodable query string (duplicate
/// keys, wrong types) becomes [`AppError::QueryExtractorRejection`], a 400
/// with code `BAD_REQUEST`, instead of axum's plain-text body.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Lookup {
        nickname: Option<String>,
        limit: Option<u32>,
    }

    async fn echo(QueryParams(lookup): QueryParams<Lookup>) -> String {
        format!("{:?}:{:?}", lookup.nickname, lookup.limit)
    }

    async fn get_uri(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = Router::new()
            .route("/", get(echo))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_decodes_query() {
        let (status, body) = get_uri("/?nickname=ana&limit=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"Some("ana"):Some(3)"#);
    }

    #[tokio::test]
    async fn test_rejections_use_error_envelope() {
        for uri in ["/?nickname=a&nickname=b", "/?limit=many"] {
            let (status, body) = get_uri(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

            let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(error["error"], "BAD_REQUEST");
            assert_eq!(error["code"], 1009);
        }
    }
}
