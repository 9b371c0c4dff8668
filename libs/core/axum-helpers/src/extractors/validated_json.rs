//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `Validate` after decoding.
///
/// Every rejection is a 400: malformed JSON, wrong field types and a missing
/// `Content-Type` all become [`AppError::JsonExtractorRejection`] rendered
/// with status 400, failed validation becomes [`AppError::ValidationError`].
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<NewUser>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
