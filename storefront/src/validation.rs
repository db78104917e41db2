use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use garde::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HttpError;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// JSON body extractor that runs `garde` validation after deserializing.
///
/// Malformed JSON is rejected with a plain 400; rule violations are rejected
/// with a 400 listing every failing field.
///
/// ```ignore
/// async fn create(Validated(body): Validated<UserIn>) -> Json<User> { .. }
/// ```
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: DeserializeOwned + Validate + 'static,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                HttpError::BadRequest(rejection.body_text()).into_response()
            })?;

        value
            .validate()
            .map_err(|report| HttpError::Validation(field_errors(&report)).into_response())?;

        Ok(Validated(value))
    }
}

pub(crate) fn field_errors(report: &garde::Report) -> Vec<FieldError> {
    report
        .iter()
        .map(|(path, error)| {
            let field = path.to_string();
            FieldError {
                field: if field.is_empty() { "value".to_string() } else { field },
                message: error.message().to_string(),
                code: "validation".to_string(),
            }
        })
        .collect()
}
