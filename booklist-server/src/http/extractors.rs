//! Custom Axum extractors
//!
//! Both extractors reject with [`ApiError`] so every decode failure is a
//! JSON 400 instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{BookId, ValidationError};

/// Extract a numeric book id from the `{id}` path segment
pub struct BookIdPath(pub BookId);

impl<S> FromRequestParts<S> for BookIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "id",
                    value: String::new(),
                })
            })?;

        let id = raw.parse::<BookId>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                value: raw.clone(),
            })
        })?;

        Ok(Self(id))
    }
}

/// JSON body extractor that maps every rejection to 400
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(ValidationError::Body {
                    reason: rejection.body_text(),
                })
            })?;

        Ok(Self(value))
    }
}
