use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `Path` extractor for numeric route segments. A segment that does not parse
/// means the route does not exist, so the rejection is a 404 in the usual envelope.
#[derive(Debug, Clone, Copy)]
pub struct ResourcePath<T>(pub T);

impl<T, S> FromRequestParts<S> for ResourcePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "unparseable path segment");
                AppError::NotFound("Resource")
            })?;
        Ok(ResourcePath(value))
    }
}
