//! Product id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::errors::AppError;

/// `:id` path segment parsed as a product id.
///
/// An id that is not a UUID cannot name an existing product, so it is
/// rejected as `NotFound` rather than as a malformed request.
pub struct ProductIdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ProductIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        Uuid::parse_str(&raw)
            .map(ProductIdPath)
            .map_err(|_| AppError::NotFound)
    }
}
