//! JSON body extractor that tolerates an absent body.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON body where an empty body means `T::default()`.
///
/// Used by the password-gated routes, whose handlers must look the product
/// up before the credential is judged. A body that is present but not valid
/// JSON for `T` is still a `Validation` error (400).
pub struct OptionalJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(OptionalJson)
            .map_err(|e| AppError::validation(format!("Invalid JSON body: {}", e)))
    }
}
