//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use devevent_core::ValidationError;

use super::error::ApiError;

/// Event slug from the path, trimmed and lowercased
pub struct EventSlug(pub String);

impl<S> FromRequestParts<S> for EventSlug
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "slug" }))?;

        let slug = raw.trim().to_lowercase();
        if slug.is_empty() {
            return Err(ApiError::Validation(ValidationError::Empty { field: "slug" }));
        }
        Ok(Self(slug))
    }
}
