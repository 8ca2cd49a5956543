//! Authentication extractor
//!
//! Requires an `Authorization: Bearer <token>` header on the request.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::response::ApiError;
use crate::state::AppState;

/// Proof that the request carried an accepted bearer token.
///
/// With `API_BEARER_TOKEN` configured the token must match it; otherwise any
/// non-empty token is accepted.
#[derive(Debug, Clone, Copy)]
pub struct BearerAuth;

#[async_trait]
impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let token = bearer.token();
        if token.is_empty() {
            return Err(ApiError::MissingAuth);
        }

        let app_state = AppState::from_ref(state);
        match app_state.config().auth.bearer_token.as_deref() {
            Some(expected) if expected != token => {
                tracing::warn!("Rejected request with unknown bearer token");
                Err(ApiError::InvalidToken)
            }
            _ => Ok(BearerAuth),
        }
    }
}
