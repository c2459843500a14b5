use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use ql_auth::Claims;
use ql_core::Error;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, recovered from the bearer token.
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError(Error::Auth("missing authorization header".to_string())))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError(Error::Auth("expected a bearer token".to_string())))?;

        let claims = state.tokens.verify(token).map_err(ApiError)?;
        Ok(Self(claims))
    }
}
