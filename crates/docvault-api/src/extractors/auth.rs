//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it, and resolves the principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use docvault_core::error::AppError;
use docvault_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Bearer token from Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;

        // Re-read the account so role/position changes and deletions take
        // effect immediately rather than at token expiry.
        let user = state
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        Ok(AuthUser(RequestContext::new(
            user.id,
            user.username,
            user.role,
            user.position,
        )))
    }
}
