//! CurrentUser Extractor
//!
//! Reads the user placed in the request extensions by
//! [`require_auth`](super::require_auth). A handler mounted outside the guard
//! still works: the bearer token is validated here instead.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::middleware::authenticate;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_from_header)
            .ok_or_else(AppError::unauthorized)?;

        let user = authenticate(state, token)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
