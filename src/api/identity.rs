//! Caller identity from the upstream authenticator's header.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::{ApiError, AppState};
use crate::error::GameError;
use crate::games::Identity;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Identity::Anonymous);
        };
        let user_id: i32 = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .ok_or_else(|| ApiError::BadRequest(format!("{} must be an integer", USER_ID_HEADER)))?;

        let repository = state.games.repository().clone();
        let user = super::run_blocking(move || Ok::<_, GameError>(repository.get_user(user_id)?))
            .await?;
        match user {
            Some(_) => {
                debug!(user_id, "Authenticated request");
                Ok(Identity::User(user_id))
            }
            None => Err(ApiError::Unauthenticated(format!("unknown user {}", user_id))),
        }
    }
}
