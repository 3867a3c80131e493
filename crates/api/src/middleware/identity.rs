//! Caller identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use charpack_core::error::CoreError;
use charpack_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's user id, set by the upstream auth proxy.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts for.
///
/// Taken from the `x-user-id` header; when the header is absent the
/// configured demo user is used. With neither, the request is rejected
/// with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(USER_ID_HEADER)
            .map(|v| {
                v.to_str().map_err(|_| {
                    AppError::Core(CoreError::Unauthorized(format!(
                        "{USER_ID_HEADER} header is not valid text"
                    )))
                })
            })
            .transpose()?
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let user_id = from_header
            .or_else(|| state.config.demo_user_id.clone())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {USER_ID_HEADER} header"
                )))
            })?;

        Ok(CallerIdentity { user_id })
    }
}
