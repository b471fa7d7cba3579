//! Viewer identity extractors.
//!
//! Authentication itself happens upstream: a trusted gateway
//! authenticates the request and forwards the identity in the
//! `X-User-Id` and `X-User-Roles` headers. These extractors only read
//! that identity; there is no session or token handling here, and no
//! ambient "current user" state anywhere downstream.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gridboard_core::error::CoreError;
use gridboard_core::types::Viewer;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated user id, set by the gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the comma-separated role names, set by the gateway.
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// The viewer making the request, anonymous when the gateway forwarded
/// no identity.
///
/// ```ignore
/// async fn show(CurrentViewer(viewer): CurrentViewer) -> AppResult<Json<()>> {
///     // viewer may be Viewer::Anonymous here
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentViewer(pub Viewer);

impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = match parts.headers.get(USER_ID_HEADER) {
            None => return Ok(CurrentViewer(Viewer::Anonymous)),
            Some(value) => {
                let raw = value.to_str().map_err(|_| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid X-User-Id header".into(),
                    ))
                })?;
                raw.parse().map_err(|_| {
                    AppError::Core(CoreError::Unauthorized(
                        "X-User-Id must be a numeric user id".into(),
                    ))
                })?
            }
        };

        let roles: Vec<String> = parts
            .headers
            .get(USER_ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(CurrentViewer(Viewer::User { user_id, roles }))
    }
}

/// Requires an authenticated viewer. Rejects anonymous requests with
/// 401, mirroring the login requirement on all mutating endpoints.
#[derive(Debug, Clone)]
pub struct RequireViewer(pub Viewer);

impl FromRequestParts<AppState> for RequireViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentViewer(viewer) = CurrentViewer::from_request_parts(parts, state).await?;
        if viewer == Viewer::Anonymous {
            return Err(AppError::Core(CoreError::Unauthorized(
                "This operation requires an authenticated viewer".into(),
            )));
        }
        Ok(RequireViewer(viewer))
    }
}
