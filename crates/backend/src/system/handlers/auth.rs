use crate::system::auth::extractor::CurrentIdentity;
use crate::system::auth::RoleCache;
use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;

/// GET /api/system/auth/me
pub async fn current_user(
    CurrentIdentity(context): CurrentIdentity,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match context {
        Some(ctx) => Ok(Json(json!({
            "user": ctx.user,
            "role": ctx.role.map(|r| r.as_str()),
        }))),
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

/// POST /api/system/auth/signout
///
/// The session itself ends at the identity provider; this side only drops
/// the cached role so the next request resolves fresh.
pub async fn signout(Extension(role_cache): Extension<Arc<RoleCache>>) -> StatusCode {
    role_cache.invalidate();
    StatusCode::NO_CONTENT
}
