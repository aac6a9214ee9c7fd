use super::identity::{self, AuthContext};
use super::role_cache::RoleCache;
use axum::{
    body::Body, extract::Extension, extract::Request, http::StatusCode, middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Resolve the forwarded identity and attach it to the request. Anonymous
/// requests pass through without a context; write handlers then simply have
/// no actor to stamp.
pub async fn attach_identity(
    Extension(role_cache): Extension<Arc<RoleCache>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(user) = identity::user_from_headers(req.headers()) {
        let roles = identity::roles_from_headers(req.headers());
        let role = role_cache.resolve(&user.id, &roles);
        req.extensions_mut().insert(AuthContext { user, role });
    }
    next.run(req).await
}

/// Middleware for admin-only mutations
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !context.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}
