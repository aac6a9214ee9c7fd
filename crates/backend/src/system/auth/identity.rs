//! Identity is external: an authenticating proxy in front of this service
//! verifies the session and forwards who the caller is. This module only
//! consumes that report; there is no credential handling here.

use axum::http::HeaderMap;
use contracts::system::auth::{AppRole, SessionUser};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// The caller's identity for one request, as resolved by the middleware
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: SessionUser,
    /// Strongest role the provider reported, None when the user has none
    pub role: Option<AppRole>,
}

impl AuthContext {
    pub fn actor(&self) -> Option<String> {
        Some(self.user.id.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.role.map(|r| r.is_admin()).unwrap_or(false)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Read the forwarded identity from request headers. Absent or incomplete
/// headers mean an anonymous request, not an error.
pub fn user_from_headers(headers: &HeaderMap) -> Option<SessionUser> {
    let id = header_str(headers, USER_ID_HEADER)?;
    let email = header_str(headers, USER_EMAIL_HEADER).unwrap_or("");
    Some(SessionUser {
        id: id.to_string(),
        email: email.to_string(),
        metadata: serde_json::Value::Null,
    })
}

/// Parse the forwarded role list; unknown names are ignored
pub fn roles_from_headers(headers: &HeaderMap) -> Vec<AppRole> {
    header_str(headers, USER_ROLES_HEADER)
        .map(|raw| {
            raw.split(',')
                .filter_map(|r| AppRole::from_str(r.trim()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(entries: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_missing_identity_is_anonymous() {
        assert!(user_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_roles_parse_and_skip_unknown() {
        let map = headers(&[(USER_ROLES_HEADER, "usuario, admin, superuser")]);
        let roles = roles_from_headers(&map);
        assert_eq!(roles, vec![AppRole::Usuario, AppRole::Admin]);
    }

    #[test]
    fn test_user_parses_from_headers() {
        let map = headers(&[
            (USER_ID_HEADER, "user-1"),
            (USER_EMAIL_HEADER, "ana@example.com"),
        ]);
        let user = user_from_headers(&map).unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "ana@example.com");
    }
}
