use super::identity::AuthContext;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Extractor for the optional request identity.
/// Usage in handlers: `async fn handler(CurrentIdentity(ctx): CurrentIdentity)`
pub struct CurrentIdentity(pub Option<AuthContext>);

impl CurrentIdentity {
    /// Identity id to stamp on created/updated rows, when known
    pub fn actor(&self) -> Option<String> {
        self.0.as_ref().and_then(|ctx| ctx.actor())
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentIdentity(parts.extensions.get::<AuthContext>().cloned()))
    }
}
