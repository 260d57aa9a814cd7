use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use super::session::SESSION_COOKIE;
use crate::server::AppState;
use crate::types::Actor;

/// Resolves the session cookie on every request and records the result as
/// an [`Actor`] request extension.
pub async fn resolve_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value());
    let actor = state.sessions.resolve(token);

    request.extensions_mut().insert(actor);
    next.run(request).await
}

/// Handlers take the actor resolved by [`resolve_session`]. Requests that
/// bypassed the middleware are anonymous.
impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Actor>().copied().unwrap_or_default())
    }
}
