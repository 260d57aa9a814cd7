use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use super::AppState;
use super::dto::{FormBody, InvalidForm, LoginForm};
use super::response::PageError;
use super::views;
use crate::auth::{SESSION_COOKIE, removal_cookie, session_cookie};
use crate::error::Error;
use crate::types::Actor;

pub async fn index() -> Html<String> {
    views::index()
}

pub async fn login_form() -> Html<String> {
    views::login()
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    form: Result<FormBody<LoginForm>, InvalidForm>,
) -> (CookieJar, Redirect) {
    let Ok(FormBody(form)) = form else {
        tracing::warn!("Admin login failed: unreadable form body");
        return (jar, Redirect::to("/loginadmin"));
    };

    match state.sessions.authenticate(&form.password) {
        Ok(session) => {
            tracing::info!("Admin login successful");
            (jar.add(session_cookie(&session)), Redirect::to("/admin"))
        }
        Err(Error::Unauthorized) => {
            tracing::warn!("Admin login failed");
            (jar, Redirect::to("/loginadmin"))
        }
        Err(e) => {
            tracing::error!("Failed to create session: {e}");
            (jar, Redirect::to("/loginadmin"))
        }
    }
}

/// Revokes the current session, if any. The cookie is cleared either way.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = state.sessions.revoke(cookie.value()) {
            tracing::error!("Failed to delete session: {e}");
        }
    }

    (jar.add(removal_cookie()), Redirect::to("/"))
}

pub async fn admin(
    actor: Actor,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    let links = state.links.list(actor)?;
    Ok(views::admin(&links))
}

pub async fn new_link(actor: Actor) -> Result<Html<String>, PageError> {
    if !actor.is_admin() {
        return Err(Error::Forbidden.into());
    }
    Ok(views::new_link())
}

pub async fn not_found() -> PageError {
    PageError::NotFound
}
