use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Redirect, Response},
};

use super::AppState;
use super::dto::{FormBody, InvalidForm, ShortenForm};
use super::response::{PageError, ShortenResponse, shorten_error};
use crate::error::Error;
use crate::types::Actor;

/// Creates a link. Always answers JSON; an anonymous caller is told to log
/// in before the body is looked at.
pub async fn shorten(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    form: Result<FormBody<ShortenForm>, InvalidForm>,
) -> Response {
    let created = match form {
        Ok(FormBody(form)) => state.links.create(actor, &form.long_url),
        Err(_) if !actor.is_admin() => Err(Error::Forbidden),
        Err(e) => Err(e.into()),
    };

    match created {
        Ok(short_id) => {
            tracing::info!("Created short link {short_id}");
            Json(ShortenResponse::created(short_id)).into_response()
        }
        Err(e) => shorten_error(e).into_response(),
    }
}

/// Deletes a link by numeric id. A missing or malformed id is a no-op.
pub async fn delete_link(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    match id.parse::<i64>() {
        Ok(id) => state.links.delete(actor, id)?,
        Err(_) if actor.is_admin() => tracing::debug!("Ignoring delete of malformed id '{id}'"),
        Err(_) => return Err(Error::Forbidden.into()),
    }

    Ok(Redirect::to("/admin"))
}

pub async fn follow_link(
    State(state): State<Arc<AppState>>,
    Path(short_id): Path<String>,
) -> Result<Response, PageError> {
    let long_url = state.links.resolve(&short_id).map_err(|e| {
        if matches!(e, Error::NotFound) {
            tracing::debug!("Unknown short ID '{short_id}'");
        }
        PageError::from(e)
    })?;

    let location = HeaderValue::try_from(long_url).map_err(|e| {
        tracing::error!("Stored URL for '{short_id}' is not a valid Location: {e}");
        PageError::Internal
    })?;

    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}
