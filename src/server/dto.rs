use axum::{
    extract::{Form, FromRequest, Multipart, Request},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Error;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub long_url: String,
}

/// Form body accepted either urlencoded or as `multipart/form-data`.
///
/// Only text fields are read from multipart bodies. When a field repeats,
/// the first value wins.
#[derive(Debug)]
pub struct FormBody<T>(pub T);

/// The request body could not be read as a form.
#[derive(Debug)]
pub struct InvalidForm;

impl IntoResponse for InvalidForm {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, "Bad Request").into_response()
    }
}

impl From<InvalidForm> for Error {
    fn from(_: InvalidForm) -> Self {
        Error::BadRequest("invalid form body".to_string())
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().starts_with("multipart/form-data"))
}

impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = InvalidForm;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                tracing::debug!("Rejected form body: {e}");
                InvalidForm
            })?;
            return Ok(FormBody(value));
        }

        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected multipart body: {e}");
            InvalidForm
        })?;

        let mut fields = Map::new();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::debug!("Failed to read multipart field: {e}");
            InvalidForm
        })? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let text = field.text().await.map_err(|e| {
                tracing::debug!("Failed to read multipart field '{name}': {e}");
                InvalidForm
            })?;
            fields.entry(name).or_insert(Value::String(text));
        }

        serde_json::from_value(Value::Object(fields))
            .map(FormBody)
            .map_err(|e| {
                tracing::debug!("Multipart fields do not match the form: {e}");
                InvalidForm
            })
    }
}
