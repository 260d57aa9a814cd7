#![allow(dead_code)]

mod test_server;

pub use test_server::TestServer;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{
        Request, Response, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use tempfile::TempDir;
use tower::ServiceExt;

use openly::config::ServerConfig;
use openly::server::{AppState, create_router};
use openly::store::{SqliteStore, Store};

pub const ADMIN_PASSWORD: &str = "test-password";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        admin_password: ADMIN_PASSWORD.to_string(),
        ..ServerConfig::default()
    }
}

pub fn open_store(temp_dir: &TempDir) -> Arc<SqliteStore> {
    let store = SqliteStore::new(temp_dir.path().join("openly.db")).expect("open store");
    store.initialize().expect("initialize store");
    Arc::new(store)
}

pub fn count_rows(store: &SqliteStore, table: &str) -> i64 {
    store
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count rows")
}

/// Router driven in-process, one request at a time.
pub struct TestApp {
    pub temp_dir: TempDir,
    pub store: Arc<SqliteStore>,
    pub state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = open_store(&temp_dir);
        let state = Arc::new(AppState::new(store.clone(), &test_config()));
        let router = create_router(state.clone());

        Self {
            temp_dir,
            store,
            state,
            router,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, session: Option<&str>) -> Response<Body> {
        self.send(get_request(uri, session)).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, session: Option<&str>) -> Response<Body> {
        self.send(form_request(uri, body, session)).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        session: Option<&str>,
    ) -> Response<Body> {
        self.send(multipart_request(uri, fields, session)).await
    }

    /// POST with the given body and no `Content-Type` header.
    pub async fn post_raw(&self, uri: &str, body: &str, session: Option<&str>) -> Response<Body> {
        let mut builder = Request::post(uri);
        if let Some(token) = session {
            builder = builder.header(COOKIE, format!("session_id={token}"));
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
    }

    /// Logs in and returns the session token.
    pub async fn login(&self) -> String {
        let response = self
            .post_form("/loginadmin", &format!("password={ADMIN_PASSWORD}"), None)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_token(&response).expect("login sets session cookie")
    }

    /// Creates a link through the API and returns its short ID.
    pub async fn shorten(&self, session: &str, encoded_url: &str) -> String {
        let response = self
            .post_form("/shorten", &format!("long_url={encoded_url}"), Some(session))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json body");
        body["short_id"].as_str().expect("short_id").to_string()
    }
}

pub fn get_request(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session_id={token}"));
    }
    builder.body(Body::empty()).expect("build request")
}

pub fn form_request(uri: &str, body: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session_id={token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("build request")
}

const MULTIPART_BOUNDARY: &str = "openly-test-boundary";

pub fn multipart_request(
    uri: &str,
    fields: &[(&str, &str)],
    session: Option<&str>,
) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));

    let mut builder = Request::post(uri).header(
        CONTENT_TYPE,
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
    );
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session_id={token}"));
    }
    builder.body(Body::from(body)).expect("build request")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn location<B>(response: &Response<B>) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub fn set_cookie<B>(response: &Response<B>) -> Option<&str> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
}

/// Extracts the session token from a `Set-Cookie` header, if one was set.
pub fn session_token<B>(response: &Response<B>) -> Option<String> {
    let header = set_cookie(response)?;
    let pair = header.split(';').next()?;
    let value = pair.strip_prefix("session_id=")?;
    (!value.is_empty()).then(|| value.to_string())
}

pub fn is_short_id(s: &str) -> bool {
    s.len() == 6
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}
