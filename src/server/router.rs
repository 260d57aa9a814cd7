use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post},
};

use super::{links, pages};
use crate::auth::{SessionService, resolve_session};
use crate::config::ServerConfig;
use crate::links::LinkService;
use crate::store::Store;

pub struct AppState {
    pub links: LinkService,
    pub sessions: SessionService,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: &ServerConfig) -> Self {
        Self {
            links: LinkService::new(store.clone()),
            sessions: SessionService::new(
                store,
                config.admin_password.clone(),
                config.session_ttl,
            ),
        }
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/loginadmin", get(pages::login_form).post(pages::login))
        .route("/logout", get(pages::logout))
        .route("/admin", get(pages::admin))
        .route("/new", get(pages::new_link))
        .route("/shorten", post(links::shorten))
        .route("/delete/{id}", get(links::delete_link))
        .route("/{short_id}", get(links::follow_link))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), resolve_session))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
