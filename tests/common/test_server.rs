use std::sync::Arc;

use tempfile::TempDir;
use tokio::task::JoinHandle;

use openly::server::{AppState, create_router};
use openly::store::SqliteStore;

use super::{open_store, test_config};

/// A real server on an ephemeral local port, for tests that need actual
/// concurrent connections.
pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    pub store: Arc<SqliteStore>,
    server_task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = open_store(&temp_dir);
        let state = Arc::new(AppState::new(store.clone(), &test_config()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let server_task = tokio::spawn(async move {
            axum::serve(listener, create_router(state))
                .await
                .expect("serve");
        });

        Self {
            temp_dir,
            base_url,
            store,
            server_task,
        }
    }

    /// HTTP client that reports redirects instead of following them. It keeps
    /// no cookies; pass the session cookie as an explicit `Cookie` header.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("build client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}
