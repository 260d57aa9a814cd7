//! # Openly
//!
//! A minimal URL shortener: short aliases redirect to stored target URLs,
//! and a single shared admin password gates creating and deleting links.
//! Usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! openly = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use openly::config::ServerConfig;
//! use openly::server::{AppState, create_router};
//! use openly::store::{SqliteStore, Store};
//!
//! let config = ServerConfig::default();
//! let store = SqliteStore::new(&config.db_path).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), &config));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `openly` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod links;
pub mod server;
pub mod store;
pub mod types;
