use std::sync::Arc;

use chrono::Utc;

use super::short_id::generate_short_id;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Actor, Link};

/// Attempts made to find an unused short ID before giving up.
pub const MAX_SHORT_ID_ATTEMPTS: usize = 3;

/// Creates, lists, deletes and resolves short links.
///
/// Every operation except [`LinkService::resolve`] requires an admin actor.
#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn Store>,
    generate: fn() -> String,
}

impl LinkService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_generator(store, generate_short_id)
    }

    /// Uses `generate` in place of the random short ID generator.
    #[must_use]
    pub fn with_generator(store: Arc<dyn Store>, generate: fn() -> String) -> Self {
        Self { store, generate }
    }

    /// Stores `long_url` under a fresh short ID and returns the ID.
    /// Surrounding whitespace is trimmed; an empty URL is rejected.
    ///
    /// A short ID collision is retried with a new ID up to
    /// [`MAX_SHORT_ID_ATTEMPTS`] times; any other storage error is returned
    /// immediately.
    pub fn create(&self, actor: Actor, long_url: &str) -> Result<String> {
        require_admin(actor)?;

        let long_url = long_url.trim();
        if long_url.is_empty() {
            return Err(Error::BadRequest("long_url is required".to_string()));
        }

        let mut attempt = 1;
        loop {
            let short_id = (self.generate)();
            match self.store.create_link(&short_id, long_url, Utc::now()) {
                Ok(link) => return Ok(link.short_id),
                Err(Error::AlreadyExists) if attempt < MAX_SHORT_ID_ATTEMPTS => {
                    tracing::warn!("Short ID collision on '{short_id}', retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn list(&self, actor: Actor) -> Result<Vec<Link>> {
        require_admin(actor)?;
        self.store.list_links()
    }

    /// Deleting an id that does not exist is not an error.
    pub fn delete(&self, actor: Actor, id: i64) -> Result<()> {
        require_admin(actor)?;
        if !self.store.delete_link(id)? {
            tracing::debug!("Delete of missing link {id} ignored");
        }
        Ok(())
    }

    /// Looks up the target of `short_id`. Public.
    pub fn resolve(&self, short_id: &str) -> Result<String> {
        self.store
            .get_link_by_short_id(short_id)?
            .map(|link| link.long_url)
            .ok_or(Error::NotFound)
    }
}

fn require_admin(actor: Actor) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}
