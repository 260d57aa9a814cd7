use axum_extra::extract::cookie::Cookie;
use time::OffsetDateTime;

use super::session::SESSION_COOKIE;
use crate::types::Session;

fn base_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .build()
}

/// HTTP-only cookie carrying the session token, expiring with the session.
#[must_use]
pub fn session_cookie(session: &Session) -> Cookie<'static> {
    let mut cookie = base_cookie(session.session_id.clone());
    match OffsetDateTime::from_unix_timestamp(session.expiry_time.timestamp()) {
        Ok(expires) => cookie.set_expires(expires),
        Err(e) => tracing::warn!("Session expiry out of range for cookie: {e}"),
    }
    cookie
}

/// Cookie that tells the client to drop its session token.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = base_cookie(String::new());
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let now = Utc::now();
        let session = Session {
            id: 1,
            session_id: "abc".to_string(),
            expiry_time: now + Duration::hours(24),
            created_at: now,
        };

        let cookie = session_cookie(&session);
        assert_eq!(cookie.name(), "session_id");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.expires_datetime().map(|t| t.unix_timestamp()),
            Some(session.expiry_time.timestamp())
        );
    }

    #[test]
    fn test_removal_cookie_is_expired() {
        let cookie = removal_cookie();
        assert_eq!(cookie.name(), "session_id");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        let expires = cookie.expires_datetime().unwrap();
        assert!(expires < OffsetDateTime::now_utc());
    }
}
