mod cookie;
mod middleware;
mod session;

pub use cookie::{removal_cookie, session_cookie};
pub use middleware::resolve_session;
pub use session::{SESSION_COOKIE, SessionService, spawn_expiry_sweep};
