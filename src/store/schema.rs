pub const SCHEMA: &str = r#"
-- Short links; short_id is the public alias
CREATE TABLE IF NOT EXISTS links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    short_id TEXT NOT NULL UNIQUE,
    long_url TEXT NOT NULL,              -- duplicates allowed
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- Admin sessions keyed by the cookie token
CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL UNIQUE,
    expiry_time DATETIME NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_sessions_expiry ON sessions(expiry_time);
"#;
