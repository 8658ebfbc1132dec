use rusqlite::Connection;

use crate::error::StorageError;

pub const SCHEMA_VERSION: i32 = 1;

pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
    ",
    )?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at INTEGER NOT NULL
);
INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (1, unixepoch());

CREATE TABLE IF NOT EXISTS people (
    individual_id INTEGER PRIMARY KEY CHECK (individual_id > 0),
    name TEXT,
    birthday TEXT,
    email TEXT,
    phone TEXT,
    age_group TEXT,
    gender TEXT,
    liveness TEXT NOT NULL DEFAULT 'live' CHECK (liveness IN ('live', 'stale'))
);
CREATE INDEX IF NOT EXISTS idx_people_stale ON people (liveness) WHERE liveness = 'stale';
";
