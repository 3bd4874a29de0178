use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS bookmarks (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            url         TEXT NOT NULL,
            user_id     TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bookmarks_user
            ON bookmarks(user_id, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
