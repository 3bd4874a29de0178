/// Database row types — these map directly to SQLite rows.
/// Distinct from marks-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

pub struct BookmarkRow {
    pub id: String,
    pub title: String,
    pub url: String,
    pub user_id: String,
    pub created_at: String,
}
