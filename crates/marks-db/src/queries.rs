use crate::models::{BookmarkRow, UserRow};
use crate::{Database, StoreError, StoreResult};
use rusqlite::Connection;

impl Database {
    // -- Users --

    /// Owners are provisioned by the auth collaborator (or by tests); this
    /// system never mutates or deletes them.
    pub fn create_user(&self, id: &str, email: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute("INSERT INTO users (id, email) VALUES (?1, ?2)", (id, email))?;
            Ok(())
        })
    }

    /// Resolve a principal's email to its owner row, or None if unknown.
    pub fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    // -- Bookmarks --

    pub fn insert_bookmark(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        url: &str,
        created_at: &str,
    ) -> StoreResult<()> {
        validate_fields(title, url)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bookmarks (id, title, url, user_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, title, url, user_id, created_at],
            )?;
            Ok(())
        })
    }

    /// One window of an owner's bookmarks, newest first. A window past the
    /// end of the collection yields an empty vec, not an error.
    pub fn list_bookmarks(
        &self,
        user_id: &str,
        skip: i64,
        take: i64,
    ) -> StoreResult<Vec<BookmarkRow>> {
        self.with_conn(|conn| query_bookmarks(conn, user_id, skip, take))
    }

    /// Full count for one owner, independent of any window.
    pub fn count_bookmarks(&self, user_id: &str) -> StoreResult<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM bookmarks WHERE user_id = ?1",
                [user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    /// Update at most one row matching both id and owner. Returns the rows
    /// affected (0 or 1); an id owned by someone else matches zero rows and
    /// is not an error.
    pub fn update_owned(
        &self,
        user_id: &str,
        id: &str,
        title: &str,
        url: &str,
    ) -> StoreResult<usize> {
        validate_fields(title, url)?;
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE bookmarks SET title = ?3, url = ?4 WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![id, user_id, title, url],
            )?;
            Ok(affected)
        })
    }

    /// Same matching/no-op semantics as update_owned.
    pub fn delete_owned(&self, user_id: &str, id: &str) -> StoreResult<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM bookmarks WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![id, user_id],
            )?;
            Ok(affected)
        })
    }
}

fn validate_fields(title: &str, url: &str) -> StoreResult<()> {
    if title.is_empty() {
        return Err(StoreError::Validation("title"));
    }
    if url.is_empty() {
        return Err(StoreError::Validation("url"));
    }
    Ok(())
}

fn query_user_by_email(conn: &Connection, email: &str) -> StoreResult<Option<UserRow>> {
    let mut stmt = conn.prepare("SELECT id, email, created_at FROM users WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_bookmarks(
    conn: &Connection,
    user_id: &str,
    skip: i64,
    take: i64,
) -> StoreResult<Vec<BookmarkRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, url, user_id, created_at
         FROM bookmarks
         WHERE user_id = ?1
         ORDER BY created_at DESC
         LIMIT ?2 OFFSET ?3",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![user_id, take, skip], |row| {
            Ok(BookmarkRow {
                id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
                user_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> StoreResult<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> StoreResult<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn open_test_db() -> Database {
        let db = Database::open(Path::new(":memory:")).expect("open in-memory db");
        db.create_user("user-a", "a@example.com").unwrap();
        db.create_user("user-b", "b@example.com").unwrap();
        db
    }

    /// Deterministic, strictly increasing timestamps in the row format.
    fn ts(n: u32) -> String {
        format!("2026-08-05T10:00:{:02}.000000Z", n)
    }

    #[test]
    fn test_find_user_by_email() {
        let db = open_test_db();

        let user = db.find_user_by_email("a@example.com").unwrap().unwrap();
        assert_eq!(user.id, "user-a");
        assert_eq!(user.email, "a@example.com");

        assert!(db.find_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_listing_is_scoped_to_owner() {
        let db = open_test_db();
        db.insert_bookmark("b1", "user-a", "Docs", "https://docs.rs", &ts(1))
            .unwrap();

        let a_list = db.list_bookmarks("user-a", 0, 5).unwrap();
        assert_eq!(a_list.len(), 1);
        assert_eq!(a_list[0].id, "b1");

        // b1 is invisible to any other owner
        assert!(db.list_bookmarks("user-b", 0, 5).unwrap().is_empty());
        assert_eq!(db.count_bookmarks("user-b").unwrap(), 0);
    }

    #[test]
    fn test_newest_first_ordering() {
        let db = open_test_db();
        for n in 1..=3 {
            db.insert_bookmark(
                &format!("b{}", n),
                "user-a",
                &format!("Title {}", n),
                "https://example.com",
                &ts(n),
            )
            .unwrap();
        }

        let rows = db.list_bookmarks("user-a", 0, 5).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b3", "b2", "b1"]);
    }

    #[test]
    fn test_second_page_window() {
        // 7 bookmarks, window (skip=5, take=5) -> the 6th and 7th newest
        let db = open_test_db();
        for n in 1..=7 {
            db.insert_bookmark(
                &format!("b{}", n),
                "user-a",
                &format!("Title {}", n),
                "https://example.com",
                &ts(n),
            )
            .unwrap();
        }

        assert_eq!(db.count_bookmarks("user-a").unwrap(), 7);

        let rows = db.list_bookmarks("user-a", 5, 5).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "b1"]);

        // A window past the end is empty, not an error
        assert!(db.list_bookmarks("user-a", 10, 5).unwrap().is_empty());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let db = open_test_db();

        let err = db
            .insert_bookmark("b1", "user-a", "", "https://example.com", &ts(1))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation("title")));

        let err = db
            .insert_bookmark("b1", "user-a", "Example", "", &ts(1))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation("url")));

        // Nothing was stored
        assert_eq!(db.count_bookmarks("user-a").unwrap(), 0);

        // Update enforces the same rule and leaves the row untouched
        db.insert_bookmark("b1", "user-a", "Example", "https://example.com", &ts(1))
            .unwrap();
        let err = db.update_owned("user-a", "b1", "", "https://new.example").unwrap_err();
        assert!(matches!(err, StoreError::Validation("title")));

        let rows = db.list_bookmarks("user-a", 0, 5).unwrap();
        assert_eq!(rows[0].title, "Example");
        assert_eq!(rows[0].url, "https://example.com");
    }

    #[test]
    fn test_update_owned_foreign_id_is_noop() {
        let db = open_test_db();
        db.insert_bookmark("b1", "user-b", "B's bookmark", "https://b.example", &ts(1))
            .unwrap();

        let affected = db
            .update_owned("user-a", "b1", "Hijacked", "https://evil.example")
            .unwrap();
        assert_eq!(affected, 0);

        // The true owner's row is unchanged
        let rows = db.list_bookmarks("user-b", 0, 5).unwrap();
        assert_eq!(rows[0].title, "B's bookmark");
        assert_eq!(rows[0].url, "https://b.example");
    }

    #[test]
    fn test_delete_owned_foreign_id_is_noop() {
        let db = open_test_db();
        db.insert_bookmark("b1", "user-b", "B's bookmark", "https://b.example", &ts(1))
            .unwrap();

        let affected = db.delete_owned("user-a", "b1").unwrap();
        assert_eq!(affected, 0);

        let rows = db.list_bookmarks("user-b", 0, 5).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "b1");
    }

    #[test]
    fn test_mutations_visible_in_next_list() {
        let db = open_test_db();
        db.insert_bookmark("b1", "user-a", "Old title", "https://example.com", &ts(1))
            .unwrap();

        let affected = db
            .update_owned("user-a", "b1", "New title", "https://example.com")
            .unwrap();
        assert_eq!(affected, 1);
        assert_eq!(db.list_bookmarks("user-a", 0, 5).unwrap()[0].title, "New title");

        let affected = db.delete_owned("user-a", "b1").unwrap();
        assert_eq!(affected, 1);
        assert!(db.list_bookmarks("user-a", 0, 5).unwrap().is_empty());
        assert_eq!(db.count_bookmarks("user-a").unwrap(), 0);
    }

    #[test]
    fn test_timestamp_format_orders_lexicographically() {
        let early = crate::timestamp(&"2026-08-05T10:00:01.000009Z".parse().unwrap());
        let late = crate::timestamp(&"2026-08-05T10:00:01.000010Z".parse().unwrap());
        assert!(late > early);
        assert_eq!(early, "2026-08-05T10:00:01.000009Z");
    }
}
