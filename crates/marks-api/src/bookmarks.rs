use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::{error, warn};
use uuid::Uuid;

use marks_db::models::BookmarkRow;
use marks_types::api::{
    BookmarkPageResponse, BookmarkResponse, CreateBookmarkRequest, SessionClaims,
};

use crate::AppState;
use crate::error::ApiError;
use crate::pagination::{self, paginate};

/// GET /bookmarks?page=&limit= — one window of the caller's bookmarks, newest
/// first, plus the full count and the derived page total.
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<impl IntoResponse, ApiError> {
    let page = pagination::page_param(query.get("page").map(String::as_str));
    let limit = pagination::limit_param(query.get("limit").map(String::as_str));

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let email = claims.email.clone();

    let (rows, total, total_pages) = tokio::task::spawn_blocking(move || {
        let user = db
            .db
            .find_user_by_email(&email)?
            .ok_or(ApiError::UserNotFound)?;

        let total = db.db.count_bookmarks(&user.id)?;
        let window = paginate(total, page, limit);
        let rows = db.db.list_bookmarks(&user.id, window.skip, limit)?;

        Ok::<_, ApiError>((rows, total, window.total_pages))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })??;

    let data: Vec<BookmarkResponse> = rows.into_iter().map(row_to_response).collect();

    Ok(Json(BookmarkPageResponse {
        data,
        total,
        page,
        total_pages,
    }))
}

/// POST /bookmarks — create a bookmark for the caller. Both fields are
/// required; beyond presence the url is opaque text.
pub async fn create_bookmark(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<CreateBookmarkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.is_empty() || req.url.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let id = Uuid::new_v4();
    let created_at = chrono::Utc::now();

    let db = state.clone();
    let email = claims.email.clone();
    let bid = id.to_string();
    let title = req.title.clone();
    let url = req.url.clone();
    let stamp = marks_db::timestamp(&created_at);

    let user_id = tokio::task::spawn_blocking(move || {
        let user = db
            .db
            .find_user_by_email(&email)?
            .ok_or(ApiError::UserNotFound)?;

        db.db.insert_bookmark(&bid, &user.id, &title, &url, &stamp)?;

        Ok::<_, ApiError>(user.id)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })??;

    Ok(Json(BookmarkResponse {
        id,
        title: req.title,
        url: req.url,
        user_id,
        created_at,
    }))
}

fn row_to_response(row: BookmarkRow) -> BookmarkResponse {
    let created_at = parse_timestamp(&row.created_at, &row.id);

    BookmarkResponse {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt bookmark id '{}': {}", row.id, e);
            Uuid::default()
        }),
        title: row.title,
        url: row.url,
        user_id: row.user_id,
        created_at,
    }
}

fn parse_timestamp(raw: &str, id: &str) -> chrono::DateTime<chrono::Utc> {
    raw.parse::<chrono::DateTime<chrono::Utc>>()
        .or_else(|_| {
            // Rows seeded outside this service may carry SQLite's
            // "YYYY-MM-DD HH:MM:SS" format without timezone.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on bookmark '{}': {}", raw, id, e);
            chrono::DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2026-08-05T10:00:01.000000Z", "b1");
        assert_eq!(rfc.to_rfc3339(), "2026-08-05T10:00:01+00:00");

        // SQLite's naive format parses to the same instant
        let sqlite = parse_timestamp("2026-08-05 10:00:01", "b1");
        assert_eq!(sqlite, rfc);

        // Garbage falls back to the epoch default rather than failing the row
        let garbage = parse_timestamp("yesterday", "b1");
        assert_eq!(garbage, chrono::DateTime::<chrono::Utc>::default());
    }

    #[test]
    fn test_row_to_response_preserves_fields() {
        let row = BookmarkRow {
            id: "8f7d3a84-7b62-4f2f-9f3f-2a1c5d9e0b11".to_string(),
            title: "Example: Google".to_string(),
            url: "https://example.com".to_string(),
            user_id: "user-a".to_string(),
            created_at: "2026-08-05T10:00:01.000000Z".to_string(),
        };

        let resp = row_to_response(row);
        assert_eq!(resp.id.to_string(), "8f7d3a84-7b62-4f2f-9f3f-2a1c5d9e0b11");
        assert_eq!(resp.title, "Example: Google");
        assert_eq!(resp.url, "https://example.com");
        assert_eq!(resp.user_id, "user-a");
    }
}
