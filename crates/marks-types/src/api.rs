use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Session --

/// Session claims minted by the external auth provider and consumed by
/// marks-api (REST middleware) and marks-web (rendered pages). Canonical
/// definition lives here in marks-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Stable unique identifier for the principal.
    pub email: String,
    pub exp: usize,
}

// -- Bookmarks --

/// Body of `POST /bookmarks`. Fields default to empty so an absent field is
/// reported as "Missing fields" (400) instead of a deserialization reject.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookmarkRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    /// Owner ids are provisioned by the auth collaborator, so they stay
    /// opaque strings rather than parsed UUIDs.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// One page of the caller's bookmarks plus the pagination summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPageResponse {
    pub data: Vec<BookmarkResponse>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}
