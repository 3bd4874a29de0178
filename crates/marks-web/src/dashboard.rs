use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use tracing::error;

use marks_api::AppState;
use marks_api::pagination::{self, DEFAULT_LIMIT, paginate};
use marks_api::session;
use marks_db::StoreError;
use marks_db::models::BookmarkRow;

use crate::render;

/// GET /dashboard?page= — the server-rendered bookmark list. Session and
/// owner failures render inline messages instead of bare status codes. The
/// page is recomputed per request, so a mutation is reflected by the very
/// next navigation.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(claims) = session::session_from_headers(&headers, &state.session_secret) else {
        return Html(render::message_page("Unauthorized"));
    };

    let page = pagination::page_param(query.get("page").map(String::as_str));
    let limit = DEFAULT_LIMIT;

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let email = claims.email.clone();

    let result = tokio::task::spawn_blocking(move || {
        let Some(user) = db.db.find_user_by_email(&email)? else {
            return Ok(None);
        };

        let total = db.db.count_bookmarks(&user.id)?;
        let window = paginate(total, page, limit);
        let rows = db.db.list_bookmarks(&user.id, window.skip, limit)?;

        Ok::<Option<(Vec<BookmarkRow>, i64)>, StoreError>(Some((rows, window.total_pages)))
    })
    .await;

    match result {
        Ok(Ok(Some((rows, total_pages)))) => Html(render::dashboard_page(&rows, page, total_pages)),
        Ok(Ok(None)) => Html(render::message_page("User not found")),
        Ok(Err(e)) => {
            error!("dashboard query failed: {}", e);
            Html(render::message_page("Something went wrong"))
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            Html(render::message_page("Something went wrong"))
        }
    }
}
