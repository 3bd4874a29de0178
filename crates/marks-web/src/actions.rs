use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use marks_api::AppState;
use marks_api::error::ApiError;
use marks_api::session;

fn default_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: String,
    #[serde(default = "default_page")]
    pub page: i64,
}

/// Where a successful mutation sends the browser: back to the dashboard page
/// the form came from, carrying the marker that makes the initiating tab
/// announce on the change notification bus.
fn after_mutation(page: i64) -> Redirect {
    Redirect::to(&format!("/dashboard?page={}&changed=1", page))
}

/// POST /dashboard/bookmarks — form-driven create. The form enforces
/// required fields client-side; empty fields are still rejected here.
pub async fn create_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CreateForm>,
) -> Result<Response, ApiError> {
    let claims = session::session_from_headers(&headers, &state.session_secret)
        .ok_or(ApiError::Unauthorized)?;

    if form.title.is_empty() || form.url.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let id = Uuid::new_v4().to_string();
    let stamp = marks_db::timestamp(&Utc::now());
    let db = state.clone();
    let email = claims.email;
    let title = form.title;
    let url = form.url;

    tokio::task::spawn_blocking(move || {
        let user = db
            .db
            .find_user_by_email(&email)?
            .ok_or(ApiError::UserNotFound)?;

        db.db.insert_bookmark(&id, &user.id, &title, &url, &stamp)?;

        Ok::<_, ApiError>(())
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })??;

    Ok(after_mutation(form.page).into_response())
}

/// POST /dashboard/bookmarks/update — form-driven edit. An id the caller
/// does not own matches zero rows; the redirect happens either way.
pub async fn update_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<UpdateForm>,
) -> Result<Response, ApiError> {
    let claims = session::session_from_headers(&headers, &state.session_secret)
        .ok_or(ApiError::Unauthorized)?;

    if form.title.is_empty() || form.url.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let db = state.clone();
    let email = claims.email;
    let id = form.id;
    let title = form.title;
    let url = form.url;

    tokio::task::spawn_blocking(move || {
        let user = db
            .db
            .find_user_by_email(&email)?
            .ok_or(ApiError::UserNotFound)?;

        db.db.update_owned(&user.id, &id, &title, &url)?;

        Ok::<_, ApiError>(())
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })??;

    Ok(after_mutation(form.page).into_response())
}

/// POST /dashboard/bookmarks/delete — same matching/no-op semantics as
/// update.
pub async fn delete_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DeleteForm>,
) -> Result<Response, ApiError> {
    let claims = session::session_from_headers(&headers, &state.session_secret)
        .ok_or(ApiError::Unauthorized)?;

    let db = state.clone();
    let email = claims.email;
    let id = form.id;

    tokio::task::spawn_blocking(move || {
        let user = db
            .db
            .find_user_by_email(&email)?
            .ok_or(ApiError::UserNotFound)?;

        db.db.delete_owned(&user.id, &id)?;

        Ok::<_, ApiError>(())
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })??;

    Ok(after_mutation(form.page).into_response())
}
