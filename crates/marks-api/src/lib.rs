pub mod bookmarks;
pub mod error;
pub mod middleware;
pub mod pagination;
pub mod session;

use std::sync::Arc;

use marks_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub session_secret: String,
}
