use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use marks_api::middleware::require_auth;
use marks_api::{AppState, AppStateInner, bookmarks};
use marks_web::{actions, assets, dashboard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marks=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let session_secret =
        std::env::var("MARKS_SESSION_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("MARKS_DB_PATH").unwrap_or_else(|_| "marks.db".into());
    let host = std::env::var("MARKS_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("MARKS_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = marks_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner { db, session_secret });

    // Programmatic surface — session middleware, JSON in/out
    let api_routes = Router::new()
        .route("/bookmarks", get(bookmarks::list_bookmarks))
        .route("/bookmarks", post(bookmarks::create_bookmark))
        .layer(middleware::from_fn(require_auth))
        .with_state(state.clone());

    // Rendered surface — handlers run their own session checks so auth
    // failures come back as inline pages rather than bare status codes
    let web_routes = Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/bookmarks", post(actions::create_bookmark))
        .route("/dashboard/bookmarks/update", post(actions::update_bookmark))
        .route("/dashboard/bookmarks/delete", post(actions::delete_bookmark))
        .route("/assets/bookmark-bus.js", get(assets::bus_script))
        .with_state(state);

    let app = Router::new()
        .merge(api_routes)
        .merge(web_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("marks server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
