use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::session;

/// Extract and verify the session token, injecting the claims for handlers
/// downstream. Tokens are minted by the external auth provider; this layer
/// only checks the signature.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let secret =
        std::env::var("MARKS_SESSION_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());

    let claims =
        session::session_from_headers(req.headers(), &secret).ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
