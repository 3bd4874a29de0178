use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};

use marks_types::api::SessionClaims;

/// Name of the cookie carrying the provider-issued session token.
pub const SESSION_COOKIE: &str = "session";

/// Pull the session token from either the Authorization header (programmatic
/// callers) or the session cookie (browser navigation), then verify it.
/// Returns None when the token is absent, expired, or malformed. Issuance and
/// refresh belong to the external auth provider; this side only decodes.
pub fn session_from_headers(headers: &HeaderMap, secret: &str) -> Option<SessionClaims> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let token = match bearer {
        Some(t) => t,
        None => CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)?
            .value()
            .to_string(),
    };

    decode_session(&token, secret)
}

pub fn decode_session(token: &str, secret: &str) -> Option<SessionClaims> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}
