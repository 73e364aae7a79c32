//! Opaque, tamper-evident session tokens.
//!
//! A token is `<uuid>.<mac>` where the MAC is a blake3 keyed hash of the
//! uuid under the derived cookie key. The uuid is the session id handed to
//! the store; the MAC only proves we minted it. Verification failure means
//! the caller gets a fresh session, never an error.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "pagetalk_session";

/// Mint a fresh session id and its signed token.
pub fn issue(key: &[u8; 32]) -> (String, String) {
    let session_id = Uuid::new_v4().to_string();
    let mac = blake3::keyed_hash(key, session_id.as_bytes());
    let token = format!("{session_id}.{}", mac.to_hex());
    (session_id, token)
}

/// Extract the session id from a token, if authentic.
pub fn verify(key: &[u8; 32], token: &str) -> Option<String> {
    let (session_id, mac_hex) = token.split_once('.')?;
    let presented = blake3::Hash::from_hex(mac_hex).ok()?;
    let expected = blake3::keyed_hash(key, session_id.as_bytes());
    // blake3::Hash equality is constant-time.
    (presented == expected).then(|| session_id.to_string())
}

/// Resolve the caller's session from the cookie jar, minting a new one when
/// the cookie is absent or fails verification. Returns the session id and
/// the jar to send back (unchanged when the existing cookie was valid).
pub fn resolve(key: &[u8; 32], jar: CookieJar) -> (String, CookieJar) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(session_id) = verify(key, cookie.value()) {
            return (session_id, jar);
        }
        tracing::debug!("session.cookie.rejected");
    }

    let (session_id, token) = issue(key);
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (session_id, jar.add(cookie))
}

/// Peek at the caller's session without minting one. `None` means the
/// caller has never scraped (or presented a forged cookie).
pub fn peek(key: &[u8; 32], jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| verify(key, cookie.value()))
}
