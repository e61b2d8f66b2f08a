//! Signed-cookie sessions.
//!
//! The cookie carries the logged-in user's id and username as JSON;
//! the signature comes from the jar's key, so a tampered cookie simply
//! fails to decode and the request falls back to 401.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "session";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: u32,
    pub username: String,
}

/// Adds the session cookie to the jar.
pub fn store(jar: SignedCookieJar, session: &Session) -> Result<SignedCookieJar, serde_json::Error> {
    let mut cookie = Cookie::new(SESSION_COOKIE, serde_json::to_string(session)?);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    Ok(jar.add(cookie))
}

/// Tells the client to drop the session cookie.
pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    jar.remove(cookie)
}

/// Reads the session back out of a verified jar.
pub fn load(jar: &SignedCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}
