//! Account endpoints: register, login, logout and the data reset.

use api_types::user::{Credentials, RegisterNew, ResetDone, SessionUser};
use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{ServerError, server::ServerState, session};

fn view(user: &engine::User) -> SessionUser {
    SessionUser {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        risk_profile: user.risk_profile,
    }
}

fn logged_in(jar: SignedCookieJar, user: &engine::User) -> Result<SignedCookieJar, ServerError> {
    let session = session::Session {
        user_id: user.id,
        username: user.username.clone(),
    };
    session::store(jar, &session).map_err(|err| ServerError::Engine(err.into()))
}

/// Creates an account and logs it in right away.
pub async fn register(
    State(state): State<ServerState>,
    jar: SignedCookieJar,
    Json(payload): Json<RegisterNew>,
) -> Result<(StatusCode, SignedCookieJar, Json<SessionUser>), ServerError> {
    let user = state
        .engine
        .register(&payload.username, &payload.password, &payload.email)?;
    let jar = logged_in(jar, &user)?;
    Ok((StatusCode::CREATED, jar, Json(view(&user))))
}

pub async fn login(
    State(state): State<ServerState>,
    jar: SignedCookieJar,
    Json(payload): Json<Credentials>,
) -> Result<(SignedCookieJar, Json<SessionUser>), ServerError> {
    let user = state
        .engine
        .authenticate(&payload.username, &payload.password)?;
    let jar = logged_in(jar, &user)?;
    tracing::info!("user {} logged in", user.username);
    Ok((jar, Json(view(&user))))
}

pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, StatusCode) {
    (session::clear(jar), StatusCode::NO_CONTENT)
}

/// Regenerates the demo dataset, keeping only the caller's identity,
/// and ends the session.
pub async fn reset(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Json<ResetDone>), ServerError> {
    state.engine.reset(user.id)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    Ok((session::clear(jar), Json(ResetDone { timestamp })))
}
