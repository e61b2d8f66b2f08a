use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use sha2::{Digest, Sha256};

use std::sync::Arc;

use crate::{export, goals, investments, reports, session, transactions, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub key: Key,
}

// Lets SignedCookieJar pull its key straight out of the state.
impl FromRef<ServerState> for Key {
    fn from_ref(state: &ServerState) -> Self {
        state.key.clone()
    }
}

/// Derives the cookie signing key from the configured secret.
///
/// The secret is hashed first, so even a short secret yields enough
/// key material for [`Key::derive_from`].
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha256::digest(secret.as_bytes());
    Key::derive_from(digest.as_slice())
}

async fn auth(
    State(state): State<ServerState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(session) = session::load(&jar) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    // A valid cookie can still outlive its user (store reset).
    let user = state
        .engine
        .user(session.user_id)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn app(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/summary", get(reports::summary))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/investments",
            get(investments::portfolio).post(investments::create),
        )
        .route("/investments/report", get(investments::report))
        .route("/goals", get(goals::list).post(goals::create))
        .route("/goals/{id}", patch(goals::update).delete(goals::remove))
        .route("/goals/{id}/add", post(goals::deposit))
        .route("/reports", get(reports::full))
        .route("/export", get(export::overview))
        .route("/export/csv", get(export::csv))
        .route("/export/json", get(export::json))
        .route("/reset", post(user::reset))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
        .route("/logout", post(user::logout))
        .merge(protected)
        .with_state(state)
}

pub async fn run(engine: Engine, key: Key) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:5000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, key, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    key: Key,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        key,
    };

    axum::serve(listener, app(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    key: Key,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, key, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
