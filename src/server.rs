use axum::Router;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::client::WikiClient;
use crate::config::ServeConfig;
use crate::lookup::{self, LookupRequest, LookupResponse};

#[derive(Clone)]
struct AppState {
    client: WikiClient,
}

#[derive(Debug, Deserialize)]
struct PersonQuery {
    name: String,
    normalized: Option<String>,
}

pub fn router(client: WikiClient) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/person", get(person_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { client })
}

pub async fn serve(config: ServeConfig) -> anyhow::Result<()> {
    let client = config.upstream.client()?;
    let app = router(client);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", config.addr))?;
    tracing::info!(
        addr = %config.addr,
        upstream = %config.upstream.url,
        timeout_secs = config.upstream.timeout.as_secs(),
        "listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn person_handler(State(state): State<AppState>, Query(q): Query<PersonQuery>) -> Response {
    let request = LookupRequest::from_query(q.name, q.normalized.as_deref());
    lookup::resolve(&state.client, &request).await.into_response()
}

impl IntoResponse for LookupResponse {
    fn into_response(self) -> Response {
        match self.json() {
            Some(json) => (self.status, Json(json)).into_response(),
            None => (self.status, self.body_text()).into_response(),
        }
    }
}
