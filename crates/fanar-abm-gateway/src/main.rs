//! Fanar ABM Gateway — chat relay, policy simulation API, and the static chat UI.
//! `POST /api/chat`, `POST /api/abm`, everything else is served from the public directory.

use axum::{
    extract::Request,
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fanar_abm_core::{AgentRegistry, ChatRelay, RelayConfig, RelayMode, Simulator};
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, set_header::SetResponseHeaderLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod extract;
mod handlers;

use config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<Simulator>,
    pub relay: Arc<ChatRelay>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[fanar-abm-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::load()?;

    let registry = match config.agents_path.as_deref() {
        Some(path) => {
            tracing::info!("Loading agent table from {}", path);
            AgentRegistry::from_path(path)?
        }
        None => AgentRegistry::builtin(),
    };
    tracing::info!(agents = registry.len(), groups = ?registry.groups(), "agent registry ready");

    let relay = ChatRelay::new(RelayConfig::from_env());
    match relay.mode() {
        RelayMode::Unconfigured => tracing::warn!(
            "Chat relay unconfigured: set FANAR_API_URL, or FANAR_MOCK=1 for offline replies"
        ),
        mode => tracing::info!(%mode, "chat relay ready"),
    }

    let state = AppState {
        simulator: Arc::new(Simulator::new(Arc::new(registry))),
        relay: Arc::new(relay),
    };
    let app = build_app(state, Path::new(&config.public_dir));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_app(state: AppState, public_dir: &Path) -> Router {
    let static_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(handlers::chat::chat).fallback(not_found))
        .route("/api/abm", post(handlers::abm::abm).fallback(not_found))
        .fallback_service(static_files)
        .with_state(state);

    with_boundary(app)
}

/// Request logging, open CORS on every response, preflight short-circuit, panic → 500 JSON.
fn with_boundary(app: Router) -> Router {
    app.layer(middleware::from_fn(preflight))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(middleware::from_fn(log_request))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "request");
    response
}

async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "server error" })),
    )
        .into_response()
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

async fn health() -> &'static str {
    "OK"
}
