//! HTTP surface: binds the listener and answers `GET /` with the gate
//! decision for the caller's transport-layer source address.

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use hostgate_core::{Classifier, ReverseResolver};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::resolver::SystemResolver;

/// Shared request state: the classifier, built once at startup.
pub struct GateState<R> {
    classifier: Classifier<R>,
}

impl<R> GateState<R> {
    /// Wrap a classifier for use as router state.
    pub const fn new(classifier: Classifier<R>) -> Self {
        Self { classifier }
    }
}

/// Build the router. Exactly one route; everything else 404s.
pub fn app<R>(state: Arc<GateState<R>>) -> Router
where
    R: ReverseResolver + 'static,
{
    Router::new().route("/", get(index)).with_state(state)
}

/// Gate handler.
///
/// Always answers 200 or 403; per-request failures fold into the denial
/// inside the classifier and never surface as a 500.
async fn index<R>(
    State(state): State<Arc<GateState<R>>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> impl IntoResponse
where
    R: ReverseResolver + 'static,
{
    let decision = state.classifier.classify(peer.ip()).await;
    info!(
        source = %decision.source,
        resolved = %decision.resolved,
        outcome = %decision.outcome,
        "classified request origin"
    );

    if decision.outcome.is_allowed() {
        (StatusCode::OK, String::from("Access granted"))
    } else {
        (
            StatusCode::FORBIDDEN,
            format!("Access denied: {} is not a trusted origin", decision.resolved),
        )
    }
}

/// Start the gate with the given configuration and run until shutdown.
pub async fn run(config: &ServerConfig) -> crate::Result<()> {
    let rule = config.validate()?;
    let resolver = SystemResolver::new(config.resolve_timeout());
    let state = Arc::new(GateState::new(Classifier::new(rule, resolver)));

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|e| crate::SrvError::Server(format!("bind {}: {e}", config.listen)))?;

    info!(
        addr = %config.listen,
        domain = %config.rule.domain,
        mode = %config.rule.mode,
        "hostgate listening"
    );

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| crate::SrvError::Server(format!("server error: {e}")))?;

    Ok(())
}
