//! Fallback HTTP server exposing a backend over the dashboard routes.
//!
//! The server runs over any [`Backend`]: normally an [`InMemoryStore`]
//! (optionally seeded with demo data), or a [`DashboardClient`] pointed at
//! an upstream service, in which case every route is proxied.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/merchant/list`, `/product/list` | 200 |
//! | POST | `/merchant/create`, `/product/create` | 201 |
//! | GET | `/merchant/read/{id}`, `/product/read/{id}` | 200 |
//! | PUT | `/merchant/update/{id}`, `/product/update/{id}` | 200 |
//! | DELETE | `/merchant/delete/{id}`, `/product/delete/{id}` | 200 |
//! | GET | `/health` | 200 |
//!
//! Failures answer with `{"error": "<message>"}`. In proxy mode an
//! upstream error body is forwarded as received.

use alloc::sync::Arc;
use core::net::{Ipv4Addr, SocketAddr};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::{Backend, InMemoryStore};
use crate::client::DashboardClient;
use crate::error::{DashboardError, Result};
use crate::models::{
    Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, Product, ProductId,
    ProductPatch,
};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Enable permissive CORS.
    pub cors: bool,
    /// Seed the in-memory store with the demo catalogue.
    pub seed_demo_data: bool,
    /// Proxy every route to this base URL instead of serving from memory.
    pub upstream: Option<String>,
}

impl Default for ServerConfig {
    #[inline]
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            cors: true,
            seed_demo_data: false,
            upstream: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    /// Listen address override.
    addr: Option<SocketAddr>,
    /// CORS override.
    cors: Option<bool>,
    /// Demo seeding flag.
    seed_demo_data: bool,
    /// Upstream base URL.
    upstream: Option<String>,
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    #[inline]
    #[must_use]
    pub const fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Sets whether CORS is enabled.
    #[inline]
    #[must_use]
    pub const fn cors(mut self, enabled: bool) -> Self {
        self.cors = Some(enabled);
        self
    }

    /// Seeds the in-memory store with demo merchants and products.
    #[inline]
    #[must_use]
    pub const fn seed_demo_data(mut self, enabled: bool) -> Self {
        self.seed_demo_data = enabled;
        self
    }

    /// Proxies to an upstream backend at `url`.
    #[inline]
    #[must_use]
    pub fn upstream<T: Into<String>>(mut self, url: T) -> Self {
        self.upstream = Some(url.into());
        self
    }

    /// Builds the server config.
    #[inline]
    #[must_use]
    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            addr: self.addr.unwrap_or(defaults.addr),
            cors: self.cors.unwrap_or(defaults.cors),
            seed_demo_data: self.seed_demo_data,
            upstream: self.upstream,
        }
    }
}

/// Error response: a status code and an `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    /// Response status.
    status: StatusCode,
    /// Message placed in the body.
    message: String,
    /// Upstream JSON error body, sent instead of the wrapped message.
    upstream: Option<serde_json::Value>,
}

impl ApiError {
    /// Response status.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message placed in the body.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Maps a backend error to the status code the routes answer with.
#[must_use]
pub fn status_for(err: &DashboardError) -> StatusCode {
    match *err {
        DashboardError::MissingFields(_)
        | DashboardError::InvalidIdFormat(_)
        | DashboardError::UnknownMerchant(_)
        | DashboardError::InvalidField { .. } => StatusCode::BAD_REQUEST,
        DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
        DashboardError::DuplicateId(_) => StatusCode::CONFLICT,
        // Request bodies are rejected by the extractor, so a serde failure
        // here means the upstream answered with something unreadable.
        DashboardError::Http(_) | DashboardError::Serialization(_) => {
            StatusCode::BAD_GATEWAY
        }
        DashboardError::Api { status, .. } => {
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        DashboardError::InvalidBaseUrl(_)
        | DashboardError::Storage(_)
        | DashboardError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DashboardError> for ApiError {
    #[inline]
    fn from(err: DashboardError) -> Self {
        let status = status_for(&err);
        if let DashboardError::Api { message, .. } = err {
            return Self {
                status,
                upstream: serde_json::from_str(&message).ok(),
                message,
            };
        }
        Self {
            status,
            message: err.to_string(),
            upstream: None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[inline]
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
            upstream: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "request rejected");
        }
        let body = self
            .upstream
            .unwrap_or_else(|| json!({ "error": self.message }));
        (self.status, Json(body)).into_response()
    }
}

/// Handler result.
type ApiResult<T> = core::result::Result<T, ApiError>;

/// Builds the router over `backend`.
#[must_use]
pub fn router<B: Backend + 'static>(backend: Arc<B>, cors: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/merchant/list", get(list_merchants::<B>))
        .route("/merchant/create", post(create_merchant::<B>))
        .route("/merchant/read/{id}", get(read_merchant::<B>))
        .route("/merchant/update/{id}", put(update_merchant::<B>))
        .route("/merchant/delete/{id}", delete(delete_merchant::<B>))
        .route("/product/list", get(list_products::<B>))
        .route("/product/create", post(create_product::<B>))
        .route("/product/read/{id}", get(read_product::<B>))
        .route("/product/update/{id}", put(update_product::<B>))
        .route("/product/delete/{id}", delete(delete_product::<B>))
        .with_state(backend)
        .layer(TraceLayer::new_for_http());

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

/// Runs the server described by `config` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidBaseUrl`] if the upstream URL is
/// unusable, or [`DashboardError::Server`] if binding or serving fails.
pub async fn serve(config: ServerConfig) -> Result<()> {
    match config.upstream.as_deref() {
        Some(upstream) => {
            tracing::info!(upstream = %upstream, "proxying to upstream backend");
            let client = DashboardClient::builder().base_url(upstream).build()?;
            run(&config, client).await
        }
        None if config.seed_demo_data => {
            tracing::info!("serving in-memory store with demo data");
            run(&config, InMemoryStore::with_demo_data()).await
        }
        None => {
            tracing::info!("serving empty in-memory store");
            run(&config, InMemoryStore::new()).await
        }
    }
}

/// Binds the listener and serves `backend` with graceful shutdown.
async fn run<B: Backend + 'static>(config: &ServerConfig, backend: B) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "dashboard server listening");

    axum::serve(listener, router(Arc::new(backend), config.cors))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            core::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                let _signal = stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                core::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = core::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down gracefully"),
        () = terminate => tracing::info!("received SIGTERM, shutting down gracefully"),
    }
}

// ── Handlers ────────────────────────────────────────────────────────────

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /merchant/list`.
async fn list_merchants<B: Backend>(State(backend): State<Arc<B>>) -> ApiResult<Json<Vec<Merchant>>> {
    Ok(Json(backend.list_merchants().await?))
}

/// `POST /merchant/create`.
async fn create_merchant<B: Backend>(
    State(backend): State<Arc<B>>,
    payload: core::result::Result<Json<NewMerchant>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Merchant>)> {
    let Json(input) = payload?;
    let merchant = backend.create_merchant(input).await?;
    tracing::info!(id = %merchant.id, "merchant created");
    Ok((StatusCode::CREATED, Json(merchant)))
}

/// `GET /merchant/read/{id}`.
async fn read_merchant<B: Backend>(
    State(backend): State<Arc<B>>,
    Path(id): Path<MerchantId>,
) -> ApiResult<Json<Merchant>> {
    Ok(Json(backend.read_merchant(&id).await?))
}

/// `PUT /merchant/update/{id}`.
async fn update_merchant<B: Backend>(
    State(backend): State<Arc<B>>,
    Path(id): Path<MerchantId>,
    payload: core::result::Result<Json<MerchantPatch>, JsonRejection>,
) -> ApiResult<Json<Merchant>> {
    let Json(patch) = payload?;
    Ok(Json(backend.update_merchant(&id, patch).await?))
}

/// `DELETE /merchant/delete/{id}`.
async fn delete_merchant<B: Backend>(
    State(backend): State<Arc<B>>,
    Path(id): Path<MerchantId>,
) -> ApiResult<Json<serde_json::Value>> {
    backend.delete_merchant(&id).await?;
    tracing::info!(id = %id, "merchant deleted");
    Ok(Json(json!({ "deleted": id })))
}

/// `GET /product/list`.
async fn list_products<B: Backend>(State(backend): State<Arc<B>>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(backend.list_products().await?))
}

/// `POST /product/create`.
async fn create_product<B: Backend>(
    State(backend): State<Arc<B>>,
    payload: core::result::Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = payload?;
    let product = backend.create_product(input).await?;
    tracing::info!(id = %product.id, merchant_id = %product.merchant_id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /product/read/{id}`.
async fn read_product<B: Backend>(
    State(backend): State<Arc<B>>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    Ok(Json(backend.read_product(&id).await?))
}

/// `PUT /product/update/{id}`.
async fn update_product<B: Backend>(
    State(backend): State<Arc<B>>,
    Path(id): Path<ProductId>,
    payload: core::result::Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Json(patch) = payload?;
    Ok(Json(backend.update_product(&id, patch).await?))
}

/// `DELETE /product/delete/{id}`.
async fn delete_product<B: Backend>(
    State(backend): State<Arc<B>>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<serde_json::Value>> {
    backend.delete_product(&id).await?;
    tracing::info!(id = %id, "product deleted");
    Ok(Json(json!({ "deleted": id })))
}
