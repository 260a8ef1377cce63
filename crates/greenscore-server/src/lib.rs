//! GreenScore Web Server
//!
//! Axum-based REST API over the GreenScore pipeline. The server holds one
//! classified transaction source and one classifier; every score, insight
//! and incentive response is derived from them on request.
//!
//! Security features:
//! - Restrictive CORS policy (explicit origin list)
//! - `X-Content-Type-Options: nosniff` and `X-Frame-Options: DENY`
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use greenscore_core::{Classifier, TransactionSource};

mod handlers;

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Origins allowed by CORS; empty means same-origin only
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub source: Box<dyn TransactionSource>,
    pub classifier: Classifier,
    pub config: ServerConfig,
}

/// Create the application router
pub fn create_router(
    classifier: Classifier,
    source: impl TransactionSource + 'static,
    config: ServerConfig,
) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState {
        source: Box::new(source),
        classifier,
        config,
    });

    let api_routes = Router::new()
        .route("/status", get(handlers::get_status))
        // Scoring
        .route("/score", get(handlers::get_score).post(handlers::score_transactions))
        .route("/esg-breakdown", get(handlers::get_esg_breakdown))
        .route("/categories", get(handlers::get_categories))
        // Transactions
        .route("/transactions", get(handlers::list_transactions))
        .route("/transactions/:id", get(handlers::get_transaction))
        .route("/classify", post(handlers::classify))
        // Insights
        .route("/insights", get(handlers::get_insights))
        // Incentives
        .route("/incentives", get(handlers::get_incentives))
        .route("/incentives/comparison", get(handlers::get_tier_comparison))
        .route("/tiers/:score", get(handlers::get_tier));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    classifier: Classifier,
    source: impl TransactionSource + 'static,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let transactions = source.all().len();
    let rules = classifier.rules().len();

    let app = create_router(classifier, source, config);
    let addr = format!("{}:{}", host, port);

    info!(transactions, rules, "Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Malformed bodies (unknown category, bad date, missing field)
        if let Some(rejection) = err.downcast_ref::<JsonRejection>() {
            return Self::bad_request(&rejection.body_text());
        }

        // Caller mistakes are reported as-is; anything else stays in the log
        match err.downcast_ref::<greenscore_core::Error>() {
            Some(greenscore_core::Error::InvalidInput(msg)) => Self::bad_request(msg),
            Some(greenscore_core::Error::NotFound(msg)) => Self::not_found(msg),
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(err),
            },
        }
    }
}
