use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use gammascript::catalog::{variables, Variable};
use gammascript::config::Limits;
use gammascript::model::Strategy;
use gammascript::transcode::{parse_raw, to_compact, to_raw, to_readable, ParsedRule};
use gammascript::validator::{is_strategy_valid, submission, validate, Issue};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;

pub struct AppState {
    pub limits: Limits,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/variables", get(list_variables))
        .route("/strategy/preview", post(preview))
        .route("/strategy/parse", post(parse))
        .route("/strategy/submission", post(submit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": env!("GIT_HASH"),
        "git_branch": env!("GIT_BRANCH"),
        "build_time": env!("BUILD_TIME"),
        "rustc": env!("RUSTC_VERSION"),
        "profile": env!("PROFILE"),
    }))
}

async fn list_variables() -> Json<&'static [Variable]> {
    Json(variables())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub readable: String,
    pub raw: String,
    pub compact: String,
    pub valid: bool,
    pub issues: Vec<String>,
    pub details: Vec<Issue>,
}

async fn preview(Json(strategy): Json<Strategy>) -> Result<Json<PreviewResponse>, ApiError> {
    let details = validate(&strategy);
    Ok(Json(PreviewResponse {
        readable: to_readable(&strategy),
        raw: to_raw(&strategy)?,
        compact: to_compact(&strategy)?,
        valid: is_strategy_valid(&strategy),
        issues: details.iter().map(ToString::to_string).collect(),
        details,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub raw: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResponse {
    pub rules: Vec<ParsedRule>,
    /// Editable strategy, when every entry has the builder's shape
    pub strategy: Option<Strategy>,
    /// Why the text stays opaque, when `strategy` is null
    pub opaque_reason: Option<String>,
}

async fn parse(Json(request): Json<ParseRequest>) -> Result<Json<ParseResponse>, ApiError> {
    let rules = parse_raw(&request.raw)?;

    let (strategy, opaque_reason) = match Strategy::from_raw(&request.raw) {
        Ok(strategy) => (Some(strategy), None),
        Err(e) => {
            tracing::debug!("keeping cloned strategy as opaque text: {}", e);
            (None, Some(e.to_string()))
        }
    };

    Ok(Json(ParseResponse {
        rules,
        strategy,
        opaque_reason,
    }))
}

async fn submit(
    State(state): State<Arc<AppState>>,
    Json(strategy): Json<Strategy>,
) -> Result<Json<Value>, ApiError> {
    let raw = submission(&strategy, &state.limits)?;
    tracing::info!(rules = strategy.rules().len(), len = raw.len(), "strategy ready for submission");
    Ok(Json(json!({ "strategy": raw })))
}
