use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::domain::{Category, CategoryResult, Color, InsuranceAnalysis, Tier};
use super::evaluation::BenchmarkEngine;
use super::normalizer;

/// Router builder exposing the benchmark workflow over HTTP.
pub fn benchmark_router(engine: Arc<BenchmarkEngine>) -> Router {
    Router::new()
        .route("/api/v1/coverage/analyze", post(analyze_handler))
        .route("/api/v1/coverage/rectify", post(rectify_handler))
        .with_state(engine)
}

/// Serialized benchmark outcome with display labels for the presentation
/// layers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub overall_tier: Tier,
    pub tier_label: &'static str,
    pub categories: Vec<CategoryResultView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResultView {
    pub category: Category,
    pub category_label: &'static str,
    pub color: Color,
    pub color_label: &'static str,
    pub details: BTreeMap<String, Value>,
}

impl From<&InsuranceAnalysis> for AnalysisView {
    fn from(analysis: &InsuranceAnalysis) -> Self {
        Self {
            overall_tier: analysis.overall_tier,
            tier_label: analysis.overall_tier.label(),
            categories: analysis
                .categories
                .iter()
                .map(CategoryResultView::from)
                .collect(),
        }
    }
}

impl From<&CategoryResult> for CategoryResultView {
    fn from(result: &CategoryResult) -> Self {
        Self {
            category: result.category,
            category_label: result.category.label(),
            color: result.color,
            color_label: result.color.label(),
            details: result.details.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RectifyRequest {
    pub(crate) policy: Option<Value>,
    #[serde(default)]
    pub(crate) exclusions: Vec<String>,
}

fn missing_policy_response(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn has_policy_data(raw: &Value) -> bool {
    raw.as_object().is_some_and(|map| !map.is_empty())
}

pub(crate) async fn analyze_handler(
    State(engine): State<Arc<BenchmarkEngine>>,
    Json(payload): Json<Value>,
) -> Response {
    if !has_policy_data(&payload) {
        return missing_policy_response("no policy data provided");
    }

    let policy = normalizer::policy_from_extraction(&payload);
    let analysis = engine.evaluate(&policy);
    (StatusCode::OK, Json(AnalysisView::from(&analysis))).into_response()
}

pub(crate) async fn rectify_handler(
    State(engine): State<Arc<BenchmarkEngine>>,
    Json(payload): Json<RectifyRequest>,
) -> Response {
    let Some(raw_policy) = payload.policy.as_ref().filter(|raw| has_policy_data(raw)) else {
        return missing_policy_response("missing policy data for rectification");
    };

    let policy = normalizer::policy_from_extraction(raw_policy);
    let analysis = engine.evaluate(&policy);

    let mut exclusions = BTreeSet::new();
    for name in &payload.exclusions {
        match Category::parse(name) {
            Some(category) => {
                exclusions.insert(category);
            }
            None => warn!(category = %name, "ignoring unknown exclusion category"),
        }
    }

    match engine.rectify(&analysis.categories, &exclusions) {
        Ok(rectified) => (StatusCode::OK, Json(AnalysisView::from(&rectified))).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
