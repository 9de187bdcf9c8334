use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::benchmark::domain::{
    AccidentCover, Category, CategoryResult, Color, DentalCover, HospitalizationCover,
    InsuranceAnalysis, NaturalMedicineCover, OutpatientCover, OutpatientService, PolicyInput,
    ServiceLevel, TravelCover, WardType,
};
use crate::workflows::benchmark::evaluation::BenchmarkEngine;
use crate::workflows::benchmark::router::benchmark_router;

pub(super) fn engine() -> BenchmarkEngine {
    BenchmarkEngine::with_defaults()
}

/// Pinned evaluation date so the dental age rule is deterministic in tests.
pub(super) fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn service_grid(level: ServiceLevel) -> BTreeMap<OutpatientService, ServiceLevel> {
    OutpatientService::ordered()
        .into_iter()
        .map(|service| (service, level))
        .collect()
}

/// A policy that rates Green in every category and Gold overall: the insured
/// is a child, but the orthodontics allowance clears the protection floor.
pub(super) fn gold_policy() -> PolicyInput {
    PolicyInput {
        natural_medicine: NaturalMedicineCover {
            coverage_percent: Some(85.0),
            per_session_amount: None,
            session_cap: 25,
            deductible: 0.0,
        },
        hospitalization: HospitalizationCover {
            ward_type: WardType::Private,
            coverage: 0.0,
            deductible: 0.0,
            insurer: None,
            voluntary_deductible: false,
        },
        travel: TravelCover {
            emergency_treatment: true,
            repatriation: true,
            cancellation: true,
        },
        outpatient: OutpatientCover {
            services: service_grid(ServiceLevel::Unlimited),
            cost_share_percent: 5.0,
        },
        accident: AccidentCover {
            private_clinic: true,
            supplementary_benefits: true,
            death_disability_capital: true,
        },
        dental: DentalCover {
            coverage_percent: 80.0,
            cap: 3500.0,
            deductible: 0.0,
            orthodontics_amount: 12_000.0,
        },
        birth_date: "2016-12-05".to_string(),
    }
}

/// Same policy expressed as the raw extraction payload the HTTP surface
/// accepts.
pub(super) fn gold_extraction_payload() -> Value {
    json!({
        "medecine_naturelle": {"etendue": 85, "plafond": 25, "franchise": 0},
        "hospitalisation": {"type": "privé", "etendue": 0, "franchise": 0},
        "voyage": {"traitement_urgence": true, "rapatriement": true, "annulation": true},
        "ambulatoire": {
            "prestations": {
                "lunettes": "illimité",
                "psychotherapie": "illimité",
                "medicaments_hors_liste": "illimité",
                "transport": "illimité",
                "sauvetage": "illimité"
            },
            "participation": 5
        },
        "accident": {
            "clinique_privee": true,
            "prestations_supplementaires": true,
            "capital_deces_invalidite": true
        },
        "dentaire": {"etendue": 80, "plafond": 3500, "franchise": 0, "orthodontie": 12000},
        "birth_date": "2016-12-05"
    })
}

pub(super) fn category_in(analysis: &InsuranceAnalysis, category: Category) -> &CategoryResult {
    analysis
        .categories
        .iter()
        .find(|result| result.category == category)
        .expect("category present in analysis")
}

/// Bare result for aggregation tests, which only look at colors.
pub(super) fn colored(category: Category, color: Color) -> CategoryResult {
    CategoryResult {
        category,
        color,
        details: BTreeMap::new(),
    }
}

pub(super) fn benchmark_test_router() -> axum::Router {
    benchmark_router(Arc::new(engine()))
}

pub(super) async fn post_json(router: axum::Router, uri: &str, payload: &Value) -> Response {
    router
        .oneshot(
            axum::http::Request::post(uri)
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(payload).expect("serialize payload"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router is infallible")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
