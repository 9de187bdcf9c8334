//! Shapes the loosely-typed extraction payload into the engine's input
//! contract. The upstream document-extraction step emits French section and
//! field names with values that may arrive as numbers, decorated strings
//! ("85%", "CHF 300"), or free-text affirmations ("inclus dans la couverture");
//! everything unrecognized falls back to the contract's documented default so
//! a noisy extraction still yields a (conservative) benchmark.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::domain::{
    AccidentCover, DentalCover, HospitalizationCover, NaturalMedicineCover, OutpatientCover,
    OutpatientService, PolicyInput, ServiceLevel, TravelCover, WardType,
};

const AFFIRMATIVE_KEYWORDS: [&str; 9] = [
    "true",
    "oui",
    "yes",
    "1",
    "vrai",
    "inclu",
    "couv",
    "fourni",
    "disponible",
];

/// Build a [`PolicyInput`] from a raw extraction payload.
pub fn policy_from_extraction(raw: &Value) -> PolicyInput {
    let natural = raw.get("medecine_naturelle");
    let hospital = raw.get("hospitalisation");
    let travel = raw.get("voyage");
    let outpatient = raw.get("ambulatoire");
    let accident = raw.get("accident");
    let dental = raw.get("dentaire");

    let policy = PolicyInput {
        natural_medicine: NaturalMedicineCover {
            coverage_percent: field(natural, "etendue").map(number_from),
            per_session_amount: field(natural, "montant_par_seance").map(number_from),
            session_cap: number_or_zero(natural, "plafond").max(0.0) as u32,
            deductible: number_or_zero(natural, "franchise"),
        },
        hospitalization: HospitalizationCover {
            ward_type: field(hospital, "type").map(ward_type_from).unwrap_or_default(),
            coverage: number_or_zero(hospital, "etendue"),
            deductible: number_or_zero(hospital, "franchise"),
            insurer: field(hospital, "compagnie").and_then(text_from),
            voluntary_deductible: bool_or_false(hospital, "franchise_volontaire"),
        },
        travel: TravelCover {
            emergency_treatment: bool_or_false(travel, "traitement_urgence"),
            repatriation: bool_or_false(travel, "rapatriement"),
            cancellation: bool_or_false(travel, "annulation"),
        },
        outpatient: OutpatientCover {
            services: services_from(field(outpatient, "prestations")),
            cost_share_percent: number_or_zero(outpatient, "participation"),
        },
        accident: AccidentCover {
            private_clinic: bool_or_false(accident, "clinique_privee"),
            supplementary_benefits: bool_or_false(accident, "prestations_supplementaires"),
            death_disability_capital: bool_or_false(accident, "capital_deces_invalidite"),
        },
        dental: DentalCover {
            coverage_percent: number_or_zero(dental, "etendue"),
            cap: number_or_zero(dental, "plafond"),
            deductible: number_or_zero(dental, "franchise"),
            orthodontics_amount: number_or_zero(dental, "orthodontie"),
        },
        birth_date: raw
            .get("birth_date")
            .and_then(text_from)
            .unwrap_or_else(|| "2000-01-01".to_string()),
    };

    debug!(?policy, "extraction payload normalized");
    policy
}

fn field<'a>(section: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    section.and_then(|value| value.get(key))
}

fn number_or_zero(section: Option<&Value>, key: &str) -> f64 {
    field(section, key).map(number_from).unwrap_or(0.0)
}

fn bool_or_false(section: Option<&Value>, key: &str) -> bool {
    field(section, key).map(bool_from).unwrap_or(false)
}

/// Best-effort numeric coercion. Strings are stripped of currency and percent
/// decoration before parsing; the two textual amounts the extractor is known
/// to emit are recognized; anything else counts as 0.
fn number_from(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::String(text) => {
            let digits: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if let Ok(parsed) = digits.parse::<f64>() {
                return parsed;
            }

            let lowered = text.to_lowercase();
            if lowered.contains("cent") || lowered.contains("hundred") {
                100.0
            } else if lowered.contains("cinquante") || lowered.contains("fifty") {
                50.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Accepts booleans, positive numbers, and the extractor's affirmative
/// vocabulary in French and English.
fn bool_from(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n > 0.0).unwrap_or(false),
        Value::String(text) => {
            let lowered = text.trim().to_lowercase();
            AFFIRMATIVE_KEYWORDS
                .iter()
                .any(|keyword| lowered.contains(keyword))
        }
        _ => false,
    }
}

fn text_from(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

// "semi" is checked before "priv" since the French semi-private label
// contains the private one.
fn ward_type_from(value: &Value) -> WardType {
    let Some(text) = value.as_str() else {
        return WardType::default();
    };
    let lowered = text.to_lowercase();
    if lowered.contains("semi") {
        WardType::SemiPrivate
    } else if lowered.contains("priv") {
        WardType::Private
    } else {
        WardType::Common
    }
}

// Same containment ordering concern: the French unlimited label contains the
// limited one.
fn service_level_from(value: &Value) -> ServiceLevel {
    let Some(text) = value.as_str() else {
        return ServiceLevel::default();
    };
    let lowered = text.to_lowercase();
    if lowered.contains("illimit") || lowered.contains("unlimit") {
        ServiceLevel::Unlimited
    } else if lowered.contains("limit") {
        ServiceLevel::Limited
    } else {
        ServiceLevel::Absent
    }
}

fn services_from(grid: Option<&Value>) -> BTreeMap<OutpatientService, ServiceLevel> {
    let mut services = BTreeMap::new();
    for service in OutpatientService::ordered() {
        if let Some(level) = field(grid, extraction_key(service)) {
            services.insert(service, service_level_from(level));
        }
    }
    services
}

/// Field name each service carries in the extraction payload.
const fn extraction_key(service: OutpatientService) -> &'static str {
    match service {
        OutpatientService::Glasses => "lunettes",
        OutpatientService::Psychotherapy => "psychotherapie",
        OutpatientService::OffListMedication => "medicaments_hors_liste",
        OutpatientService::Transport => "transport",
        OutpatientService::Rescue => "sauvetage",
    }
}
