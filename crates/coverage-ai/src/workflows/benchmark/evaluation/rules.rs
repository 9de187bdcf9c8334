use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::super::domain::{
    AccidentCover, Category, CategoryResult, Color, DentalCover, HospitalizationCover,
    NaturalMedicineCover, OutpatientCover, OutpatientService, ServiceLevel, TravelCover, WardType,
};
use super::config::EvaluationConfig;

fn facts<const N: usize>(pairs: [(&str, Value); N]) -> BTreeMap<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn assess_natural_medicine(
    cover: &NaturalMedicineCover,
    config: &EvaluationConfig,
) -> CategoryResult {
    // A rider quoted as CHF-per-session is converted to percent against the
    // reference session tariff; with neither figure the cover counts as none.
    let coverage_percent = match (cover.coverage_percent, cover.per_session_amount) {
        (Some(direct), _) => direct,
        (None, Some(amount)) => round2(amount * 100.0 / config.session_reference_tariff),
        (None, None) => 0.0,
    };

    debug!(
        coverage_percent,
        session_cap = cover.session_cap,
        deductible = cover.deductible,
        "natural medicine signals"
    );

    let color = if coverage_percent >= 80.0 && cover.session_cap >= 20 && cover.deductible == 0.0 {
        Color::Green
    } else if (50.0..80.0).contains(&coverage_percent)
        && (10..20).contains(&cover.session_cap)
        && cover.deductible < config.moderate_deductible_cap
    {
        Color::Orange
    } else {
        Color::Red
    };

    CategoryResult {
        category: Category::NaturalMedicine,
        color,
        details: facts([
            ("coverage_percent", json!(coverage_percent)),
            ("session_cap", json!(cover.session_cap)),
            ("deductible", json!(cover.deductible)),
        ]),
    }
}

pub(crate) fn assess_hospitalization(
    cover: &HospitalizationCover,
    config: &EvaluationConfig,
) -> CategoryResult {
    // Values above the threshold are read as CHF per night and converted
    // against the nightly tariff; everything else is already a percentage.
    let coverage_percent = if cover.coverage > config.currency_amount_threshold {
        cover.coverage * 100.0 / config.nightly_reference_tariff
    } else {
        cover.coverage
    };

    debug!(
        ward_type = cover.ward_type.label(),
        coverage = cover.coverage,
        coverage_percent,
        deductible = cover.deductible,
        "hospitalization signals"
    );

    let base_details = [
        ("ward_type", json!(cover.ward_type.label())),
        ("coverage_percent", json!(coverage_percent)),
        ("deductible", json!(cover.deductible)),
    ];

    let waiver_insurer = cover
        .insurer
        .as_deref()
        .map(|name| {
            name.trim()
                .eq_ignore_ascii_case(&config.voluntary_deductible_insurer)
        })
        .unwrap_or(false);

    // Voluntary-deductible plans from the named insurer keep their ward rating
    // despite the deductible; outside the two ward cases the general rules apply.
    if waiver_insurer && cover.voluntary_deductible {
        let tagged = |color: Color| CategoryResult {
            category: Category::Hospitalization,
            color,
            details: facts([
                ("ward_type", json!(cover.ward_type.label())),
                ("coverage_percent", json!(coverage_percent)),
                ("deductible", json!(cover.deductible)),
                ("special_case", json!("voluntary deductible waiver")),
            ]),
        };

        if cover.ward_type == WardType::Private && coverage_percent <= 0.0 {
            return tagged(Color::Green);
        }
        if cover.ward_type == WardType::SemiPrivate && coverage_percent <= 10.0 {
            return tagged(Color::Orange);
        }
    }

    let color = if cover.ward_type == WardType::Private
        && coverage_percent <= 0.0
        && cover.deductible == 0.0
    {
        Color::Green
    } else if cover.ward_type == WardType::SemiPrivate && coverage_percent <= 10.0 {
        Color::Orange
    } else {
        Color::Red
    };

    CategoryResult {
        category: Category::Hospitalization,
        color,
        details: facts(base_details),
    }
}

pub(crate) fn assess_travel(cover: &TravelCover) -> CategoryResult {
    let color = if cover.emergency_treatment && cover.repatriation && cover.cancellation {
        Color::Green
    } else if cover.emergency_treatment && cover.repatriation && !cover.cancellation {
        Color::Orange
    } else {
        Color::Red
    };

    CategoryResult {
        category: Category::Travel,
        color,
        details: facts([
            ("emergency_treatment", json!(cover.emergency_treatment)),
            ("repatriation", json!(cover.repatriation)),
            ("cancellation", json!(cover.cancellation)),
        ]),
    }
}

pub(crate) fn assess_outpatient(cover: &OutpatientCover) -> CategoryResult {
    let levels: Vec<(OutpatientService, ServiceLevel)> = OutpatientService::ordered()
        .into_iter()
        .map(|service| {
            (
                service,
                cover.services.get(&service).copied().unwrap_or_default(),
            )
        })
        .collect();

    let all_unlimited = levels
        .iter()
        .all(|(_, level)| *level == ServiceLevel::Unlimited);
    let all_limited = levels
        .iter()
        .all(|(_, level)| *level == ServiceLevel::Limited);
    let cost_share = cover.cost_share_percent;

    // The green/orange bands do not partition every level combination; any
    // grid with an absent service, a high cost share, or a limited/unlimited
    // mix outside the bands stays Red.
    let color = if all_unlimited && cost_share <= 10.0 {
        Color::Green
    } else if all_unlimited {
        Color::Orange
    } else if all_limited && cost_share <= 10.0 {
        Color::Orange
    } else {
        Color::Red
    };

    let services: Value = levels
        .iter()
        .map(|(service, level)| (service.key().to_string(), json!(level.label())))
        .collect::<serde_json::Map<String, Value>>()
        .into();

    CategoryResult {
        category: Category::OutpatientCare,
        color,
        details: facts([
            ("services", services),
            ("cost_share_percent", json!(cost_share)),
        ]),
    }
}

pub(crate) fn assess_accident(cover: &AccidentCover) -> CategoryResult {
    let color = if cover.private_clinic && cover.supplementary_benefits && cover.death_disability_capital
    {
        Color::Green
    } else if cover.private_clinic
        && !(cover.supplementary_benefits || cover.death_disability_capital)
    {
        Color::Orange
    } else {
        Color::Red
    };

    CategoryResult {
        category: Category::Accident,
        color,
        details: facts([
            ("private_clinic", json!(cover.private_clinic)),
            ("supplementary_benefits", json!(cover.supplementary_benefits)),
            (
                "death_disability_capital",
                json!(cover.death_disability_capital),
            ),
        ]),
    }
}

pub(crate) fn assess_dental(
    cover: &DentalCover,
    birth_date: &str,
    today: NaiveDate,
    config: &EvaluationConfig,
) -> CategoryResult {
    let age_years = match NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d") {
        Ok(birth) => Some((today - birth).num_days() / 365),
        Err(err) => {
            warn!(%err, birth_date, "unparseable birth date, applying adult dental rules");
            None
        }
    };
    let is_child = age_years
        .map(|age| age < config.child_age_cutoff_years)
        .unwrap_or(false);

    debug!(
        coverage_percent = cover.coverage_percent,
        cap = cover.cap,
        deductible = cover.deductible,
        orthodontics_amount = cover.orthodontics_amount,
        is_child,
        "dental signals"
    );

    // Children without a serious orthodontics allowance are flagged Red no
    // matter how strong the rest of the dental cover looks.
    let color = if is_child && cover.orthodontics_amount < config.child_orthodontics_floor {
        Color::Red
    } else if cover.coverage_percent >= 75.0 && cover.cap >= 3000.0 && cover.deductible == 0.0 {
        Color::Green
    } else if cover.coverage_percent >= 50.0
        && cover.cap >= 1000.0
        && cover.deductible < config.moderate_deductible_cap
    {
        Color::Orange
    } else {
        Color::Red
    };

    CategoryResult {
        category: Category::Dental,
        color,
        details: facts([
            ("coverage_percent", json!(cover.coverage_percent)),
            ("cap", json!(cover.cap)),
            ("deductible", json!(cover.deductible)),
            ("orthodontics_amount", json!(cover.orthodontics_amount)),
            ("is_child", json!(is_child)),
        ]),
    }
}
