use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use clap::Args;
use coverage_ai::error::AppError;
use coverage_ai::workflows::benchmark::{policy_from_extraction, Category};
use serde_json::{json, Value};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the benchmark (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Optional category to exclude in a follow-up rectification (repeatable)
    #[arg(long = "exclude")]
    pub(crate) exclusions: Vec<String>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let engine = crate::infra::default_engine();

    let policy = policy_from_extraction(&sample_extraction());
    let analysis = engine.evaluate_at(&policy, today);

    println!("Coverage benchmark as of {today}");
    for result in &analysis.categories {
        println!("  {:<16} {}", result.category.label(), result.color.label());
    }
    println!("Overall tier: {}", analysis.overall_tier.label());

    let exclusions: BTreeSet<Category> = args
        .exclusions
        .iter()
        .filter_map(|name| {
            let parsed = Category::parse(name);
            match parsed {
                None => eprintln!("ignoring unknown category '{name}'"),
                Some(category) if !category.is_optional() => {
                    eprintln!("note: {} is not an optional category", category.label());
                }
                Some(_) => {}
            }
            parsed
        })
        .collect();

    if !exclusions.is_empty() {
        match engine.rectify(&analysis.categories, &exclusions) {
            Ok(rectified) => {
                println!(
                    "After excluding {} categor{}: {} over {} categories",
                    exclusions.len(),
                    if exclusions.len() == 1 { "y" } else { "ies" },
                    rectified.overall_tier.label(),
                    rectified.categories.len()
                );
            }
            Err(err) => eprintln!("rectification failed: {err}"),
        }
    }

    Ok(())
}

/// Extraction payload for a policy that rates Gold, as a stand-in for the
/// upstream document pipeline during demos.
fn sample_extraction() -> Value {
    json!({
        "medecine_naturelle": {"etendue": 85, "plafond": 25, "franchise": 0},
        "hospitalisation": {"type": "privé", "etendue": 0, "franchise": 0},
        "voyage": {
            "traitement_urgence": true,
            "rapatriement": true,
            "annulation": true
        },
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
