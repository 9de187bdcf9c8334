use std::collections::BTreeSet;

use super::common::*;
use crate::workflows::benchmark::domain::{Category, Color, Tier};
use crate::workflows::benchmark::evaluation::RectificationError;

fn tier_rank(tier: Tier) -> u8 {
    match tier {
        Tier::Gold => 0,
        Tier::Silver => 1,
        Tier::Bronze => 2,
    }
}

#[test]
fn all_green_categories_award_gold() {
    let analysis = engine().evaluate_at(&gold_policy(), evaluation_date());
    assert_eq!(analysis.overall_tier, Tier::Gold);
    assert_eq!(analysis.categories.len(), 6);
    let order: Vec<Category> = analysis
        .categories
        .iter()
        .map(|result| result.category)
        .collect();
    assert_eq!(order, Category::ordered());
}

#[test]
fn one_red_and_two_orange_stay_silver() {
    let results = vec![
        colored(Category::NaturalMedicine, Color::Red),
        colored(Category::Hospitalization, Color::Orange),
        colored(Category::Travel, Color::Orange),
        colored(Category::OutpatientCare, Color::Green),
        colored(Category::Accident, Color::Green),
        colored(Category::Dental, Color::Green),
    ];
    let analysis = engine()
        .rectify(&results, &BTreeSet::new())
        .expect("no exclusions");
    assert_eq!(analysis.overall_tier, Tier::Silver);
}

#[test]
fn two_reds_drop_to_bronze() {
    let results = vec![
        colored(Category::NaturalMedicine, Color::Red),
        colored(Category::Hospitalization, Color::Red),
        colored(Category::Travel, Color::Green),
        colored(Category::OutpatientCare, Color::Green),
        colored(Category::Accident, Color::Green),
        colored(Category::Dental, Color::Green),
    ];
    let analysis = engine()
        .rectify(&results, &BTreeSet::new())
        .expect("no exclusions");
    assert_eq!(analysis.overall_tier, Tier::Bronze);
}

#[test]
fn four_orange_results_drop_to_bronze() {
    let results = vec![
        colored(Category::NaturalMedicine, Color::Orange),
        colored(Category::Hospitalization, Color::Orange),
        colored(Category::Travel, Color::Orange),
        colored(Category::OutpatientCare, Color::Orange),
        colored(Category::Accident, Color::Green),
        colored(Category::Dental, Color::Green),
    ];
    let analysis = engine()
        .rectify(&results, &BTreeSet::new())
        .expect("no exclusions");
    assert_eq!(analysis.overall_tier, Tier::Bronze);
}

#[test]
fn tier_depends_only_on_color_counts() {
    let first = vec![
        colored(Category::NaturalMedicine, Color::Red),
        colored(Category::Hospitalization, Color::Orange),
        colored(Category::Travel, Color::Green),
        colored(Category::OutpatientCare, Color::Green),
        colored(Category::Accident, Color::Green),
        colored(Category::Dental, Color::Green),
    ];
    let second = vec![
        colored(Category::NaturalMedicine, Color::Green),
        colored(Category::Hospitalization, Color::Green),
        colored(Category::Travel, Color::Green),
        colored(Category::OutpatientCare, Color::Orange),
        colored(Category::Accident, Color::Green),
        colored(Category::Dental, Color::Red),
    ];
    let engine = engine();
    let no_exclusions = BTreeSet::new();
    assert_eq!(
        engine
            .rectify(&first, &no_exclusions)
            .expect("valid set")
            .overall_tier,
        engine
            .rectify(&second, &no_exclusions)
            .expect("valid set")
            .overall_tier,
    );
}

#[test]
fn rectification_drops_excluded_categories_in_order() {
    let mut policy = gold_policy();
    policy.travel.repatriation = false;
    let engine = engine();
    let analysis = engine.evaluate_at(&policy, evaluation_date());
    assert_eq!(analysis.overall_tier, Tier::Silver);

    let exclusions = BTreeSet::from([Category::Travel]);
    let rectified = engine
        .rectify(&analysis.categories, &exclusions)
        .expect("known categories");

    assert_eq!(rectified.overall_tier, Tier::Gold);
    assert_eq!(rectified.categories.len(), 5);
    let order: Vec<Category> = rectified
        .categories
        .iter()
        .map(|result| result.category)
        .collect();
    assert_eq!(
        order,
        vec![
            Category::NaturalMedicine,
            Category::Hospitalization,
            Category::OutpatientCare,
            Category::Accident,
            Category::Dental,
        ]
    );
}

#[test]
fn rectification_keeps_surviving_results_untouched() {
    let engine = engine();
    let analysis = engine.evaluate_at(&gold_policy(), evaluation_date());
    let exclusions = BTreeSet::from([Category::Accident]);
    let rectified = engine
        .rectify(&analysis.categories, &exclusions)
        .expect("known categories");

    for result in &rectified.categories {
        assert_eq!(result, category_in(&analysis, result.category));
    }
}

#[test]
fn rectification_never_moves_the_tier_away_from_gold() {
    let results = vec![
        colored(Category::NaturalMedicine, Color::Green),
        colored(Category::Hospitalization, Color::Orange),
        colored(Category::Travel, Color::Red),
        colored(Category::OutpatientCare, Color::Orange),
        colored(Category::Accident, Color::Green),
        colored(Category::Dental, Color::Red),
    ];
    let engine = engine();
    let baseline = engine
        .rectify(&results, &BTreeSet::new())
        .expect("valid set")
        .overall_tier;

    for category in Category::ordered() {
        let rectified = engine
            .rectify(&results, &BTreeSet::from([category]))
            .expect("valid set");
        assert!(
            tier_rank(rectified.overall_tier) <= tier_rank(baseline),
            "excluding {:?} worsened the tier",
            category
        );
    }
}

#[test]
fn rectifying_a_green_category_changes_nothing_overall() {
    let engine = engine();
    let analysis = engine.evaluate_at(&gold_policy(), evaluation_date());
    let rectified = engine
        .rectify(&analysis.categories, &BTreeSet::from([Category::NaturalMedicine]))
        .expect("known categories");
    assert_eq!(rectified.overall_tier, analysis.overall_tier);
    assert_eq!(rectified.categories.len(), 5);
}

#[test]
fn rectified_analysis_can_be_rectified_again() {
    let engine = engine();
    let analysis = engine.evaluate_at(&gold_policy(), evaluation_date());
    let first = engine
        .rectify(&analysis.categories, &BTreeSet::from([Category::Travel]))
        .expect("known categories");
    let second = engine
        .rectify(&first.categories, &BTreeSet::from([Category::Accident]))
        .expect("rectified set is still well formed");
    assert_eq!(second.categories.len(), 4);
}

#[test]
fn exclusions_matching_no_category_are_no_ops() {
    let engine = engine();
    let analysis = engine.evaluate_at(&gold_policy(), evaluation_date());
    let first = engine
        .rectify(&analysis.categories, &BTreeSet::from([Category::Travel]))
        .expect("known categories");
    // Travel is already gone; excluding it again must not change anything.
    let second = engine
        .rectify(&first.categories, &BTreeSet::from([Category::Travel]))
        .expect("repeat exclusion is harmless");
    assert_eq!(first, second);
}

#[test]
fn duplicate_categories_are_rejected() {
    let results = vec![
        colored(Category::Travel, Color::Green),
        colored(Category::Travel, Color::Red),
    ];
    let err = engine()
        .rectify(&results, &BTreeSet::new())
        .expect_err("duplicate categories are not a prior analysis");
    assert_eq!(err, RectificationError::DuplicateCategory(Category::Travel));
}

#[test]
fn the_optional_categories_are_the_rectifiable_ones() {
    for category in Category::optional() {
        assert!(category.is_optional());
    }
    assert!(!Category::Hospitalization.is_optional());
    assert!(!Category::OutpatientCare.is_optional());
    assert!(!Category::Dental.is_optional());
}

#[test]
fn repeated_evaluation_is_idempotent() {
    let engine = engine();
    let policy = gold_policy();
    let first = engine.evaluate_at(&policy, evaluation_date());
    let second = engine.evaluate_at(&policy, evaluation_date());
    assert_eq!(first, second);
}
