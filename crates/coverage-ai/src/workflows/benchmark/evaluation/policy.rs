use std::collections::BTreeSet;

use super::super::domain::{Category, CategoryResult, Color, InsuranceAnalysis, Tier};

/// Raised when rectification is handed a result set no prior analysis could
/// have produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RectificationError {
    #[error("category {} appears more than once; rectification expects the results of a prior analysis", .0.label())]
    DuplicateCategory(Category),
}

/// Roll per-category colors up into the overall tier. Depends only on how
/// many Orange and Red results there are, never on which categories hold them.
pub(crate) fn overall_tier(categories: &[CategoryResult]) -> Tier {
    let orange = categories
        .iter()
        .filter(|result| result.color == Color::Orange)
        .count();
    let red = categories
        .iter()
        .filter(|result| result.color == Color::Red)
        .count();

    if red == 0 && orange == 0 {
        Tier::Gold
    } else if red <= 1 && orange <= 3 {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}

/// Drop the excluded categories and recount the tier over the survivors.
/// Pure filter-and-recount: the kept results are carried over untouched and
/// exclusion names matching no result are no-ops.
pub(crate) fn rectify_results(
    categories: &[CategoryResult],
    exclusions: &BTreeSet<Category>,
) -> Result<InsuranceAnalysis, RectificationError> {
    let mut seen = BTreeSet::new();
    for result in categories {
        if !seen.insert(result.category) {
            return Err(RectificationError::DuplicateCategory(result.category));
        }
    }

    let survivors: Vec<CategoryResult> = categories
        .iter()
        .filter(|result| !exclusions.contains(&result.category))
        .cloned()
        .collect();

    Ok(InsuranceAnalysis {
        overall_tier: overall_tier(&survivors),
        categories: survivors,
    })
}
