mod config;
mod policy;
mod rules;

pub use config::EvaluationConfig;
pub use policy::RectificationError;

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use tracing::info;

use super::domain::{Category, CategoryResult, InsuranceAnalysis, PolicyInput};

/// Stateless evaluator applying the category rules and tier policy to one
/// policy at a time. Holds nothing but its configuration, so repeated calls
/// with the same input always agree.
pub struct BenchmarkEngine {
    config: EvaluationConfig,
}

impl BenchmarkEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(EvaluationConfig::default())
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Benchmark a policy against the current local date.
    pub fn evaluate(&self, policy: &PolicyInput) -> InsuranceAnalysis {
        self.evaluate_at(policy, Local::now().date_naive())
    }

    /// Benchmark a policy as of an explicit date; the date only feeds the
    /// dental age rule. Categories are independent of one another and are
    /// reported in the fixed category order.
    pub fn evaluate_at(&self, policy: &PolicyInput, today: NaiveDate) -> InsuranceAnalysis {
        let categories: Vec<CategoryResult> = Category::ordered()
            .into_iter()
            .map(|category| {
                let result = match category {
                    Category::NaturalMedicine => {
                        rules::assess_natural_medicine(&policy.natural_medicine, &self.config)
                    }
                    Category::Hospitalization => {
                        rules::assess_hospitalization(&policy.hospitalization, &self.config)
                    }
                    Category::Travel => rules::assess_travel(&policy.travel),
                    Category::OutpatientCare => rules::assess_outpatient(&policy.outpatient),
                    Category::Accident => rules::assess_accident(&policy.accident),
                    Category::Dental => {
                        rules::assess_dental(&policy.dental, &policy.birth_date, today, &self.config)
                    }
                };
                info!(
                    category = category.label(),
                    color = result.color.label(),
                    "category benchmarked"
                );
                result
            })
            .collect();

        let overall_tier = policy::overall_tier(&categories);
        info!(tier = overall_tier.label(), "overall tier determined");

        InsuranceAnalysis {
            overall_tier,
            categories,
        }
    }

    /// Recompute the tier after excluding the named categories from a
    /// previously computed result set. Never re-evaluates the underlying
    /// facts; exclusions matching no category are silently ignored.
    pub fn rectify(
        &self,
        categories: &[CategoryResult],
        exclusions: &BTreeSet<Category>,
    ) -> Result<InsuranceAnalysis, RectificationError> {
        let rectified = policy::rectify_results(categories, exclusions)?;
        info!(
            excluded = exclusions.len(),
            remaining = rectified.categories.len(),
            tier = rectified.overall_tier.label(),
            "analysis rectified"
        );
        Ok(rectified)
    }
}
