use serde::{Deserialize, Serialize};

/// Reference tariffs and recurring caps the category rules are anchored on.
/// The banding thresholds themselves live with the rules; these are the dials
/// that track external price levels and underwriting policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// CHF charged for one natural-medicine session at the reference tariff;
    /// per-session reimbursements are converted to percent against it.
    pub session_reference_tariff: f64,
    /// CHF for one hospital night; daily amounts convert to percent against it.
    pub nightly_reference_tariff: f64,
    /// Hospitalization coverage values above this are read as CHF amounts,
    /// values at or below as percentages. Ambiguous for amounts under 100.
    pub currency_amount_threshold: f64,
    /// CHF ceiling below which a deductible still qualifies for Orange.
    pub moderate_deductible_cap: f64,
    /// Insurer whose voluntary-deductible plans keep their ward rating even
    /// with a non-zero deductible.
    pub voluntary_deductible_insurer: String,
    /// Age in whole years under which the orthodontics floor applies.
    pub child_age_cutoff_years: i64,
    /// Minimum CHF of orthodontics cover a child's policy must carry.
    pub child_orthodontics_floor: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            session_reference_tariff: 120.0,
            nightly_reference_tariff: 1500.0,
            currency_amount_threshold: 100.0,
            moderate_deductible_cap: 200.0,
            voluntary_deductible_insurer: "kpt".to_string(),
            child_age_cutoff_years: 12,
            child_orthodontics_floor: 10_000.0,
        }
    }
}
