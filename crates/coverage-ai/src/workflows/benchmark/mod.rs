//! Coverage benchmark workflow: input contract, normalization, category
//! rules, tier aggregation, and the HTTP surface over them.
//!
//! The six category evaluators are pure and independent of one another; the
//! engine runs them in the fixed category order and rolls the colors up into
//! a tier. Rectification re-runs only the roll-up over an explicit, filtered
//! result set, so nothing holds analysis state between calls.

pub mod domain;
pub mod normalizer;
pub(crate) mod evaluation;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    AccidentCover, Category, CategoryResult, Color, DentalCover, HospitalizationCover,
    InsuranceAnalysis, NaturalMedicineCover, OutpatientCover, OutpatientService, PolicyInput,
    ServiceLevel, Tier, TravelCover, WardType,
};
pub use evaluation::{BenchmarkEngine, EvaluationConfig, RectificationError};
pub use normalizer::policy_from_extraction;
pub use router::{benchmark_router, AnalysisView, CategoryResultView};
