use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The six coverage dimensions benchmarked for every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NaturalMedicine,
    Hospitalization,
    Travel,
    OutpatientCare,
    Accident,
    Dental,
}

impl Category {
    /// Fixed report order; `InsuranceAnalysis::categories` always follows it.
    pub const fn ordered() -> [Self; 6] {
        [
            Self::NaturalMedicine,
            Self::Hospitalization,
            Self::Travel,
            Self::OutpatientCare,
            Self::Accident,
            Self::Dental,
        ]
    }

    /// Categories a policy holder may opt out of during rectification.
    pub const fn optional() -> [Self; 3] {
        [Self::NaturalMedicine, Self::Travel, Self::Accident]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NaturalMedicine => "Natural Medicine",
            Self::Hospitalization => "Hospitalization",
            Self::Travel => "Travel",
            Self::OutpatientCare => "Outpatient Care",
            Self::Accident => "Accident",
            Self::Dental => "Dental",
        }
    }

    pub const fn is_optional(self) -> bool {
        matches!(self, Self::NaturalMedicine | Self::Travel | Self::Accident)
    }

    /// Resolve a caller-supplied category name, tolerating label spelling,
    /// snake_case, and case differences. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "natural_medicine" => Some(Self::NaturalMedicine),
            "hospitalization" => Some(Self::Hospitalization),
            "travel" => Some(Self::Travel),
            "outpatient_care" | "outpatient" => Some(Self::OutpatientCare),
            "accident" => Some(Self::Accident),
            "dental" => Some(Self::Dental),
            _ => None,
        }
    }
}

/// Per-category rating, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Green,
    Orange,
    Red,
}

impl Color {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Orange => "Orange",
            Self::Red => "Red",
        }
    }
}

/// Overall policy rating, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }
}

/// Hospital ward class named by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WardType {
    Private,
    SemiPrivate,
    Common,
}

impl WardType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::SemiPrivate => "semi_private",
            Self::Common => "common",
        }
    }
}

impl Default for WardType {
    fn default() -> Self {
        Self::Common
    }
}

/// Reimbursement level granted for one outpatient service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevel {
    Unlimited,
    Limited,
    Absent,
}

impl ServiceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unlimited => "unlimited",
            Self::Limited => "limited",
            Self::Absent => "absent",
        }
    }
}

impl Default for ServiceLevel {
    fn default() -> Self {
        Self::Absent
    }
}

/// The five outpatient services every policy is probed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutpatientService {
    Glasses,
    Psychotherapy,
    OffListMedication,
    Transport,
    Rescue,
}

impl OutpatientService {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Glasses,
            Self::Psychotherapy,
            Self::OffListMedication,
            Self::Transport,
            Self::Rescue,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Glasses => "glasses",
            Self::Psychotherapy => "psychotherapy",
            Self::OffListMedication => "off_list_medication",
            Self::Transport => "transport",
            Self::Rescue => "rescue",
        }
    }
}

/// Natural-medicine rider terms. `coverage_percent` may be stated directly or
/// derived from a per-session reimbursement over the reference session tariff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalMedicineCover {
    pub coverage_percent: Option<f64>,
    pub per_session_amount: Option<f64>,
    pub session_cap: u32,
    pub deductible: f64,
}

/// Hospital stay terms. `coverage` carries either a residual cost share in
/// percent or a daily CHF amount; the evaluator disambiguates by magnitude.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitalizationCover {
    pub ward_type: WardType,
    pub coverage: f64,
    pub deductible: f64,
    pub insurer: Option<String>,
    pub voluntary_deductible: bool,
}

/// Travel assistance terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelCover {
    pub emergency_treatment: bool,
    pub repatriation: bool,
    pub cancellation: bool,
}

/// Outpatient service grid; services missing from the map count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutpatientCover {
    pub services: BTreeMap<OutpatientService, ServiceLevel>,
    pub cost_share_percent: f64,
}

/// Accident rider terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccidentCover {
    pub private_clinic: bool,
    pub supplementary_benefits: bool,
    pub death_disability_capital: bool,
}

/// Dental terms, all amounts in CHF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DentalCover {
    pub coverage_percent: f64,
    pub cap: f64,
    pub deductible: f64,
    pub orthodontics_amount: f64,
}

/// Structured description of one policy, as produced by the upstream
/// extraction collaborator. Every field has a documented default so a partial
/// extraction still evaluates; the engine never validates beyond this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyInput {
    pub natural_medicine: NaturalMedicineCover,
    pub hospitalization: HospitalizationCover,
    pub travel: TravelCover,
    pub outpatient: OutpatientCover,
    pub accident: AccidentCover,
    pub dental: DentalCover,
    /// ISO date string; only used to derive the age for the dental rule.
    /// Unparseable values degrade to "not a child" rather than failing.
    pub birth_date: String,
}

impl Default for PolicyInput {
    fn default() -> Self {
        Self {
            natural_medicine: NaturalMedicineCover::default(),
            hospitalization: HospitalizationCover::default(),
            travel: TravelCover::default(),
            outpatient: OutpatientCover::default(),
            accident: AccidentCover::default(),
            dental: DentalCover::default(),
            birth_date: "2000-01-01".to_string(),
        }
    }
}

/// Rating of a single category together with the facts that drove it.
/// Immutable once produced; rectification only filters, never rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub color: Color,
    pub details: BTreeMap<String, serde_json::Value>,
}

/// Complete benchmark outcome: six category results in fixed order after an
/// initial evaluation, fewer after rectification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceAnalysis {
    pub overall_tier: Tier,
    pub categories: Vec<CategoryResult>,
}
