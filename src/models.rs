use serde::{Deserialize, Serialize};

// ============ Lead Intake Models ============

/// Age bracket declared on the intake form.
///
/// Unknown buckets are kept verbatim and scored with the default factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeGroup {
    /// "18-25"
    From18To25,
    /// "26-35"
    From26To35,
    /// "36-50"
    From36To50,
    /// "51+"
    Over50,
    /// Any bucket the form did not offer.
    Other(String),
}

impl AgeGroup {
    pub fn from_label(label: &str) -> Self {
        match label {
            "18-25" => Self::From18To25,
            "26-35" => Self::From26To35,
            "36-50" => Self::From36To50,
            "51+" => Self::Over50,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Household situation declared on the intake form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyBackground {
    Single,
    Married,
    MarriedWithKids,
    Other(String),
}

impl FamilyBackground {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Single" => Self::Single,
            "Married" => Self::Married,
            "Married with Kids" => Self::MarriedWithKids,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A lead submission that passed validation.
///
/// Only `validation::validate_submission` builds these, so holding one means
/// every field rule already held.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadSubmission {
    /// Contact phone number, unvalidated free text.
    pub phone_number: String,
    /// Syntactically valid email address.
    pub email: String,
    /// Credit score in [300, 850].
    pub credit_score: i64,
    /// Declared age bracket.
    pub age_group: AgeGroup,
    /// Declared household situation.
    pub family_background: FamilyBackground,
    /// Annual income, never negative.
    pub income: i64,
    /// Free-text comments, possibly empty.
    pub comments: String,
}

/// Scoring outcome returned to the caller and kept in the lead store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLead {
    /// Email copied from the submission.
    pub email: String,
    /// Base score before keyword adjustment, rounded to 2 decimals.
    pub initial_score: f64,
    /// Score after keyword adjustment, rounded to 2 decimals.
    pub reranked_score: f64,
    /// Comments copied verbatim from the submission.
    pub comments: String,
}

// ============ API Response Models ============

/// Response body for `GET /api/leads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadsResponse {
    pub leads: Vec<ScoredLead>,
}

/// Response body for the liveness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}
