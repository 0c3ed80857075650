use crate::classifier::ClassifierError;
use crate::lead_store::LeadStore;
use crate::models::ScoredLead;
use crate::rerank::rerank;
use crate::scoring::{InitialScorer, StrategyKind};
use crate::validation::{validate_submission, ValidationError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Failures of a single scoring call.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// The submission was rejected before scoring.
    Validation(ValidationError),
    /// Scoring failed after validation; nothing was stored.
    Processing(String),
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::Validation(e) => write!(f, "{}", e),
            ScoringError::Processing(msg) => write!(f, "Error processing lead: {}", msg),
        }
    }
}

impl std::error::Error for ScoringError {}

impl From<ValidationError> for ScoringError {
    fn from(err: ValidationError) -> Self {
        ScoringError::Validation(err)
    }
}

impl From<ClassifierError> for ScoringError {
    fn from(err: ClassifierError) -> Self {
        ScoringError::Processing(err.to_string())
    }
}

/// Runs the scoring pipeline: validate, initial score, re-rank, store.
#[derive(Clone)]
pub struct LeadScoringService {
    scorer: InitialScorer,
    store: Arc<LeadStore>,
}

impl LeadScoringService {
    pub fn new(scorer: InitialScorer, store: Arc<LeadStore>) -> Self {
        Self { scorer, store }
    }

    pub fn strategy(&self) -> StrategyKind {
        self.scorer.kind()
    }

    /// Scores a raw submission and records the result.
    ///
    /// The store is only touched once every stage has succeeded, so a
    /// rejected or failed submission leaves no trace.
    pub async fn score(&self, body: &Value) -> Result<ScoredLead, ScoringError> {
        let submission = validate_submission(body).map_err(|e| {
            tracing::warn!("Lead rejected: {}", e);
            e
        })?;

        let initial_score = self.scorer.score(&submission).await?;
        let reranked_score = rerank(initial_score, &submission.comments);

        let lead = ScoredLead {
            email: submission.email,
            initial_score: round2(initial_score),
            reranked_score: round2(reranked_score),
            comments: submission.comments,
        };

        let total = self.store.append(lead.clone());
        tracing::info!(
            "Scored lead {} via {} strategy: initial {:.2}, reranked {:.2} ({} stored)",
            lead.email,
            self.scorer.kind(),
            lead.initial_score,
            lead.reranked_score,
            total
        );

        Ok(lead)
    }

    /// Every scored lead so far, oldest first.
    pub fn leads(&self) -> Vec<ScoredLead> {
        self.store.list()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
