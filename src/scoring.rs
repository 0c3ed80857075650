use crate::classifier::{validate_probability, ClassifierError, ConversionClassifier};
use crate::models::{AgeGroup, FamilyBackground, LeadSubmission};
use moka::future::Cache;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ============ Heuristic Strategy ============

const BASE_SCORE: f64 = 30.0;
const CREDIT_WEIGHT: f64 = 40.0;
const CREDIT_FLOOR: f64 = 300.0;
const CREDIT_SPAN: f64 = 550.0;
const INCOME_WEIGHT: f64 = 20.0;
const INCOME_CEILING: f64 = 1_000_000.0;
const MAX_INITIAL_SCORE: f64 = 100.0;

/// Credit contribution, linear from 0 at 300 to 40 at 850.
pub fn credit_factor(credit_score: i64) -> f64 {
    (credit_score as f64 - CREDIT_FLOOR) / CREDIT_SPAN * CREDIT_WEIGHT
}

/// Income contribution, linear up to 20 at one million and flat above.
pub fn income_factor(income: i64) -> f64 {
    (income as f64 / INCOME_CEILING * INCOME_WEIGHT).min(INCOME_WEIGHT)
}

pub fn age_factor(age_group: &AgeGroup) -> f64 {
    match age_group {
        AgeGroup::From18To25 => 5.0,
        AgeGroup::From26To35 => 15.0,
        AgeGroup::From36To50 => 10.0,
        AgeGroup::Over50 => 5.0,
        AgeGroup::Other(_) => 5.0,
    }
}

pub fn family_factor(family_background: &FamilyBackground) -> f64 {
    match family_background {
        FamilyBackground::Single => 5.0,
        FamilyBackground::Married => 10.0,
        FamilyBackground::MarriedWithKids => 15.0,
        FamilyBackground::Other(_) => 5.0,
    }
}

/// Additive heuristic over the structured lead attributes, capped at 100.
pub fn heuristic_score(lead: &LeadSubmission) -> f64 {
    let score = BASE_SCORE
        + credit_factor(lead.credit_score)
        + income_factor(lead.income)
        + age_factor(&lead.age_group)
        + family_factor(&lead.family_background);

    score.min(MAX_INITIAL_SCORE)
}

// ============ Model-backed Strategy ============

/// Channel through which the lead first reached the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadOrigin {
    Api,
    LandingPageSubmission,
    QuickAddForm,
    Reference,
}

impl LeadOrigin {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "api" => Some(Self::Api),
            "landing page submission" => Some(Self::LandingPageSubmission),
            "quick add form" => Some(Self::QuickAddForm),
            "reference" => Some(Self::Reference),
            _ => None,
        }
    }

    /// Integer code the model was trained with.
    pub fn code(self) -> u8 {
        match self {
            Self::Api => 0,
            Self::LandingPageSubmission => 1,
            Self::QuickAddForm => 2,
            Self::Reference => 3,
        }
    }
}

/// Traffic source attributed to the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadSource {
    DirectTraffic,
    Google,
    OrganicSearch,
    OlarkChat,
    Reference,
    WelingakWebsite,
    Facebook,
    Bing,
    SocialMedia,
    YoutubeChannel,
}

impl LeadSource {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "direct traffic" => Some(Self::DirectTraffic),
            "google" => Some(Self::Google),
            "organic search" => Some(Self::OrganicSearch),
            "olark chat" => Some(Self::OlarkChat),
            "reference" => Some(Self::Reference),
            "welingak website" => Some(Self::WelingakWebsite),
            "facebook" => Some(Self::Facebook),
            "bing" => Some(Self::Bing),
            "social media" => Some(Self::SocialMedia),
            "youtubechannel" => Some(Self::YoutubeChannel),
            _ => None,
        }
    }

    /// Integer code the model was trained with.
    pub fn code(self) -> u8 {
        match self {
            Self::DirectTraffic => 0,
            Self::Google => 1,
            Self::OrganicSearch => 2,
            Self::OlarkChat => 3,
            Self::Reference => 4,
            Self::WelingakWebsite => 5,
            Self::Facebook => 6,
            Self::Bing => 7,
            Self::SocialMedia => 8,
            Self::YoutubeChannel => 9,
        }
    }
}

/// Five-feature input vector for the conversion classifier.
///
/// Serializes with the column names the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "TotalVisits")]
    pub total_visits: u32,
    #[serde(rename = "Total Time Spent on Website")]
    pub time_on_site_secs: u32,
    #[serde(rename = "Page Views Per Visit")]
    pub page_views_per_visit: f64,
    #[serde(rename = "Lead Origin")]
    pub lead_origin: u8,
    #[serde(rename = "Lead Source")]
    pub lead_source: u8,
}

impl FeatureVector {
    /// Features for a lead with no recorded web activity.
    pub fn for_new_lead() -> Self {
        Self {
            total_visits: 1,
            time_on_site_secs: 300,
            page_views_per_visit: 2.0,
            lead_origin: LeadOrigin::LandingPageSubmission.code(),
            lead_source: LeadSource::Google.code(),
        }
    }

    /// Stable key used to cache predictions for this vector.
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.total_visits,
            self.time_on_site_secs,
            self.page_views_per_visit,
            self.lead_origin,
            self.lead_source
        )
    }
}

/// Initial scorer backed by an external conversion classifier.
///
/// Successful predictions are cached per feature vector. Failures are never
/// cached, so the next lead queries the classifier again.
#[derive(Clone)]
pub struct ModelScorer {
    classifier: Arc<dyn ConversionClassifier>,
    predictions: Cache<String, f64>,
}

impl ModelScorer {
    pub fn new(classifier: Arc<dyn ConversionClassifier>, cache_ttl: Duration) -> Self {
        let predictions = Cache::builder()
            .time_to_live(cache_ttl)
            .max_capacity(1_000)
            .build();

        Self {
            classifier,
            predictions,
        }
    }

    pub async fn score(&self, _lead: &LeadSubmission) -> Result<f64, ClassifierError> {
        let features = FeatureVector::for_new_lead();
        let key = features.cache_key();

        if let Some(probability) = self.predictions.get(&key).await {
            tracing::debug!("Using cached conversion probability {:.4}", probability);
            return Ok(probability * 100.0);
        }

        let probability = validate_probability(self.classifier.predict(&features).await?)?;
        self.predictions.insert(key, probability).await;

        Ok(probability * 100.0)
    }
}

// ============ Strategy Selection ============

/// Which initial scoring strategy the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Heuristic,
    Model,
}

impl StrategyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "heuristic" => Some(Self::Heuristic),
            "model" => Some(Self::Model),
            _ => None,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Heuristic => write!(f, "heuristic"),
            StrategyKind::Model => write!(f, "model"),
        }
    }
}

/// Produces the 0-100 base score for a validated lead.
#[derive(Clone)]
pub enum InitialScorer {
    Heuristic,
    Model(ModelScorer),
}

impl InitialScorer {
    pub fn kind(&self) -> StrategyKind {
        match self {
            InitialScorer::Heuristic => StrategyKind::Heuristic,
            InitialScorer::Model(_) => StrategyKind::Model,
        }
    }

    pub async fn score(&self, lead: &LeadSubmission) -> Result<f64, ClassifierError> {
        match self {
            InitialScorer::Heuristic => Ok(heuristic_score(lead)),
            InitialScorer::Model(model) => model.score(lead).await,
        }
    }
}
