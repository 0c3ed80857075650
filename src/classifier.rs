use crate::circuit_breaker::{create_classifier_circuit_breaker, ClassifierCircuitBreaker};
use crate::scoring::FeatureVector;
use async_trait::async_trait;
use failsafe::futures::CircuitBreaker;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Failures raised while obtaining a conversion probability.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The endpoint could not be reached or timed out.
    Unavailable(String),
    /// The endpoint answered with a non-success status.
    BadStatus(u16),
    /// The response body could not be decoded.
    InvalidResponse(String),
    /// The returned probability is NaN or outside [0, 1].
    OutOfRange(f64),
    /// Too many consecutive failures; calls are short-circuited.
    CircuitOpen,
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierError::Unavailable(msg) => write!(f, "Classifier unavailable: {}", msg),
            ClassifierError::BadStatus(status) => {
                write!(f, "Classifier returned status {}", status)
            }
            ClassifierError::InvalidResponse(msg) => {
                write!(f, "Invalid classifier response: {}", msg)
            }
            ClassifierError::OutOfRange(p) => {
                write!(f, "Classifier probability {} outside [0, 1]", p)
            }
            ClassifierError::CircuitOpen => write!(f, "Classifier circuit breaker is open"),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// Opaque binary classifier giving the probability that a lead converts.
#[async_trait]
pub trait ConversionClassifier: Send + Sync {
    /// Probability of the positive class, in [0, 1].
    async fn predict(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a FeatureVector,
}

#[derive(Deserialize)]
struct PredictResponse {
    probability: f64,
}

/// Client for a model-serving endpoint.
///
/// Posts the feature vector as JSON and reads back `{"probability": p}`.
/// Calls run behind a circuit breaker and are never retried.
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    breaker: ClassifierCircuitBreaker,
}

impl HttpClassifier {
    /// Creates a new `HttpClassifier`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full URL of the prediction route.
    /// * `timeout` - Per-request timeout.
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ClassifierError::Unavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint,
            breaker: create_classifier_circuit_breaker(),
        })
    }

    async fn request_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        tracing::debug!("Requesting conversion probability from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { features })
            .send()
            .await
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClassifierError::BadStatus(response.status().as_u16()));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        validate_probability(body.probability)
    }
}

#[async_trait]
impl ConversionClassifier for HttpClassifier {
    async fn predict(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        match self.breaker.call(self.request_probability(features)).await {
            Ok(probability) => Ok(probability),
            Err(failsafe::Error::Inner(e)) => {
                tracing::error!("Classifier call failed: {}", e);
                Err(e)
            }
            Err(failsafe::Error::Rejected) => {
                tracing::warn!("Classifier call rejected, circuit breaker is open");
                Err(ClassifierError::CircuitOpen)
            }
        }
    }
}

/// Accepts a probability only if it lies in [0, 1].
pub fn validate_probability(probability: f64) -> Result<f64, ClassifierError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ClassifierError::OutOfRange(probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_probability() {
        assert_eq!(validate_probability(0.0), Ok(0.0));
        assert_eq!(validate_probability(1.0), Ok(1.0));
        assert_eq!(validate_probability(1.5), Err(ClassifierError::OutOfRange(1.5)));
        assert_eq!(
            validate_probability(-0.1),
            Err(ClassifierError::OutOfRange(-0.1))
        );
        assert!(validate_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let features = FeatureVector::for_new_lead();
        let body = serde_json::to_value(PredictRequest {
            features: &features,
        })
        .unwrap();

        assert_eq!(body["features"]["TotalVisits"], 1);
        assert_eq!(body["features"]["Page Views Per Visit"], 2.0);
        assert_eq!(body["features"]["Lead Origin"], 1);
    }
}
