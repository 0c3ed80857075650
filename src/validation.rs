use crate::models::{AgeGroup, FamilyBackground, LeadSubmission};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

/// Fields every submission must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "phone_number",
    "email",
    "credit_score",
    "age_group",
    "family_background",
    "income",
    "comments",
    "consent",
];

pub const MIN_CREDIT_SCORE: i64 = 300;
pub const MAX_CREDIT_SCORE: i64 = 850;

const MAX_EMAIL_LENGTH: usize = 254;

// RFC 5322 simplified, with at least one dot in the domain.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// Reasons a lead submission is rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The body was not a JSON object.
    MalformedBody,
    /// A required field is absent.
    MissingField(&'static str),
    /// Consent was not given.
    ConsentRequired,
    /// Credit score is not an integer in [300, 850].
    InvalidCreditScore,
    /// Income is not a non-negative integer.
    InvalidIncome,
    /// A text field carried a non-string value.
    InvalidField(&'static str),
    /// Email is not a syntactically valid address.
    InvalidEmail,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MalformedBody => write!(f, "Request body must be a JSON object"),
            ValidationError::MissingField(name) => write!(f, "Missing field: {}", name),
            ValidationError::ConsentRequired => write!(f, "Consent must be given"),
            ValidationError::InvalidCreditScore => write!(
                f,
                "Credit score must be a valid number between {} and {}",
                MIN_CREDIT_SCORE, MAX_CREDIT_SCORE
            ),
            ValidationError::InvalidIncome => {
                write!(f, "Income must be a valid non-negative number")
            }
            ValidationError::InvalidField(name) => write!(f, "Field {} must be a string", name),
            ValidationError::InvalidEmail => write!(f, "Email must be a valid email address"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a raw JSON submission and produces a typed `LeadSubmission`.
///
/// Rules run in a fixed order and the first failure wins: presence,
/// consent, credit score, income, text field types, email syntax.
pub fn validate_submission(body: &Value) -> Result<LeadSubmission, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::MalformedBody)?;

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|name| !fields.contains_key(**name))
    {
        return Err(ValidationError::MissingField(*missing));
    }

    if fields.get("consent") != Some(&Value::Bool(true)) {
        return Err(ValidationError::ConsentRequired);
    }

    let credit_score = fields
        .get("credit_score")
        .and_then(coerce_integer)
        .filter(|score| (MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(score))
        .ok_or(ValidationError::InvalidCreditScore)?;

    let income = fields
        .get("income")
        .and_then(coerce_integer)
        .filter(|income| *income >= 0)
        .ok_or(ValidationError::InvalidIncome)?;

    let phone_number = text_field(fields, "phone_number")?;
    let age_group = text_field(fields, "age_group")?;
    let family_background = text_field(fields, "family_background")?;
    let comments = text_field(fields, "comments")?;

    let email = fields
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| is_valid_email(email))
        .ok_or(ValidationError::InvalidEmail)?;

    Ok(LeadSubmission {
        phone_number: phone_number.to_string(),
        email: email.to_string(),
        credit_score,
        age_group: AgeGroup::from_label(age_group),
        family_background: FamilyBackground::from_label(family_background),
        income,
        comments: comments.to_string(),
    })
}

/// Checks email syntax against a simplified RFC 5322 pattern.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Reads an integer from a JSON value.
///
/// Accepts integers, floats without a fractional part and numeric strings.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn text_field<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidField(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_integer_variants() {
        assert_eq!(coerce_integer(&json!(700)), Some(700));
        assert_eq!(coerce_integer(&json!(700.0)), Some(700));
        assert_eq!(coerce_integer(&json!(" 700 ")), Some(700));
        assert_eq!(coerce_integer(&json!(-1)), Some(-1));
        assert_eq!(coerce_integer(&json!(700.5)), None);
        assert_eq!(coerce_integer(&json!("700.5")), None);
        assert_eq!(coerce_integer(&json!("abc")), None);
        assert_eq!(coerce_integer(&json!(null)), None);
        assert_eq!(coerce_integer(&json!(true)), None);
        assert_eq!(coerce_integer(&json!([700])), None);
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        assert_eq!(
            validate_submission(&json!([1, 2, 3])),
            Err(ValidationError::MalformedBody)
        );
        assert_eq!(
            validate_submission(&json!("lead")),
            Err(ValidationError::MalformedBody)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingField("email").to_string(),
            "Missing field: email"
        );
        assert_eq!(
            ValidationError::InvalidCreditScore.to_string(),
            "Credit score must be a valid number between 300 and 850"
        );
        assert_eq!(
            ValidationError::ConsentRequired.to_string(),
            "Consent must be given"
        );
    }

    #[test]
    fn test_email_length_limit() {
        let local = "a".repeat(250);
        assert!(!is_valid_email(&format!("{}@example.com", local)));
        assert!(is_valid_email("lead@example.com"));
    }
}
