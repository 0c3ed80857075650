/// Property-based tests using proptest
/// Tests invariants of the scoring pipeline that should hold for all inputs
use lead_scoring_api::models::{AgeGroup, FamilyBackground, LeadSubmission};
use lead_scoring_api::rerank::{keyword_adjustment, rerank, NEGATIVE_KEYWORDS};
use lead_scoring_api::scoring::{credit_factor, heuristic_score, income_factor};
use lead_scoring_api::validation::validate_submission;
use proptest::prelude::*;
use serde_json::json;

fn age_group() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["18-25", "26-35", "36-50", "51+", "unknown"]).prop_map(String::from)
}

fn family_background() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Single", "Married", "Married with Kids", "Other"])
        .prop_map(String::from)
}

// Property: Initial and reranked scores stay in range
proptest! {
    #[test]
    fn heuristic_score_within_bounds(
        credit in 300i64..=850,
        income in 0i64..=50_000_000,
        age in age_group(),
        family in family_background()
    ) {
        let lead = LeadSubmission {
            phone_number: "555-0100".to_string(),
            email: "lead@example.com".to_string(),
            credit_score: credit,
            age_group: AgeGroup::from_label(&age),
            family_background: FamilyBackground::from_label(&family),
            income,
            comments: String::new(),
        };
        let score = heuristic_score(&lead);
        prop_assert!((0.0..=100.0).contains(&score), "score {}", score);
    }

    #[test]
    fn rerank_within_bounds(initial in 0.0f64..=100.0, comments in "\\PC*") {
        let score = rerank(initial, &comments);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn credit_and_income_factors_within_bounds(
        credit in 300i64..=850,
        income in 0i64..=i64::MAX / 2
    ) {
        let credit = credit_factor(credit);
        let income = income_factor(income);
        prop_assert!((0.0..=40.0).contains(&credit));
        prop_assert!((0.0..=20.0).contains(&income));
    }
}

// Property: Re-ranking is deterministic and case-insensitive
proptest! {
    #[test]
    fn rerank_is_deterministic(initial in 0.0f64..=100.0, comments in "[a-zA-Z ,.!]{0,80}") {
        prop_assert_eq!(rerank(initial, &comments), rerank(initial, &comments));
    }

    #[test]
    fn rerank_ignores_case(comments in "[a-zA-Z ]{0,80}") {
        prop_assert_eq!(
            keyword_adjustment(&comments),
            keyword_adjustment(&comments.to_uppercase())
        );
    }

    #[test]
    fn keyword_free_comments_leave_score_unchanged(
        initial in 0.0f64..=100.0,
        digits in "[0-9 ]{0,40}"
    ) {
        prop_assert_eq!(rerank(initial, &digits), initial);
    }

    #[test]
    fn all_negative_keywords_floor_at_zero(initial in 0.0f64..=100.0, filler in "[0-9 ]{0,10}") {
        let comments = NEGATIVE_KEYWORDS
            .iter()
            .map(|(keyword, _)| *keyword)
            .collect::<Vec<_>>()
            .join(&format!(" {} ", filler));
        prop_assert_eq!(rerank(initial, &comments), 0.0);
    }
}

// Property: Validation never panics and enforces ranges
proptest! {
    #[test]
    fn validation_never_panics(credit in any::<i64>(), income in any::<i64>(), email in "\\PC*") {
        let body = json!({
            "phone_number": "555",
            "email": email,
            "credit_score": credit,
            "age_group": "26-35",
            "family_background": "Single",
            "income": income,
            "comments": "",
            "consent": true
        });
        if let Ok(lead) = validate_submission(&body) {
            prop_assert!((300..=850).contains(&lead.credit_score));
            prop_assert!(lead.income >= 0);
        }
    }
}
