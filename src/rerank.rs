//! Keyword-driven re-ranking of initial lead scores.
//!
//! The comments are lower-cased and each keyword is matched as a plain
//! substring. Matches are independent of each other, so "not interested"
//! also triggers "interested". Each keyword counts once no matter how often
//! it appears.

/// Keywords that signal purchase intent.
pub const POSITIVE_KEYWORDS: &[(&str, i32)] = &[
    ("urgent", 15),
    ("interested", 10),
    ("ready", 12),
    ("buy", 20),
    ("purchase", 18),
    ("need", 8),
    ("want", 8),
    ("asap", 15),
    ("immediately", 12),
    ("soon", 10),
    ("hot", 15),
    ("qualified", 12),
];

/// Keywords that signal hesitation or low quality.
pub const NEGATIVE_KEYWORDS: &[(&str, i32)] = &[
    ("not interested", -20),
    ("maybe", -5),
    ("later", -8),
    ("thinking", -3),
    ("unsure", -10),
    ("budget", -5),
    ("expensive", -12),
    ("cheap", -8),
    ("free", -10),
    ("spam", -25),
    ("unsubscribe", -30),
];

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Keywords found in a comment, with their weights, in table order.
pub fn matched_keywords(comments: &str) -> Vec<(&'static str, i32)> {
    let lowered = comments.to_lowercase();

    POSITIVE_KEYWORDS
        .iter()
        .chain(NEGATIVE_KEYWORDS.iter())
        .filter(|(keyword, _)| lowered.contains(keyword))
        .copied()
        .collect()
}

/// Sum of the weights of every keyword found in the comment.
pub fn keyword_adjustment(comments: &str) -> i32 {
    matched_keywords(comments)
        .iter()
        .map(|(_, weight)| weight)
        .sum()
}

/// Applies the keyword adjustment to `initial_score` and clamps the result
/// to [0, 100].
pub fn rerank(initial_score: f64, comments: &str) -> f64 {
    let adjustment = keyword_adjustment(comments);

    if adjustment != 0 {
        tracing::debug!(
            "Re-ranking adjusted {:.2} by {:+}",
            initial_score,
            adjustment
        );
    }

    (initial_score + f64::from(adjustment)).clamp(MIN_SCORE, MAX_SCORE)
}
