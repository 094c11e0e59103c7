//! Constraints analyzer - numeric bounds, limiting keywords, scope

use super::{clamp_score, CriterionAnalyzer};
use crate::{Criterion, CriterionResult};
use regex::Regex;

const BASE: i32 = 20;
const NUMERIC_POINTS: i32 = 45;
const LIMIT_POINTS: i32 = 20;
const SCOPE_POINTS: i32 = 15;

/// Rule for scoring explicit limits placed on the response
pub struct ConstraintsAnalyzer {
    counted_unit: Regex,
    bounded_number: Regex,
    limiting: Regex,
    scope: Regex,
}

impl ConstraintsAnalyzer {
    pub fn new() -> Self {
        Self {
            counted_unit: Regex::new(
                r"(?i)\b\d+\s*(words?|items?|sentences?|paragraphs?|characters?|points?|steps?|examples?|lines?|bullets?)\b",
            )
            .unwrap(),
            bounded_number: Regex::new(
                r"(?i)\b(no more than|at least|at most|maximum|minimum|up to|fewer than|less than|under|within|between)\s+\d+",
            )
            .unwrap(),
            limiting: Regex::new(
                r"(?i)\b(only|must|should|limit|exclude|excluding|avoid|without|do not|don't|never|focus on|restrict)\b",
            )
            .unwrap(),
            scope: Regex::new(r"(?i)\b(current|recent|latest|modern|as of|since \d{4}|in \d{4}|(19|20)\d{2})\b")
                .unwrap(),
        }
    }

    fn numeric_bound<'a>(&self, prompt: &'a str) -> Option<&'a str> {
        self.counted_unit
            .find(prompt)
            .or_else(|| self.bounded_number.find(prompt))
            .map(|m| m.as_str())
    }
}

impl Default for ConstraintsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionAnalyzer for ConstraintsAnalyzer {
    fn criterion(&self) -> Criterion {
        Criterion::Constraints
    }

    fn evaluate(&self, prompt: &str) -> CriterionResult {
        let mut score = BASE;
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        match self.numeric_bound(prompt) {
            Some(text) => {
                score += NUMERIC_POINTS;
                matched.push(format!("quantified bound ('{}')", text));
            }
            None => missing.push("no word, item, or length limit".to_string()),
        }

        match self.limiting.find(prompt) {
            Some(m) => {
                score += LIMIT_POINTS;
                matched.push(format!("limiting keyword ('{}')", m.as_str()));
            }
            None => missing.push("no requirements or exclusions stated".to_string()),
        }

        if let Some(m) = self.scope.find(prompt) {
            score += SCOPE_POINTS;
            matched.push(format!("scoped in time ('{}')", m.as_str()));
        }

        CriterionResult {
            criterion: Criterion::Constraints,
            score: clamp_score(score),
            matched,
            missing,
        }
    }
}
