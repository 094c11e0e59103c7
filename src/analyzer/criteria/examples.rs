//! Examples analyzer - example markers and embedded sample data

use super::{clamp_score, CriterionAnalyzer};
use crate::{Criterion, CriterionResult};
use regex::Regex;

// Base sits at 40 rather than 20: not every prompt needs an example, so
// the absence of one is a mild gap, not a failure.
const BASE: i32 = 40;
const MARKER_POINTS: i32 = 50;
const SAMPLE_POINTS: i32 = 10;

/// Rule for scoring whether the prompt illustrates what it wants
pub struct ExamplesAnalyzer {
    marker: Regex,
    quoted: Regex,
    io_pair: Regex,
}

impl ExamplesAnalyzer {
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"(?i)(e\.g\.|for example|for instance|such as|as an illustration|\bsample\b)")
                .unwrap(),
            quoted: Regex::new(r#""[^"]{3,}""#).unwrap(),
            io_pair: Regex::new(r"(?i)\b(input|output)\s*:").unwrap(),
        }
    }

    fn literal_sample(&self, prompt: &str) -> Option<&'static str> {
        if prompt.contains("```") {
            Some("code block")
        } else if self.quoted.is_match(prompt) {
            Some("quoted sample")
        } else if self.io_pair.is_match(prompt) {
            Some("input/output pair")
        } else {
            None
        }
    }
}

impl Default for ExamplesAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionAnalyzer for ExamplesAnalyzer {
    fn criterion(&self) -> Criterion {
        Criterion::Examples
    }

    fn evaluate(&self, prompt: &str) -> CriterionResult {
        let mut score = BASE;
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        match self.marker.find(prompt) {
            Some(m) => {
                score += MARKER_POINTS;
                matched.push(format!("example marker ('{}')", m.as_str().trim()));
            }
            None => missing.push("no example marker (e.g., for example, such as)".to_string()),
        }

        match self.literal_sample(prompt) {
            Some(kind) => {
                score += SAMPLE_POINTS;
                matched.push(format!("embedded sample data ({})", kind));
            }
            None => missing.push("no sample data embedded".to_string()),
        }

        CriterionResult {
            criterion: Criterion::Examples,
            score: clamp_score(score),
            matched,
            missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(prompt: &str) -> u8 {
        ExamplesAnalyzer::new().evaluate(prompt).score
    }

    #[test]
    fn marker_raises_score() {
        let without = score("Explain polymorphism");
        let with = score("Explain polymorphism, for example with shapes and circles");
        assert!(with > without);
    }

    #[test]
    fn appending_marker_never_decreases() {
        let base = "Explain polymorphism";
        let appended = format!("{} for example, using shapes", base);
        assert!(score(&appended) >= score(base));
    }

    #[test]
    fn eg_abbreviation_detected() {
        let result = ExamplesAnalyzer::new().evaluate("Name some mammals, e.g. whales");
        assert!(result.matched.iter().any(|m| m.contains("e.g.")));
    }

    #[test]
    fn quoted_sample_detected() {
        let result =
            ExamplesAnalyzer::new().evaluate(r#"Rewrite this sentence: "the cat sat on the mat""#);
        assert!(result.matched.iter().any(|m| m.contains("quoted sample")));
    }

    #[test]
    fn io_pair_detected() {
        let result = ExamplesAnalyzer::new().evaluate("Input: 3, 5\nOutput: 8\nExplain the rule");
        assert!(result.matched.iter().any(|m| m.contains("input/output")));
    }

    #[test]
    fn marker_plus_sample_caps_at_100() {
        let s = score(r#"Classify these, for example "spam" vs "ham""#);
        assert_eq!(s, 100);
    }
}
