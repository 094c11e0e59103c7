//! Format analyzer - output structure requests

use super::{clamp_score, CriterionAnalyzer};
use crate::{Criterion, CriterionResult};
use regex::Regex;

const BASE: i32 = 20;
const STRUCTURE_POINTS: i32 = 50;
const COUNTED_POINTS: i32 = 20;
const KEYWORD_POINTS: i32 = 10;

/// Rule for scoring whether the prompt names an output shape
pub struct FormatAnalyzer {
    structure: Regex,
    counted: Regex,
    keyword: Regex,
}

impl FormatAnalyzer {
    pub fn new() -> Self {
        Self {
            structure: Regex::new(
                r"(?i)\b(bullet points?|bulleted list|numbered list|numbered|table|headings?|sections?|json|yaml|markdown|csv|step[ -]by[ -]step|outline|checklist)\b",
            )
            .unwrap(),
            counted: Regex::new(
                r"(?i)\b\d+\s*(words?|items?|sentences?|paragraphs?|points?|steps?|bullets?|lines?|sections?)\b",
            )
            .unwrap(),
            keyword: Regex::new(r"(?i)\b(format|structure|style|output|return|respond with|in the form of)\b")
                .unwrap(),
        }
    }
}

impl Default for FormatAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionAnalyzer for FormatAnalyzer {
    fn criterion(&self) -> Criterion {
        Criterion::Format
    }

    fn evaluate(&self, prompt: &str) -> CriterionResult {
        let mut score = BASE;
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        match self.structure.find(prompt) {
            Some(m) => {
                score += STRUCTURE_POINTS;
                matched.push(format!("names a structure ('{}')", m.as_str()));
            }
            None => missing.push("no output structure requested".to_string()),
        }

        match self.counted.find(prompt) {
            Some(m) => {
                score += COUNTED_POINTS;
                matched.push(format!("counted output ('{}')", m.as_str()));
            }
            None => missing.push("no length or count for the output".to_string()),
        }

        if let Some(m) = self.keyword.find(prompt) {
            score += KEYWORD_POINTS;
            matched.push(format!("format keyword ('{}')", m.as_str()));
        }

        CriterionResult {
            criterion: Criterion::Format,
            score: clamp_score(score),
            matched,
            missing,
        }
    }
}
