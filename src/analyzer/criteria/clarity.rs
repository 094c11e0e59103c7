//! Clarity analyzer - instruction verbs, specificity, vague wording

use super::{clamp_score, CriterionAnalyzer};
use crate::{Criterion, CriterionResult};
use regex::Regex;

const BASE: i32 = 15;
const OPENER_POINTS: i32 = 35;
const DETAIL_POINTS: i32 = 20;
const DOMAIN_TERM_POINTS: i32 = 10;
const NO_VAGUE_POINTS: i32 = 20;
const VAGUE_PENALTY: i32 = 10;

/// Words that open a clear request. Deliberately excludes conversational
/// openers like "tell" - "Tell me about X" is not a specific instruction.
const INSTRUCTION_VERBS: &[&str] = &[
    "explain",
    "describe",
    "list",
    "summarize",
    "analyze",
    "compare",
    "write",
    "generate",
    "create",
    "translate",
    "define",
    "outline",
    "evaluate",
    "classify",
    "identify",
    "draft",
    "recommend",
    "calculate",
    "convert",
    "review",
];

const INTERROGATIVES: &[&str] = &["what", "how", "why", "when", "where", "which", "who"];

/// Minimum word count for a prompt to count as having a detailed subject
const DETAIL_MIN_WORDS: usize = 8;
/// Minimum alphabetic length for a word to count as a domain term
const DOMAIN_TERM_MIN_CHARS: usize = 10;

/// Rule for scoring how clear and specific the request is
pub struct ClarityAnalyzer {
    vague: Regex,
}

impl ClarityAnalyzer {
    pub fn new() -> Self {
        Self {
            vague: Regex::new(r"(?i)\b(thing|things|stuff|something|etc|and so on)\b").unwrap(),
        }
    }

    /// Find an instruction verb or interrogative in the first few words
    fn opener(prompt: &str) -> Option<String> {
        for (i, word) in prompt.split_whitespace().take(3).enumerate() {
            let cleaned: String = word
                .chars()
                .filter(|c| c.is_alphabetic())
                .collect::<String>()
                .to_lowercase();
            if INSTRUCTION_VERBS.contains(&cleaned.as_str()) {
                return Some(cleaned);
            }
            // Interrogatives only count as the very first word
            if i == 0 && INTERROGATIVES.contains(&cleaned.as_str()) {
                return Some(cleaned);
            }
        }
        None
    }

    /// Longest word made of >= DOMAIN_TERM_MIN_CHARS alphabetic chars
    fn domain_term(prompt: &str) -> Option<&str> {
        prompt
            .split_whitespace()
            .find(|w| w.chars().filter(|c| c.is_alphabetic()).count() >= DOMAIN_TERM_MIN_CHARS)
    }
}

impl Default for ClarityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionAnalyzer for ClarityAnalyzer {
    fn criterion(&self) -> Criterion {
        Criterion::Clarity
    }

    fn evaluate(&self, prompt: &str) -> CriterionResult {
        let mut score = BASE;
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        match Self::opener(prompt) {
            Some(verb) => {
                score += OPENER_POINTS;
                matched.push(format!("opens with an instruction word ('{}')", verb));
            }
            None => missing.push("no action verb at the start".to_string()),
        }

        if prompt.split_whitespace().count() >= DETAIL_MIN_WORDS {
            score += DETAIL_POINTS;
            matched.push("detailed subject (8+ words)".to_string());
        } else {
            missing.push("subject is too brief to pin down".to_string());
        }

        if let Some(term) = Self::domain_term(prompt) {
            score += DOMAIN_TERM_POINTS;
            matched.push(format!(
                "specific terminology ('{}')",
                term.trim_matches(|c: char| !c.is_alphanumeric())
            ));
        }

        match self.vague.find(prompt) {
            None => {
                score += NO_VAGUE_POINTS;
            }
            Some(m) => {
                score -= VAGUE_PENALTY;
                missing.push(format!("vague wording ('{}')", m.as_str()));
            }
        }

        CriterionResult {
            criterion: Criterion::Clarity,
            score: clamp_score(score),
            matched,
            missing,
        }
    }
}
