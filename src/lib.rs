//! Promptcheck: Prompt Quality Analyzer for LLM prompts
//!
//! This library provides heuristic analysis of natural-language prompts
//! against a fixed rubric (clarity, context, constraints, examples, format)
//! and produces a score, strengths, improvements, suggestions, and an
//! optional rewritten prompt. No external model is consulted in heuristic
//! mode; the optional LLM-assisted mode lives in [`llm`].

pub mod analyzer;
pub mod config;
pub mod history;
pub mod llm;
pub mod reporter;
pub mod rewriter;
pub mod watcher;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum prompt length in characters. Longer input is truncated
/// deterministically on a char boundary before analysis.
pub const MAX_PROMPT_CHARS: usize = 10_000;

/// One rubric dimension used to judge a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Clarity,
    Context,
    Constraints,
    Examples,
    Format,
}

impl Criterion {
    /// All criteria in canonical order. Evaluation and report rendering
    /// always follow this order, regardless of selection order.
    pub const ALL: [Criterion; 5] = [
        Criterion::Clarity,
        Criterion::Context,
        Criterion::Constraints,
        Criterion::Examples,
        Criterion::Format,
    ];

    /// Human-readable label for console output
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Clarity => "Clarity",
            Criterion::Context => "Context",
            Criterion::Constraints => "Constraints",
            Criterion::Examples => "Examples",
            Criterion::Format => "Format",
        }
    }

    /// One-line rubric description (used in LLM instruction payloads)
    pub fn rubric_line(&self) -> &'static str {
        match self {
            Criterion::Clarity => "clarity (is the request clear and specific)",
            Criterion::Context => "context (does it provide necessary background or audience)",
            Criterion::Constraints => "constraints (does it specify limits or requirements)",
            Criterion::Examples => "examples (does it include examples or sample data)",
            Criterion::Format => "format (does it specify the desired output format)",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Clarity => write!(f, "clarity"),
            Criterion::Context => write!(f, "context"),
            Criterion::Constraints => write!(f, "constraints"),
            Criterion::Examples => write!(f, "examples"),
            Criterion::Format => write!(f, "format"),
        }
    }
}

impl FromStr for Criterion {
    type Err = EvaluateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clarity" => Ok(Criterion::Clarity),
            "context" => Ok(Criterion::Context),
            "constraints" => Ok(Criterion::Constraints),
            "examples" => Ok(Criterion::Examples),
            "format" => Ok(Criterion::Format),
            other => Err(EvaluateError::UnknownCriterion(other.to_string())),
        }
    }
}

/// Errors surfaced at the evaluation boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluateError {
    /// Prompt is empty or whitespace-only
    #[error("prompt is empty or whitespace-only")]
    InvalidInput,
    /// A requested criterion name is not part of the rubric
    #[error("unknown criterion: {0}")]
    UnknownCriterion(String),
}

/// Validate a prompt before evaluation. [`analyzer::Evaluator::evaluate`]
/// never fails on bad input (it returns a zeroed report instead); callers
/// that want a hard failure check here first.
pub fn validate_prompt(prompt: &str) -> Result<(), EvaluateError> {
    if prompt.trim().is_empty() {
        Err(EvaluateError::InvalidInput)
    } else {
        Ok(())
    }
}

/// Parse criterion names, keeping the valid ones. Unknown names are
/// returned as errors without aborting the rest, so evaluation of the
/// remaining valid criteria continues.
pub fn parse_criteria(names: &[String]) -> (Vec<Criterion>, Vec<EvaluateError>) {
    let mut criteria = Vec::new();
    let mut errors = Vec::new();
    for name in names {
        match name.parse::<Criterion>() {
            Ok(c) => {
                if !criteria.contains(&c) {
                    criteria.push(c);
                }
            }
            Err(e) => errors.push(e),
        }
    }
    criteria.sort();
    (criteria, errors)
}

/// Quality score with grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Numeric score (0-100)
    pub value: u8,
    /// Letter grade (A-F)
    pub grade: Grade,
}

impl Score {
    pub fn new(value: u8) -> Self {
        let grade = Grade::from_score(value);
        Self { value, grade }
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=100 => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Outcome of a single criterion analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionResult {
    /// The criterion this result belongs to
    pub criterion: Criterion,
    /// Deterministic score (0-100)
    pub score: u8,
    /// Textual evidence found in the prompt
    pub matched: Vec<String>,
    /// Signals the analyzer looked for but did not find
    pub missing: Vec<String>,
}

/// Surface statistics about the analyzed prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptStats {
    /// Whitespace-separated word count (after truncation)
    pub words: usize,
    /// Character count (after truncation)
    pub chars: usize,
    /// Sentence count (split on `.`, `!`, `?`)
    pub sentences: usize,
    /// True when the input exceeded [`MAX_PROMPT_CHARS`] and was truncated
    pub truncated: bool,
}

impl PromptStats {
    pub fn of(prompt: &str, truncated: bool) -> Self {
        Self {
            words: prompt.split_whitespace().count(),
            chars: prompt.chars().count(),
            sentences: prompt
                .split(['.', '!', '?'])
                .filter(|s| !s.trim().is_empty())
                .count(),
            truncated,
        }
    }
}

/// The main result of evaluating a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    /// Overall quality score (weighted mean of criterion scores)
    pub score: Score,
    /// Per-criterion results, in canonical criterion order
    pub criteria: Vec<CriterionResult>,
    /// Criteria that scored well, rendered from matched signals
    pub strengths: Vec<String>,
    /// Criteria that scored poorly, rendered from missing signals
    pub improvements: Vec<String>,
    /// One concrete rewrite hint per improvement (fixed templates)
    pub suggestions: Vec<String>,
    /// Mechanically improved prompt, absent when nothing scored low
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_prompt: Option<String>,
    /// True when an LLM-assisted evaluation fell back to heuristics
    #[serde(default)]
    pub degraded: bool,
    /// Statistics about the prompt
    pub stats: PromptStats,
}

impl FeedbackReport {
    /// Look up the result for one criterion, if it was selected
    pub fn criterion(&self, criterion: Criterion) -> Option<&CriterionResult> {
        self.criteria.iter().find(|r| r.criterion == criterion)
    }
}

/// Public API: evaluate a prompt with all five criteria at equal weight.
/// Programmatic consumers that need criterion selection, custom weights, or
/// rewriting control use [`analyzer::Evaluator`] directly.
pub fn evaluate_prompt(prompt: &str) -> FeedbackReport {
    analyzer::Evaluator::new().evaluate(prompt)
}
