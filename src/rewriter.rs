//! Heuristic prompt rewriter - mechanical, deterministic improvements
//!
//! Appends missing structural elements based on low-scoring criteria. No
//! randomness and no external calls: identical input and results always
//! produce the identical rewrite.

use crate::analyzer::Thresholds;
use crate::{Criterion, CriterionResult};

/// Openers the rewriter will not prefix over
const OPENERS: &[&str] = &[
    "explain", "describe", "list", "summarize", "analyze", "compare", "write", "generate",
    "create", "translate", "define", "outline", "evaluate", "classify", "identify", "draft",
    "recommend", "calculate", "convert", "review", "what", "how", "why", "when", "where",
    "which", "who",
];

/// Fixed sentence appended for each low-scoring criterion, in canonical
/// criterion order. Clarity is handled by prefixing instead.
fn addition_for(criterion: Criterion) -> Option<&'static str> {
    match criterion {
        Criterion::Clarity => None,
        Criterion::Context => Some("Write it for a general audience."),
        Criterion::Constraints => Some("Keep the response under 200 words."),
        Criterion::Examples => Some("Include one concrete example, such as a sample input."),
        Criterion::Format => Some("Format your answer as a numbered list."),
    }
}

fn starts_with_opener(prompt: &str) -> bool {
    prompt
        .split_whitespace()
        .next()
        .map(|w| {
            let cleaned: String = w
                .chars()
                .filter(|c| c.is_alphabetic())
                .collect::<String>()
                .to_lowercase();
            OPENERS.contains(&cleaned.as_str())
        })
        .unwrap_or(false)
}

/// Synthesize an improved prompt from the original and its criterion
/// results. Returns `None` when no criterion scored below the improvement
/// threshold or when no mechanical change applies.
pub fn rewrite_prompt(
    prompt: &str,
    results: &[CriterionResult],
    thresholds: &Thresholds,
) -> Option<String> {
    let low: Vec<Criterion> = results
        .iter()
        .filter(|r| r.score < thresholds.improvement)
        .map(|r| r.criterion)
        .collect();
    if low.is_empty() {
        return None;
    }

    let mut improved = prompt.trim().to_string();
    if improved.is_empty() {
        return None;
    }
    let mut changed = false;

    // Clarity: prefix a fixed instruction verb when the prompt lacks one
    if low.contains(&Criterion::Clarity) && !starts_with_opener(&improved) {
        improved = format!("Explain {}", improved);
        changed = true;
    }

    // Terminal punctuation before appended sentences
    if !improved.ends_with(['.', '!', '?']) {
        improved.push('.');
        changed = true;
    }

    let mut ordered = low;
    ordered.sort();
    for criterion in ordered {
        if let Some(sentence) = addition_for(criterion) {
            improved.push(' ');
            improved.push_str(sentence);
            changed = true;
        }
    }

    if changed {
        Some(improved)
    } else {
        None
    }
}
