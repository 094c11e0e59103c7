//! Library-level behavior: rubric scenarios, composability, degradation.

use promptcheck::analyzer::{Evaluator, Thresholds, Weights};
use promptcheck::llm::{evaluate_with_llm, LlmBackend, LlmError};
use promptcheck::{evaluate_prompt, validate_prompt, Criterion, EvaluateError, Grade};

const VAGUE_PROMPT: &str = "Tell me about AI";
const STRONG_PROMPT: &str = "Explain the key concepts of artificial intelligence and its current \
                             applications in healthcare for a high school student, in a numbered \
                             list of 5 items";

// --- Scenario 1: vague prompt scores low ---

#[test]
fn vague_prompt_scores_low_overall() {
    let report = evaluate_prompt(VAGUE_PROMPT);
    assert!(
        report.score.value < 50,
        "expected low overall, got {}",
        report.score.value
    );
}

#[test]
fn vague_prompt_clarity_below_40() {
    let report = evaluate_prompt(VAGUE_PROMPT);
    let clarity = report.criterion(Criterion::Clarity).unwrap();
    assert!(clarity.score < 40, "clarity was {}", clarity.score);
}

#[test]
fn vague_prompt_gets_clarity_improvement_and_suggestion() {
    let report = evaluate_prompt(VAGUE_PROMPT);
    assert!(report
        .improvements
        .iter()
        .any(|i| i.starts_with("Clarity:")));
    assert!(report
        .suggestions
        .iter()
        .any(|s| s.contains("action verb")));
}

#[test]
fn vague_prompt_offers_a_rewrite() {
    let report = evaluate_prompt(VAGUE_PROMPT);
    let improved = report.improved_prompt.expect("rewrite expected");
    assert!(improved.len() > VAGUE_PROMPT.len());
}

// --- Scenario 2: well-formed prompt scores high ---

#[test]
fn strong_prompt_scores_at_least_75() {
    let report = evaluate_prompt(STRONG_PROMPT);
    assert!(
        report.score.value >= 75,
        "expected >= 75, got {}",
        report.score.value
    );
}

#[test]
fn strong_prompt_has_strengths_and_minimal_improvements() {
    let report = evaluate_prompt(STRONG_PROMPT);
    assert!(!report.strengths.is_empty());
    assert!(
        report.improvements.len() <= 1,
        "improvements: {:?}",
        report.improvements
    );
}

#[test]
fn strong_prompt_high_clarity_context_format() {
    let report = evaluate_prompt(STRONG_PROMPT);
    assert!(report.criterion(Criterion::Clarity).unwrap().score >= 75);
    assert!(report.criterion(Criterion::Context).unwrap().score >= 75);
    assert!(report.criterion(Criterion::Format).unwrap().score >= 75);
}

// --- Scenario 3: empty input ---

#[test]
fn empty_input_is_invalid_at_the_boundary() {
    assert_eq!(validate_prompt(""), Err(EvaluateError::InvalidInput));
}

#[test]
fn empty_input_report_is_zeroed_with_one_improvement() {
    let report = evaluate_prompt("");
    assert_eq!(report.score.value, 0);
    assert_eq!(report.score.grade, Grade::F);
    assert_eq!(report.improvements.len(), 1);
    assert!(report.criteria.iter().all(|r| r.score == 0));
}

// --- Scenario 4: LLM collaborator failure degrades ---

struct TimeoutBackend;
impl LlmBackend for TimeoutBackend {
    fn complete(&self, _instruction: &str) -> Result<String, LlmError> {
        Err(LlmError::RequestFailed("connection timed out".to_string()))
    }
}

#[test]
fn llm_timeout_degrades_without_propagating() {
    let evaluator = Evaluator::new();
    let report = evaluate_with_llm(VAGUE_PROMPT, &evaluator, &TimeoutBackend);
    assert!(report.degraded);
    assert_eq!(report.score, evaluator.evaluate(VAGUE_PROMPT).score);
}

#[test]
fn llm_junk_reply_degrades_without_propagating() {
    struct JunkBackend;
    impl LlmBackend for JunkBackend {
        fn complete(&self, _instruction: &str) -> Result<String, LlmError> {
            Ok("<html>502 Bad Gateway</html>".to_string())
        }
    }
    let report = evaluate_with_llm(VAGUE_PROMPT, &Evaluator::new(), &JunkBackend);
    assert!(report.degraded);
    assert!(!report.improvements.is_empty());
}

// --- Composability and selection ---

#[test]
fn subset_evaluation_only_reports_selected_criteria() {
    let report = Evaluator::new()
        .with_criteria(&[Criterion::Examples])
        .evaluate(STRONG_PROMPT);
    assert_eq!(report.criteria.len(), 1);
    assert_eq!(report.criteria[0].criterion, Criterion::Examples);
}

#[test]
fn combining_disjoint_subsets_equals_joint_evaluation() {
    for prompt in [VAGUE_PROMPT, STRONG_PROMPT] {
        let joint = Evaluator::new()
            .with_criteria(&[Criterion::Clarity, Criterion::Context])
            .evaluate(prompt);
        let a = Evaluator::new()
            .with_criteria(&[Criterion::Clarity])
            .evaluate(prompt);
        let b = Evaluator::new()
            .with_criteria(&[Criterion::Context])
            .evaluate(prompt);
        let combined = Evaluator::new()
            .with_criteria(&[Criterion::Clarity, Criterion::Context])
            .combine(prompt, &a, &b);
        assert_eq!(joint, combined, "composability failed for {:?}", prompt);
    }
}

#[test]
fn weights_shift_the_overall_score() {
    let balanced = Evaluator::new().evaluate(STRONG_PROMPT);
    // Examples is this prompt's weakest criterion; weighting it up drags
    // the overall down
    let weighted = Evaluator::new()
        .with_weights(Weights::equal().with(Criterion::Examples, 5.0))
        .evaluate(STRONG_PROMPT);
    assert!(weighted.score.value < balanced.score.value);
}

#[test]
fn custom_thresholds_change_feedback_lists() {
    let strict = Evaluator::new()
        .with_thresholds(Thresholds {
            strength: 95,
            improvement: 95,
        })
        .evaluate(STRONG_PROMPT);
    // Nearly everything is an improvement under a 95 cutoff
    assert!(strict.improvements.len() >= 3);
}

#[test]
fn evaluation_is_idempotent() {
    let evaluator = Evaluator::new();
    assert_eq!(
        evaluator.evaluate(STRONG_PROMPT),
        evaluator.evaluate(STRONG_PROMPT)
    );
}

#[test]
fn report_serializes_camel_case() {
    let report = evaluate_prompt(VAGUE_PROMPT);
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("improvedPrompt").is_some());
    assert!(json["stats"].get("truncated").is_some());
    assert_eq!(json["degraded"], false);
}
