//! LLM-assisted evaluation - an external collaborator with heuristic fallback
//!
//! The scorer never depends on the collaborator succeeding: any transport
//! or shape failure degrades to the heuristic report with `degraded: true`.

pub mod claude;
pub mod payload;

pub use claude::{is_ai_available, ClaudeClient, LlmError};
pub use payload::{build_instruction, parse_reply, LlmFeedback};

use crate::analyzer::Evaluator;
use crate::{FeedbackReport, Score};

/// Text-completion seam. [`ClaudeClient`] is the production implementation;
/// tests inject stubs to exercise the degraded path.
pub trait LlmBackend {
    fn complete(&self, instruction: &str) -> Result<String, LlmError>;
}

/// Evaluate with LLM assistance. The heuristic report is always computed
/// first; a successfully parsed reply replaces the score and feedback
/// lists, while any failure returns the heuristic report marked degraded.
pub fn evaluate_with_llm(
    prompt: &str,
    evaluator: &Evaluator,
    backend: &dyn LlmBackend,
) -> FeedbackReport {
    let heuristic = evaluator.evaluate(prompt);
    if prompt.trim().is_empty() {
        // Nothing for the model to improve on
        return heuristic;
    }

    let instruction = payload::build_instruction(prompt, evaluator.criteria());
    let reply = match backend.complete(&instruction) {
        Ok(reply) => reply,
        Err(_) => return degraded(heuristic),
    };

    match payload::parse_reply(&reply) {
        Some(feedback) => apply_feedback(heuristic, feedback),
        None => degraded(heuristic),
    }
}

fn degraded(mut report: FeedbackReport) -> FeedbackReport {
    report.degraded = true;
    report
}

/// Overlay parsed LLM feedback on the heuristic report. Criterion results
/// and stats stay heuristic; score and the feedback lists come from the
/// model (the rewrite only when the model supplied one).
fn apply_feedback(mut report: FeedbackReport, feedback: LlmFeedback) -> FeedbackReport {
    report.score = Score::new(feedback.clamped_score());
    report.strengths = feedback.strengths;
    report.improvements = feedback.weaknesses;
    report.suggestions = feedback.suggestions;
    if let Some(improved) = feedback.improved_prompt {
        if !improved.trim().is_empty() {
            report.improved_prompt = Some(improved);
        }
    }
    report.degraded = false;
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend;
    impl LlmBackend for FailingBackend {
        fn complete(&self, _instruction: &str) -> Result<String, LlmError> {
            Err(LlmError::RequestFailed("simulated timeout".to_string()))
        }
    }

    struct CannedBackend(String);
    impl LlmBackend for CannedBackend {
        fn complete(&self, _instruction: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn backend_failure_degrades_to_heuristics() {
        let evaluator = Evaluator::new();
        let report = evaluate_with_llm("Tell me about AI", &evaluator, &FailingBackend);
        assert!(report.degraded);
        // Heuristic content survives
        assert!(!report.improvements.is_empty());
        assert_eq!(report.score, evaluator.evaluate("Tell me about AI").score);
    }

    #[test]
    fn malformed_reply_degrades_to_heuristics() {
        let evaluator = Evaluator::new();
        let backend = CannedBackend("I would rate this prompt quite highly!".to_string());
        let report = evaluate_with_llm("Tell me about AI", &evaluator, &backend);
        assert!(report.degraded);
    }

    #[test]
    fn parsed_reply_replaces_score_and_lists() {
        let evaluator = Evaluator::new();
        let backend = CannedBackend(
            r#"{"score": 88, "strengths": ["direct"], "weaknesses": [], "suggestions": ["add a format"], "improvedPrompt": "Explain AI in 3 bullet points."}"#
                .to_string(),
        );
        let report = evaluate_with_llm("Tell me about AI", &evaluator, &backend);
        assert!(!report.degraded);
        assert_eq!(report.score.value, 88);
        assert_eq!(report.strengths, vec!["direct".to_string()]);
        assert_eq!(
            report.improved_prompt.as_deref(),
            Some("Explain AI in 3 bullet points.")
        );
        // Heuristic criterion results are kept for transparency
        assert_eq!(report.criteria.len(), 5);
    }

    #[test]
    fn empty_prompt_skips_backend() {
        struct PanickingBackend;
        impl LlmBackend for PanickingBackend {
            fn complete(&self, _instruction: &str) -> Result<String, LlmError> {
                panic!("backend must not be called for empty input");
            }
        }
        let report = evaluate_with_llm("   ", &Evaluator::new(), &PanickingBackend);
        assert_eq!(report.score.value, 0);
    }
}
