//! Evaluation engine - orchestrates the criterion analyzers

use crate::rewriter;
use crate::{
    Criterion, CriterionResult, FeedbackReport, PromptStats, Score, MAX_PROMPT_CHARS,
};

use super::criteria::analyzer_for;
use super::scoring::{merge_results, ScoreCalculator, Thresholds, Weights};

/// Main evaluator that runs the selected criterion analyzers and
/// aggregates their results into a [`FeedbackReport`].
///
/// The evaluator is stateless per call: it holds configuration only, and
/// two calls with the same input produce identical reports.
pub struct Evaluator {
    criteria: Vec<Criterion>,
    weights: Weights,
    thresholds: Thresholds,
    rewrite: bool,
    max_chars: usize,
}

impl Evaluator {
    /// All five criteria, equal weights, rewriting enabled
    pub fn new() -> Self {
        Self {
            criteria: Criterion::ALL.to_vec(),
            weights: Weights::equal(),
            thresholds: Thresholds::default(),
            rewrite: true,
            max_chars: MAX_PROMPT_CHARS,
        }
    }

    /// Restrict evaluation to a subset of criteria. An empty selection
    /// falls back to all five. Selection order does not matter; results
    /// always come out in canonical order.
    pub fn with_criteria(mut self, criteria: &[Criterion]) -> Self {
        let mut selected: Vec<Criterion> = Vec::new();
        for c in criteria {
            if !selected.contains(c) {
                selected.push(*c);
            }
        }
        if selected.is_empty() {
            selected = Criterion::ALL.to_vec();
        }
        selected.sort();
        self.criteria = selected;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Disable improved-prompt synthesis
    pub fn without_rewrite(mut self) -> Self {
        self.rewrite = false;
        self
    }

    /// Override the truncation cap (mainly for tests)
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Criteria this evaluator runs, in canonical order
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Evaluate a prompt. Never fails: empty input yields a zeroed report
    /// with a single improvement entry, and over-long input is truncated
    /// deterministically before analysis.
    pub fn evaluate(&self, prompt: &str) -> FeedbackReport {
        let (text, truncated) = self.truncate(prompt);
        if text.trim().is_empty() {
            return self.invalid_input_report(&text, truncated);
        }

        let results: Vec<CriterionResult> = self
            .criteria
            .iter()
            .map(|&c| analyzer_for(c).evaluate(&text))
            .collect();
        let stats = PromptStats::of(&text, truncated);

        self.build_report(&text, results, stats, false)
    }

    /// Combine two reports over the same prompt into one, as if their
    /// criterion sets had been evaluated together. Duplicate criteria keep
    /// the first report's result.
    pub fn combine(
        &self,
        prompt: &str,
        a: &FeedbackReport,
        b: &FeedbackReport,
    ) -> FeedbackReport {
        let (text, truncated) = self.truncate(prompt);
        let results = merge_results(&a.criteria, &b.criteria);
        let stats = PromptStats::of(&text, truncated);
        self.build_report(&text, results, stats, a.degraded || b.degraded)
    }

    /// Aggregate statistics across a batch of reports
    pub fn aggregate_stats(results: &[FeedbackReport]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats {
                prompts_evaluated: 0,
                average_score: Score::new(0),
                total_improvements: 0,
            };
        }
        let sum: u32 = results.iter().map(|r| r.score.value as u32).sum();
        let average = (sum as f64 / results.len() as f64).round() as u8;
        AggregateStats {
            prompts_evaluated: results.len(),
            average_score: Score::new(average),
            total_improvements: results.iter().map(|r| r.improvements.len()).sum(),
        }
    }

    fn truncate(&self, prompt: &str) -> (String, bool) {
        if prompt.chars().count() > self.max_chars {
            (prompt.chars().take(self.max_chars).collect(), true)
        } else {
            (prompt.to_string(), false)
        }
    }

    fn build_report(
        &self,
        text: &str,
        results: Vec<CriterionResult>,
        stats: PromptStats,
        degraded: bool,
    ) -> FeedbackReport {
        let score = ScoreCalculator::overall(&results, &self.weights);
        let strengths = ScoreCalculator::strengths(&results, &self.thresholds);
        let improvements = ScoreCalculator::improvements(&results, &self.thresholds);
        let suggestions = ScoreCalculator::suggestions(&results, &self.thresholds);
        let improved_prompt = if self.rewrite {
            rewriter::rewrite_prompt(text, &results, &self.thresholds)
        } else {
            None
        };

        FeedbackReport {
            score,
            criteria: results,
            strengths,
            improvements,
            suggestions,
            improved_prompt,
            degraded,
            stats,
        }
    }

    fn invalid_input_report(&self, text: &str, truncated: bool) -> FeedbackReport {
        let criteria = self
            .criteria
            .iter()
            .map(|&criterion| CriterionResult {
                criterion,
                score: 0,
                matched: Vec::new(),
                missing: vec!["nothing to analyze".to_string()],
            })
            .collect();

        FeedbackReport {
            score: Score::new(0),
            criteria,
            strengths: Vec::new(),
            improvements: vec!["Prompt is empty or contains only whitespace".to_string()],
            suggestions: vec!["Provide a prompt describing what you want".to_string()],
            improved_prompt: None,
            degraded: false,
            stats: PromptStats::of(text, truncated),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics for a batch evaluation
#[derive(Debug, Clone)]
pub struct AggregateStats {
    pub prompts_evaluated: usize,
    pub average_score: Score,
    pub total_improvements: usize,
}
