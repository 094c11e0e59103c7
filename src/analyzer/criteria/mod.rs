//! Criterion analyzers - one pure rule per rubric dimension

pub mod clarity;
pub mod constraints;
pub mod context;
pub mod examples;
pub mod format;

pub use clarity::ClarityAnalyzer;
pub use constraints::ConstraintsAnalyzer;
pub use context::ContextAnalyzer;
pub use examples::ExamplesAnalyzer;
pub use format::FormatAnalyzer;

use crate::{Criterion, CriterionResult};

/// Trait for criterion analyzers.
///
/// Implementations are pure functions of the prompt string: no I/O, no
/// shared state, deterministic output, total over any input (empty,
/// non-ASCII, already-truncated text all score without panicking).
pub trait CriterionAnalyzer {
    /// The criterion this analyzer scores
    fn criterion(&self) -> Criterion;

    /// Score the prompt and return matched/missing evidence
    fn evaluate(&self, prompt: &str) -> CriterionResult;
}

/// Fixed strategy table: criterion identifier -> analyzer. Resolved at
/// startup, no runtime reflection.
pub fn analyzer_for(criterion: Criterion) -> Box<dyn CriterionAnalyzer> {
    match criterion {
        Criterion::Clarity => Box::new(ClarityAnalyzer::new()),
        Criterion::Context => Box::new(ContextAnalyzer::new()),
        Criterion::Constraints => Box::new(ConstraintsAnalyzer::new()),
        Criterion::Examples => Box::new(ExamplesAnalyzer::new()),
        Criterion::Format => Box::new(FormatAnalyzer::new()),
    }
}

/// Clamp an additive signal total into the 0-100 score range
pub(crate) fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}
