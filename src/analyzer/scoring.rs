//! Score aggregation for prompt quality

use crate::{Criterion, CriterionResult, Grade, Score};
use std::collections::HashMap;

/// Criterion scoring at or above this is rendered as a strength
pub const DEFAULT_STRENGTH_THRESHOLD: u8 = 75;
/// Criterion scoring below this is rendered as an improvement
pub const DEFAULT_IMPROVEMENT_THRESHOLD: u8 = 50;

/// Per-criterion weights for the overall score. Criteria without an
/// explicit entry weigh 1.0, so the default is an equal-weight mean.
#[derive(Debug, Clone, Default)]
pub struct Weights {
    map: HashMap<Criterion, f64>,
}

impl Weights {
    /// Equal weight for every criterion
    pub fn equal() -> Self {
        Self::default()
    }

    /// Builder-style weight override
    pub fn with(mut self, criterion: Criterion, weight: f64) -> Self {
        self.map.insert(criterion, weight);
        self
    }

    pub fn set(&mut self, criterion: Criterion, weight: f64) {
        self.map.insert(criterion, weight);
    }

    /// Weight for a criterion (1.0 unless overridden)
    pub fn get(&self, criterion: Criterion) -> f64 {
        self.map.get(&criterion).copied().unwrap_or(1.0)
    }

    /// Weights must be positive and finite. Zero or negative weight would
    /// silently drop a selected criterion; NaN would poison the mean.
    pub fn validate(&self) -> Result<(), String> {
        for (criterion, weight) in &self.map {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(format!("weight for '{}' must be a positive number", criterion));
            }
        }
        Ok(())
    }
}

/// Strength/improvement cutoffs
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub strength: u8,
    pub improvement: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH_THRESHOLD,
            improvement: DEFAULT_IMPROVEMENT_THRESHOLD,
        }
    }
}

/// Calculator for overall scores and derived feedback lists
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Weighted mean of criterion scores, rounded to the nearest integer
    /// and clamped to 0-100. Order of `results` does not matter.
    pub fn overall(results: &[CriterionResult], weights: &Weights) -> Score {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for r in results {
            let w = weights.get(r.criterion);
            weighted_sum += w * r.score as f64;
            weight_total += w;
        }
        if weight_total == 0.0 {
            return Score::new(0);
        }
        let value = (weighted_sum / weight_total).round().clamp(0.0, 100.0) as u8;
        Score::new(value)
    }

    /// Render strengths from criteria at or above the strength threshold
    pub fn strengths(results: &[CriterionResult], thresholds: &Thresholds) -> Vec<String> {
        results
            .iter()
            .filter(|r| r.score >= thresholds.strength)
            .map(|r| match r.matched.first() {
                Some(signal) => format!("{}: {}", r.criterion.label(), signal),
                None => format!("{}: well covered", r.criterion.label()),
            })
            .collect()
    }

    /// Render improvements from criteria below the improvement threshold
    pub fn improvements(results: &[CriterionResult], thresholds: &Thresholds) -> Vec<String> {
        results
            .iter()
            .filter(|r| r.score < thresholds.improvement)
            .map(|r| match r.missing.first() {
                Some(signal) => format!("{}: {}", r.criterion.label(), signal),
                None => format!("{}: needs attention", r.criterion.label()),
            })
            .collect()
    }

    /// One actionable hint per improving criterion, from fixed templates
    pub fn suggestions(results: &[CriterionResult], thresholds: &Thresholds) -> Vec<String> {
        results
            .iter()
            .filter(|r| r.score < thresholds.improvement)
            .map(|r| Self::suggestion_for(r.criterion).to_string())
            .collect()
    }

    /// Fixed rewrite hint for a criterion
    pub fn suggestion_for(criterion: Criterion) -> &'static str {
        match criterion {
            Criterion::Clarity => {
                "Start with a specific action verb like 'explain', 'describe', or 'list'"
            }
            Criterion::Context => "Add context about the target audience or situation",
            Criterion::Constraints => {
                "Add constraints such as length, scope, or specific requirements"
            }
            Criterion::Examples => "Include an example to show what you expect",
            Criterion::Format => {
                "Specify the desired output format (e.g. bullet points, numbered list, table)"
            }
        }
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - the prompt is specific, framed, and structured",
            Grade::B => "Good - the prompt is solid but has room for improvement",
            Grade::C => "Fair - the prompt will work but leaves the model guessing",
            Grade::D => "Poor - the prompt is missing most rubric signals",
            Grade::F => "Failing - the prompt needs to be rewritten",
        }
    }
}

/// Merge two disjoint sets of criterion results into canonical order.
/// Duplicated criteria keep the first occurrence, so merging is idempotent.
pub fn merge_results(a: &[CriterionResult], b: &[CriterionResult]) -> Vec<CriterionResult> {
    let mut merged: Vec<CriterionResult> = Vec::with_capacity(a.len() + b.len());
    for r in a.iter().chain(b.iter()) {
        if !merged.iter().any(|m| m.criterion == r.criterion) {
            merged.push(r.clone());
        }
    }
    merged.sort_by_key(|r| r.criterion);
    merged
}
