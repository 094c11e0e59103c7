//! Config schema and deserialization

use crate::analyzer::{Evaluator, Thresholds, Weights};
use crate::{parse_criteria, Criterion, MAX_PROMPT_CHARS};
use serde::Deserialize;
use std::collections::HashMap;

/// Root config structure for .promptcheckrc.json
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Minimum score threshold (exit 1 if below). Default: none
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Criteria to evaluate (kebab-case ids). Empty means all five.
    #[serde(default)]
    pub criteria: Vec<String>,

    /// Per-criterion weight overrides. Unlisted criteria weigh 1.0.
    #[serde(default)]
    pub weights: HashMap<String, f64>,

    /// Criterion score at or above which a strength is reported (default 75)
    #[serde(default)]
    pub strength_threshold: Option<u8>,

    /// Criterion score below which an improvement is reported (default 50)
    #[serde(default)]
    pub improvement_threshold: Option<u8>,

    /// Truncation cap in characters (default 10000)
    #[serde(default)]
    pub max_prompt_length: Option<usize>,

    /// Whether to synthesize an improved prompt (default true)
    #[serde(default)]
    pub rewrite: Option<bool>,

    /// Model for LLM-assisted evaluation
    #[serde(default)]
    pub model: Option<String>,

    /// Glob patterns for files/directories to exclude in batch mode
    #[serde(default)]
    pub ignore: Vec<String>,

    /// File patterns treated as prompts in batch mode
    /// (default: *.prompt, *.txt, *.md)
    #[serde(default)]
    pub prompt_patterns: Vec<String>,
}

impl Config {
    /// CLI flags override config file values
    pub fn merge_with_cli(
        mut self,
        threshold: Option<u8>,
        criteria: &[String],
        no_rewrite: bool,
        model: Option<&str>,
    ) -> Self {
        if threshold.is_some() {
            self.threshold = threshold;
        }
        if !criteria.is_empty() {
            self.criteria = criteria.to_vec();
        }
        if no_rewrite {
            self.rewrite = Some(false);
        }
        if let Some(m) = model {
            self.model = Some(m.to_string());
        }
        self
    }

    /// Validate at the boundary, before anything reaches the scorer
    pub fn validate(&self) -> anyhow::Result<()> {
        let (_, errors) = parse_criteria(&self.criteria);
        if let Some(e) = errors.first() {
            anyhow::bail!("{}", e);
        }
        for name in self.weights.keys() {
            name.parse::<Criterion>()
                .map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        self.weights_table()?.validate().map_err(|e| anyhow::anyhow!(e))?;
        for (field, value) in [
            ("threshold", self.threshold),
            ("strengthThreshold", self.strength_threshold),
            ("improvementThreshold", self.improvement_threshold),
        ] {
            if let Some(v) = value {
                if v > 100 {
                    anyhow::bail!("{} must be between 0 and 100, got {}", field, v);
                }
            }
        }
        if self.max_prompt_length == Some(0) {
            anyhow::bail!("maxPromptLength must be greater than 0");
        }
        Ok(())
    }

    /// Criteria selected by this config (empty selection = all five)
    pub fn selected_criteria(&self) -> Vec<Criterion> {
        let (criteria, _) = parse_criteria(&self.criteria);
        if criteria.is_empty() {
            Criterion::ALL.to_vec()
        } else {
            criteria
        }
    }

    fn weights_table(&self) -> anyhow::Result<Weights> {
        let mut weights = Weights::equal();
        for (name, value) in &self.weights {
            let criterion = name
                .parse::<Criterion>()
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            weights.set(criterion, *value);
        }
        Ok(weights)
    }

    /// Build an evaluator from this config. Call [`Config::validate`]
    /// first; invalid weights or criterion names fail here too.
    pub fn evaluator(&self) -> anyhow::Result<Evaluator> {
        let thresholds = Thresholds {
            strength: self
                .strength_threshold
                .unwrap_or(crate::analyzer::scoring::DEFAULT_STRENGTH_THRESHOLD),
            improvement: self
                .improvement_threshold
                .unwrap_or(crate::analyzer::scoring::DEFAULT_IMPROVEMENT_THRESHOLD),
        };
        let mut evaluator = Evaluator::new()
            .with_criteria(&self.selected_criteria())
            .with_weights(self.weights_table()?)
            .with_thresholds(thresholds)
            .with_max_chars(self.max_prompt_length.unwrap_or(MAX_PROMPT_CHARS));
        if self.rewrite == Some(false) {
            evaluator = evaluator.without_rewrite();
        }
        Ok(evaluator)
    }

    /// Batch-mode file patterns, with defaults
    pub fn get_prompt_patterns(&self) -> Vec<String> {
        if self.prompt_patterns.is_empty() {
            vec![
                "*.prompt".to_string(),
                "*.txt".to_string(),
                "*.md".to_string(),
            ]
        } else {
            self.prompt_patterns.clone()
        }
    }
}
