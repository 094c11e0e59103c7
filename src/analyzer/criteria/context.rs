//! Context analyzer - audience, background, and role framing

use super::{clamp_score, CriterionAnalyzer};
use crate::{Criterion, CriterionResult};
use regex::Regex;

const BASE: i32 = 25;
const AUDIENCE_POINTS: i32 = 50;
const BACKGROUND_POINTS: i32 = 15;
const ROLE_POINTS: i32 = 10;

/// Rule for scoring how much framing the prompt gives the model
pub struct ContextAnalyzer {
    audience: Regex,
    background: Regex,
    role: Regex,
}

impl ContextAnalyzer {
    pub fn new() -> Self {
        Self {
            audience: Regex::new(
                r"(?i)\b(for a|for an|for my|aimed at|audience|beginner|expert|student|high school|college|non-technical|layperson|as a)\b",
            )
            .unwrap(),
            background: Regex::new(
                r"(?i)\b(given that|assuming|background|context|considering|taking into account|based on)\b",
            )
            .unwrap(),
            role: Regex::new(r"(?i)\b(you are|act as|imagine you|pretend you)\b").unwrap(),
        }
    }
}

impl Default for ContextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionAnalyzer for ContextAnalyzer {
    fn criterion(&self) -> Criterion {
        Criterion::Context
    }

    fn evaluate(&self, prompt: &str) -> CriterionResult {
        let mut score = BASE;
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        match self.audience.find(prompt) {
            Some(m) => {
                score += AUDIENCE_POINTS;
                matched.push(format!("names an audience ('{}')", m.as_str()));
            }
            None => missing.push("no audience named".to_string()),
        }

        match self.background.find(prompt) {
            Some(m) => {
                score += BACKGROUND_POINTS;
                matched.push(format!("supplies background ('{}')", m.as_str()));
            }
            None => missing.push("no background or situation given".to_string()),
        }

        if let Some(m) = self.role.find(prompt) {
            score += ROLE_POINTS;
            matched.push(format!("frames a role ('{}')", m.as_str()));
        }

        CriterionResult {
            criterion: Criterion::Context,
            score: clamp_score(score),
            matched,
            missing,
        }
    }
}
