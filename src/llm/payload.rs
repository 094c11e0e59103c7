//! Instruction payload construction and defensive reply parsing

use crate::Criterion;
use serde::Deserialize;

/// Build the fixed instruction payload sent to the LLM collaborator. The
/// template embeds the rubric for the selected criteria and the user
/// prompt verbatim; it is the only wire content this crate defines.
pub fn build_instruction(prompt: &str, criteria: &[Criterion]) -> String {
    let rubric = criteria
        .iter()
        .map(|c| format!("- {}", c.rubric_line()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert prompt engineer. Evaluate the quality of the given prompt based on these criteria:
{rubric}

Provide a score from 0-100, list strengths, weaknesses, and specific suggestions for improvement. Also provide an improved version of the prompt.

Return your response as JSON in exactly this shape:
{{
    "score": <0-100>,
    "strengths": ["..."],
    "weaknesses": ["..."],
    "suggestions": ["..."],
    "improvedPrompt": "..."
}}

Prompt to evaluate: {prompt}"#
    )
}

/// Feedback shape expected back from the collaborator. Every field except
/// `score` is defaulted, so a sparse reply still parses; a reply without a
/// score is rejected and the caller falls back to heuristics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmFeedback {
    pub score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub improved_prompt: Option<String>,
}

impl LlmFeedback {
    /// Score clamped into 0-100, rounded to an integer
    pub fn clamped_score(&self) -> u8 {
        if self.score.is_finite() {
            self.score.round().clamp(0.0, 100.0) as u8
        } else {
            0
        }
    }
}

/// Parse a collaborator reply defensively. Accepts a fenced ```json block
/// or the first `{...}` span in free text; returns `None` on any shape
/// mismatch rather than trusting the external service.
pub fn parse_reply(reply: &str) -> Option<LlmFeedback> {
    let json = extract_json_block(reply)?;
    serde_json::from_str(json).ok()
}

/// Extract the JSON payload from a reply that may wrap it in prose or a
/// markdown fence
pub fn extract_json_block(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        if let Some(end) = rest.find("```") {
            return Some(rest[..end].trim());
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}
