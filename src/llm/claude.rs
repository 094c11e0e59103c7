//! Claude API integration for LLM-assisted prompt feedback
//!
//! Requires the `ai` feature to be enabled:
//! ```toml
//! promptcheck = { version = "0.4", features = ["ai"] }
//! ```

use super::LlmBackend;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Claude API client for LLM-assisted evaluation
#[allow(dead_code)]
pub struct ClaudeClient {
    api_key: String,
    model: String,
    base_url: String,
}

/// Error from the LLM collaborator boundary
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("ANTHROPIC_API_KEY environment variable not set")]
    NoApiKey,
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("rate limited - try again later")]
    RateLimited,
    #[error("API error: {0}")]
    ApiError(String),
}

impl ClaudeClient {
    /// Create a new client using ANTHROPIC_API_KEY from the environment
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| LlmError::NoApiKey)?;
        Ok(Self::with_key(api_key))
    }

    /// Create a client with a specific API key
    pub fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: API_URL.to_string(),
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Send an instruction to Claude and return the reply text
    #[cfg(feature = "ai")]
    pub fn send_request(&self, instruction: &str) -> Result<String, LlmError> {
        use serde_json::json;

        let client = reqwest::blocking::Client::new();

        let body = json!({
            "model": self.model,
            "max_tokens": 1024,
            "messages": [
                {
                    "role": "user",
                    "content": instruction
                }
            ]
        });

        let response = client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(LlmError::ApiError(format!("{}: {}", status, error_text)));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        json["content"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|item| item["text"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))
    }

    /// Stub implementation when the ai feature is disabled
    #[cfg(not(feature = "ai"))]
    pub fn send_request(&self, _instruction: &str) -> Result<String, LlmError> {
        Err(LlmError::RequestFailed(
            "AI feature not enabled. Rebuild with: cargo build --features ai".to_string(),
        ))
    }
}

impl LlmBackend for ClaudeClient {
    fn complete(&self, instruction: &str) -> Result<String, LlmError> {
        self.send_request(instruction)
    }
}

/// Check if the AI feature is available
pub fn is_ai_available() -> bool {
    cfg!(feature = "ai")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_api_key() {
        // Temporarily unset the key
        std::env::remove_var("ANTHROPIC_API_KEY");
        let result = ClaudeClient::from_env();
        assert!(matches!(result, Err(LlmError::NoApiKey)));
    }

    #[test]
    fn model_override() {
        let client = ClaudeClient::with_key("k".to_string()).model("claude-3-5-haiku-latest");
        assert_eq!(client.model, "claude-3-5-haiku-latest");
    }
}
