//! OpenAI-compatible chat completions generator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{GatewayError, Generator, require_content};

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default API root; `/chat/completions` is appended.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// System message sent ahead of every brief.
pub const SYSTEM_PROMPT: &str = "\
You are an experienced professional communicator.
Write emails that feel written by a real person.
Avoid generic filler sentences.
Avoid textbook phrasing.
Make the email natural and context-aware.
Do not use placeholders.
";

/// Connection and sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl OpenAiSettings {
    /// Settings with the default model, endpoint and sampling parameters.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.9,
            max_tokens: 1000,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Generator backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiGenerator {
    settings: OpenAiSettings,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .finish()
    }
}

impl OpenAiGenerator {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    fn request_body<'a>(&'a self, brief: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: brief,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    async fn call_api(&self, brief: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.settings.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(brief))
            .send()
            .await
            .map_err(|e| GatewayError::Failed(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Failed(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(GatewayError::Failed(format!("HTTP {status}: {body}")));
        }

        extract_content(&body)
    }
}

/// Pull the first choice's content out of a chat completions response body.
fn extract_content(body: &str) -> Result<String, GatewayError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::Failed(format!("malformed response: {e}")))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::Failed("response contained no choices".to_string()))?;
    require_content(choice.message.content)
}

#[async_trait]
impl Generator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, brief: &str) -> Result<String, GatewayError> {
        info!(model = %self.settings.model, "requesting email generation");
        match self.call_api(brief).await {
            Ok(text) => {
                info!(chars = text.len(), "email generated");
                Ok(text)
            }
            Err(e) => {
                error!("generation failed: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let settings = OpenAiSettings::new("sk-test");
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.temperature, 0.9);
        assert_eq!(settings.max_tokens, 1000);
        assert_eq!(settings.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let settings = OpenAiSettings {
            base_url: "http://localhost:11434/v1/".to_string(),
            ..OpenAiSettings::new("k")
        };
        assert_eq!(settings.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn request_body_sends_brief_unchanged() {
        let generator = OpenAiGenerator::new(OpenAiSettings::new("sk-test"));
        let brief = "  Brief with\nnewlines  ";
        let body = serde_json::to_value(generator.request_body(brief)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], brief);
    }

    #[test]
    fn extract_content_returns_first_choice() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "Subject: Hi"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "Subject: Hi");
    }

    #[test]
    fn extract_content_null_is_empty() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        assert_eq!(extract_content(body), Err(GatewayError::Empty));
    }

    #[test]
    fn extract_content_without_choices_fails() {
        let err = extract_content(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, GatewayError::Failed(ref m) if m.contains("no choices")));
    }

    #[test]
    fn extract_content_malformed_fails() {
        let err = extract_content("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, GatewayError::Failed(ref m) if m.contains("malformed")));
    }

    #[test]
    fn debug_hides_api_key() {
        let generator = OpenAiGenerator::new(OpenAiSettings::new("sk-secret"));
        let debug = format!("{generator:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("gpt-4o-mini"));
    }
}
