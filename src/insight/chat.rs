use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompt::{insight_prompt, SYSTEM_PROMPT};
use super::InsightRequester;
use crate::error::{Error, ErrorKind, Result};
use crate::model::CollectionInfo;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Bearer credential of the chat API. Never printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_url: String,
    pub api_key: ApiKey,
    pub model: String,
    pub system_prompt: String,
    pub timeout: Duration,
}

impl ChatConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            api_key,
            model: DEFAULT_MODEL.to_owned(),
            system_prompt: SYSTEM_PROMPT.to_owned(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Asks an OpenAI-compatible chat completion endpoint for the insight text.
pub struct ChatCompletionRequester {
    client: Client,
    config: ChatConfig,
}

impl ChatCompletionRequester {
    pub fn new(config: ChatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Configuration, "couldn't build HTTP client", e))?;
        Ok(Self { client, config })
    }

    fn request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

fn first_answer(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_owned())
        .ok_or_else(|| Error::new(ErrorKind::ExternalService, "chat response contained no answer"))
}

impl InsightRequester for ChatCompletionRequester {
    fn request_insight(&self, collections: &[CollectionInfo]) -> Result<String> {
        let prompt = insight_prompt(collections)?;
        debug!(
            "requesting insight from {} for {} collections",
            self.config.model,
            collections.len()
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(self.config.api_key.expose())
            .json(&self.request(&prompt))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<ChatResponse>())
            .map_err(|e| Error::external("chat completion request failed", e))?;

        first_answer(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_body() -> Result<()> {
        let requester = ChatCompletionRequester::new(ChatConfig::new(ApiKey::new("sk-test")))?;
        let body = serde_json::to_value(&requester.request("hello"))
            .map_err(|e| ("serialization failed", e))?;

        assert_eq!(
            body,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "hello"}
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn test_first_answer() -> Result<()> {
        let response: ChatResponse = serde_json::from_str(
            r#"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "  Useful for land use.\n"}}]}"#,
        )
        .map_err(|e| ("deserialization failed", e))?;

        assert_eq!(first_answer(response)?, "Useful for land use.");
        Ok(())
    }

    #[test]
    fn test_empty_answer_is_external_failure() {
        let tests = [
            r#"{"choices": []}"#,
            r#"{}"#,
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        ];

        for input in &tests {
            let response: ChatResponse = serde_json::from_str(input).unwrap();
            let err = first_answer(response).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ExternalService, "{}", input);
        }
    }

    #[test]
    fn test_api_key_is_redacted() {
        let config = ChatConfig::new(ApiKey::new("sk-secret"));
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }
}
