//! Chat-Completion Client
//!
//! Minimal client for an OpenAI-compatible chat-completion endpoint.

use serde::{Deserialize, Serialize};

use crate::config::AssistConfig;
use crate::error::{AssistError, AssistResult};

/// One chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Chat-completion HTTP client
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatClient {
    /// Build a client from config; None when no API key is set
    pub fn from_config(config: &AssistConfig) -> Option<Self> {
        let api_key = config.api_key.clone().filter(|k| !k.is_empty())?;

        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    /// Run one chat completion and return the first choice's content
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> AssistResult<String> {
        let url = format!("{}chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
                temperature,
                max_tokens,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Upstream(format!(
                "upstream returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AssistError::Upstream("upstream returned no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        assert!(ChatClient::from_config(&AssistConfig::default()).is_none());
        assert!(ChatClient::from_config(&AssistConfig::with_api_key("key")).is_some());
    }

    #[test]
    fn test_request_shape() {
        let messages = [
            ChatMessage::system("sys"),
            ChatMessage::user("hello"),
        ];
        let request = ChatRequest {
            model: "openai/gpt-oss-120b",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 500,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "openai/gpt-oss-120b");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn test_response_parsing() {
        let body = serde_json::json!({
            "id": "cmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Try a loop."}}
            ],
            "usage": {"total_tokens": 10}
        });

        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Try a loop.");
    }
}
