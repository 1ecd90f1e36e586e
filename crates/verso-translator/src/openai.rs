use async_trait::async_trait;
use serde::Deserialize;

use crate::{CompletionProvider, CompletionRequest, ProviderMetadata, TranslateError};

#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        tracing::debug!(
            "Sending completion request: model={}, {} messages",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        let raw = response.text().await?;
        tracing::debug!("Raw completion response: {}", raw);

        if !status.is_success() {
            return Err(TranslateError::ApiError(format!("HTTP {} - {}", status, raw)));
        }

        extract_content(&raw)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            requires_api_key: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a chat completion body
pub(crate) fn extract_content(raw: &str) -> Result<String, TranslateError> {
    let completion: ChatCompletion = serde_json::from_str(raw)
        .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or(TranslateError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let raw = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"[{\"ID\":\"1\",\"translatedText\":\"Hei\"}]"}}]}"#;
        let content = extract_content(raw).unwrap();
        assert_eq!(content, r#"[{"ID":"1","translatedText":"Hei"}]"#);
    }

    #[test]
    fn test_extract_content_without_choices() {
        let result = extract_content(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(TranslateError::EmptyResponse)));

        let result = extract_content(r#"{"choices":[{"message":null}]}"#);
        assert!(matches!(result, Err(TranslateError::EmptyResponse)));
    }

    #[test]
    fn test_extract_content_garbage_body() {
        let result = extract_content("<html>bad gateway</html>");
        assert!(matches!(result, Err(TranslateError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_network() {
        let client = OpenAiClient::new(String::new(), "http://127.0.0.1:9".to_string());
        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![],
        };
        let result = client.complete(&request).await;
        assert!(matches!(result, Err(TranslateError::AuthenticationError)));
    }
}
