use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::infrastructure::http::{RetryPolicy, send_with_retry};
use crate::infrastructure::observability::sanitize_prompt;

pub const DEFAULT_MAX_TOKENS: usize = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Which OpenAI-compatible endpoint family the backend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmApiMode {
    Chat,
    Completion,
}

impl LlmApiMode {
    fn path(&self) -> &'static str {
        match self {
            Self::Chat => "chat/completions",
            Self::Completion => "completions",
        }
    }
}

impl TryFrom<String> for LlmApiMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "chat" => Ok(Self::Chat),
            "completion" | "completions" => Ok(Self::Completion),
            other => Err(format!(
                "{other} is not a supported llm api mode. Use either `chat` or `completion`."
            )),
        }
    }
}

pub struct OpenAiCompatibleClient {
    client: Client,
    provider: String,
    base_url: String,
    api_key: Option<String>,
    model: String,
    mode: LlmApiMode,
    max_tokens: usize,
    temperature: f32,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

impl OpenAiCompatibleClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, mode: LlmApiMode) -> Self {
        Self::with_timeout(base_url, model, api_key, mode, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        mode: LlmApiMode,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            provider: "openai".to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.to_string(),
            mode,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_provider(mut self, provider: &str) -> Self {
        self.provider = provider.to_lowercase();
        self
    }

    pub fn with_sampling(mut self, max_tokens: usize, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            None => request,
            Some(key) if self.provider == "azure" => request.header("api-key", key),
            Some(key) => request.bearer_auth(key),
        }
    }

    fn build_request(&self, prompt: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, self.mode.path());
        let request = self.client.post(url);
        let request = match self.mode {
            LlmApiMode::Chat => request.json(&ChatCompletionRequest {
                model: &self.model,
                messages: vec![ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                }],
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            }),
            LlmApiMode::Completion => request.json(&CompletionRequest {
                model: &self.model,
                prompt,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            }),
        };
        self.apply_auth(request)
    }

    fn first_answer(&self, body: &str) -> Result<String, LlmClientError> {
        let answer = match self.mode {
            LlmApiMode::Chat => serde_json::from_str::<ChatCompletionResponse>(body)
                .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content),
            LlmApiMode::Completion => serde_json::from_str::<CompletionResponse>(body)
                .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.text),
        };
        answer.ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatibleClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, mode = ?self.mode))]
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        tracing::debug!(prompt = %sanitize_prompt(prompt), "Sending completion request");

        let response = send_with_retry(self.build_request(prompt), &self.retry)
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;
        self.first_answer(&body)
    }
}
