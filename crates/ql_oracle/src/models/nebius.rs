use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use ql_core::{Error, GenerationRequest, Result, TextOracle};

use crate::{prompt, Config};

const DEFAULT_BASE_URL: &str = "https://api.studio.nebius.ai/v1/chat/completions";

const BODY_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";
const TITLE_MODEL: &str = "meta-llama/Meta-Llama-3.1-8B-Instruct-fast";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completions client for Nebius AI Studio (OpenAI-compatible API).
pub struct NebiusOracle {
    client: Client,
    api_key: String,
    endpoint: Url,
    body_model: String,
}

impl NebiusOracle {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Oracle("Nebius API key is required".to_string()))?;
        let raw = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let endpoint = Url::parse(raw).map_err(|_| Error::InvalidUrl(raw.to_string()))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            endpoint,
            body_model: config
                .model
                .clone()
                .unwrap_or_else(|| BODY_MODEL.to_string()),
        })
    }

    async fn complete(
        &self,
        model: &str,
        prompt: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Oracle("completion response contained no choices".to_string()))
    }
}

impl fmt::Debug for NebiusOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NebiusOracle")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("body_model", &self.body_model)
            .finish()
    }
}

#[async_trait]
impl TextOracle for NebiusOracle {
    fn name(&self) -> &str {
        "Nebius"
    }

    async fn generate_body(&self, request: &GenerationRequest) -> Result<String> {
        tracing::debug!("requesting article body about '{}'", request.keywords);
        self.complete(&self.body_model, prompt::body_prompt(request), 0.7, 2048)
            .await
    }

    async fn generate_title(&self, request: &GenerationRequest) -> Result<String> {
        tracing::debug!("requesting title about '{}'", request.keywords);
        let title = self
            .complete(TITLE_MODEL, prompt::title_prompt(request), 0.8, 100)
            .await?;
        Ok(title.trim().to_string())
    }
}
