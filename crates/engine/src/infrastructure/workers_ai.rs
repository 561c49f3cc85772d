//! Cloudflare Workers AI client (REST `ai/run` endpoint).

use async_trait::async_trait;
use duskcrawl_domain::MessageRole;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse};

/// Default REST API root.
pub const DEFAULT_WORKERS_AI_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default text-generation model.
pub const DEFAULT_WORKERS_AI_MODEL: &str = "@cf/meta/llama-3-8b-instruct";

/// Client for Workers AI text generation over the account-scoped REST API.
#[derive(Clone)]
pub struct WorkersAiClient {
    client: Client,
    base_url: String,
    account_id: String,
    api_token: String,
    model: String,
}

impl WorkersAiClient {
    pub fn new(
        base_url: &str,
        account_id: &str,
        api_token: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.to_string(),
            api_token: api_token.to_string(),
            model: model.to_string(),
        }
    }

    fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, self.model
        )
    }
}

#[async_trait]
impl LlmPort for WorkersAiClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = RunRequest {
            messages: request
                .to_messages()
                .into_iter()
                .map(|m| RunMessage {
                    role: match m.role {
                        MessageRole::System => "system",
                        MessageRole::Assistant => "assistant",
                        MessageRole::User | MessageRole::Unknown => "user",
                    },
                    content: m.content,
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.run_url())
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::RequestFailed(format!("{status}: {text}")));
        }

        let envelope: RunEnvelope =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        convert_envelope(envelope)
    }
}

fn convert_envelope(envelope: RunEnvelope) -> Result<LlmResponse, LlmError> {
    if !envelope.success {
        let reasons: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(LlmError::RequestFailed(if reasons.is_empty() {
            "Workers AI reported failure".to_string()
        } else {
            reasons.join("; ")
        }));
    }

    Ok(LlmResponse {
        content: envelope
            .result
            .and_then(|r| r.response)
            .unwrap_or_default(),
        finish_reason: FinishReason::Unknown,
        usage: None,
    })
}

// =============================================================================
// Workers AI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct RunRequest {
    messages: Vec<RunMessage>,
}

#[derive(Debug, Serialize)]
struct RunMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<RunApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunApiMessage {
    message: String,
}
