//! Optional LLM enrichment of analysis results.
//!
//! Sends a plain-text summary of each record to an OpenAI-style chat
//! completion endpoint (OpenRouter by default) and returns the narrative.
//! Enrichment is strictly additive: it reads finished records and never
//! changes them.

mod prompt;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::analysis::DomainRecord;
use crate::config::{
    LLM_ERROR_BODY_LIMIT, LLM_MAX_TOKENS, LLM_REFERER, LLM_SYSTEM_PROMPT, LLM_TEMPERATURE,
    LLM_TITLE,
};
use crate::error_handling::LlmError;
use crate::initialization::init_client;

pub use prompt::{build_prompt, prepare_domain_info};

/// Connection and prompt settings for the completion API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    /// Instruction placed before the domain summary
    pub prompt_template: String,
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    pub timeout: Duration,
}

/// Narrative analysis of one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmAnalysis {
    pub domain: String,
    pub llm_analysis: String,
    pub model_used: String,
    pub tokens_used: u64,
}

/// Domain whose enrichment failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmFailure {
    pub domain: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LlmEntry {
    Analysis(LlmAnalysis),
    Failure(LlmFailure),
}

/// Outcome of enriching a batch; counters follow the analysis batch rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmBatchResult {
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub domains: Vec<LlmEntry>,
}

/// An entry of the model catalogue offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub provider: &'static str,
}

const MODELS: &[ModelInfo] = &[
    ModelInfo { value: "openai/gpt-3.5-turbo", label: "GPT-3.5 Turbo", provider: "OpenAI" },
    ModelInfo { value: "openai/gpt-4", label: "GPT-4", provider: "OpenAI" },
    ModelInfo { value: "openai/gpt-4-turbo", label: "GPT-4 Turbo", provider: "OpenAI" },
    ModelInfo { value: "anthropic/claude-3-haiku", label: "Claude 3 Haiku", provider: "Anthropic" },
    ModelInfo { value: "anthropic/claude-3-sonnet", label: "Claude 3 Sonnet", provider: "Anthropic" },
    ModelInfo { value: "anthropic/claude-3-opus", label: "Claude 3 Opus", provider: "Anthropic" },
    ModelInfo { value: "meta-llama/llama-3-8b-instruct", label: "Llama 3 8B", provider: "Meta" },
    ModelInfo { value: "meta-llama/llama-3-70b-instruct", label: "Llama 3 70B", provider: "Meta" },
    ModelInfo { value: "google/gemini-pro", label: "Gemini Pro", provider: "Google" },
    ModelInfo { value: "mistralai/mixtral-8x7b-instruct", label: "Mixtral 8x7B", provider: "Mistral" },
];

/// Models known to work with the default endpoint.
pub fn available_models() -> &'static [ModelInfo] {
    MODELS
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: u64,
}

/// Client for the completion API.
pub struct LlmEnricher {
    client: Arc<Client>,
    config: LlmConfig,
}

impl LlmEnricher {
    /// Builds the shared HTTP client with the timeout from `config`.
    ///
    /// # Errors
    ///
    /// `LlmError::MissingApiKey` when the key is blank, `LlmError::Http` when
    /// the client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        let client = init_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Asks the model for a narrative analysis of one record.
    pub async fn enrich(&self, record: &DomainRecord) -> Result<LlmAnalysis, LlmError> {
        let domain_info = prepare_domain_info(record);
        let user_prompt = build_prompt(&self.config.prompt_template, &domain_info);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: LLM_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: LLM_TEMPERATURE,
            max_tokens: LLM_MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        log::debug!("Requesting LLM analysis for {} from {url}", record.domain);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", LLM_REFERER)
            .header("X-Title", LLM_TITLE)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: body.chars().take(LLM_ERROR_BODY_LIMIT).collect(),
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        Ok(LlmAnalysis {
            domain: record.domain.clone(),
            llm_analysis: content,
            model_used: self.config.model.clone(),
            tokens_used: completion.usage.map_or(0, |u| u.total_tokens),
        })
    }

    /// Enriches records one after another; a failed request becomes a
    /// failure entry and the batch continues.
    pub async fn enrich_batch(&self, records: &[DomainRecord]) -> LlmBatchResult {
        let mut result = LlmBatchResult {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            match self.enrich(record).await {
                Ok(analysis) => {
                    result.successful += 1;
                    result.domains.push(LlmEntry::Analysis(analysis));
                }
                Err(e) => {
                    log::error!("Failed to analyze {} with LLM: {e}", record.domain);
                    result.failed += 1;
                    result.domains.push(LlmEntry::Failure(LlmFailure {
                        domain: record.domain.clone(),
                        error: e.to_string(),
                    }));
                }
            }
            result.processed += 1;
        }

        result
    }
}
