//! Gemini `generateContent` client

use super::{AdvisoryProvider, RECENT_TRANSACTIONS};
use crate::types::{BankError, Transaction};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const MAX_OUTPUT_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.7;

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiConfig {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined; empty if there is none
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Build the instruction sent to the model
///
/// Only the most recent transactions are included.
pub fn build_prompt(transactions: &[Transaction], balance: Decimal) -> Result<String, BankError> {
    let recent = &transactions[..transactions.len().min(RECENT_TRANSACTIONS)];
    let recent_json = serde_json::to_string(recent)
        .map_err(|e| BankError::advisory(format!("Failed to encode transactions: {}", e)))?;

    Ok(format!(
        "Analyze this user's bank account data and provide a short, professional financial tip (max 2 sentences).\n\
Current Balance: ${}\n\
Recent Transactions: {}\n\
Be encouraging and provide actionable advice. Do not mention technical jargon.",
        balance, recent_json
    ))
}

/// Advisory provider backed by the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    client: Client,
    config: GeminiConfig,
}

impl GeminiAdvisor {
    pub fn new(config: GeminiConfig) -> Self {
        GeminiAdvisor {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl AdvisoryProvider for GeminiAdvisor {
    async fn get_advice(
        &self,
        transactions: &[Transaction],
        balance: Decimal,
    ) -> Result<String, BankError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(transactions, balance)?),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        debug!(model = %self.config.model, "requesting advice");

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BankError::advisory(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        Ok(body.text())
    }
}
