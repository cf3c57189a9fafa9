use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

use crate::config::{ConfigError, GeminiConfig};

use super::{
    inference::{build_prompt, build_request, endpoint, parse_response, parse_score},
    RelevanceScorer, ScoreError,
};

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(http: Client, config: &GeminiConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.clone(),
        })
    }

    pub async fn generate(&self, prompt: String) -> Result<String, ScoreError> {
        let request = build_request(prompt);
        let response = self
            .http
            .post(endpoint(&self.api_base, &self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Gemini request failed")?
            .error_for_status()
            .context("Gemini returned an error status")?;

        parse_response(response).await
    }
}

#[async_trait]
impl RelevanceScorer for GeminiClient {
    async fn score(&self, text: &str, keyword: &str) -> Result<u8, ScoreError> {
        let answer = self.generate(build_prompt(text, keyword)).await?;
        tracing::debug!(target: "ai", keyword, answer = %answer.trim(), "model answered");
        parse_score(&answer)
    }
}
