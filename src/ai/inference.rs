use anyhow::Context;
use reqwest::Response;
use serde::{Deserialize, Serialize};

use super::ScoreError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub fn endpoint(api_base: &str, model: &str) -> String {
    format!("{}/{model}:generateContent", api_base.trim_end_matches('/'))
}

pub fn build_prompt(text: &str, keyword: &str) -> String {
    format!(
        r#"
    You are an expert at analyzing text for keyword relevance.
    Given the following text: "{text}"
    And the keyword: "{keyword}"
    Provide a relevance score from 0 to 100 (inclusive). Only output the number.
    "#
    )
}

pub fn build_request(prompt: String) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![Part { text: Some(prompt) }],
        }],
    }
}

pub async fn parse_response(response: Response) -> Result<String, ScoreError> {
    let completion: GenerateContentResponse = response
        .json()
        .await
        .context("Gemini response was not valid JSON")?;
    response_text(completion)
}

/// Joins the text parts of the first candidate.
pub fn response_text(completion: GenerateContentResponse) -> Result<String, ScoreError> {
    let candidate = completion
        .candidates
        .into_iter()
        .next()
        .ok_or(ScoreError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(ScoreError::EmptyResponse);
    }
    Ok(text)
}

/// Reads the model's answer as a whole-number score in 0..=100.
pub fn parse_score(raw: &str) -> Result<u8, ScoreError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ScoreError::NotANumber(trimmed.to_string()))?;
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ScoreError::OutOfRange(value))
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_text_and_keyword() {
        let prompt = build_prompt("We craft brands", "design");
        assert!(prompt.contains(r#"Given the following text: "We craft brands""#));
        assert!(prompt.contains(r#"And the keyword: "design""#));
        assert!(prompt.contains("Only output the number."));
    }

    #[test]
    fn request_serialises_to_generate_content_shape() {
        let body = serde_json::to_value(build_request("hi".into())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }]
            })
        );
    }

    #[test]
    fn endpoint_includes_model() {
        assert_eq!(
            endpoint(GEMINI_API_BASE, "gemini-1.5-pro"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            endpoint("http://127.0.0.1:8080/models/", "test-model"),
            "http://127.0.0.1:8080/models/test-model:generateContent"
        );
    }

    #[test]
    fn parses_scores() {
        assert_eq!(parse_score("80").unwrap(), 80);
        assert_eq!(parse_score(" 0\n").unwrap(), 0);
        assert_eq!(parse_score("100").unwrap(), 100);
        assert_eq!(parse_score("+42").unwrap(), 42);
    }

    #[test]
    fn rejects_non_numeric_and_out_of_range() {
        assert!(matches!(parse_score("high"), Err(ScoreError::NotANumber(s)) if s == "high"));
        assert!(matches!(parse_score("85.5"), Err(ScoreError::NotANumber(_))));
        assert!(matches!(parse_score(""), Err(ScoreError::NotANumber(_))));
        assert!(matches!(parse_score("101"), Err(ScoreError::OutOfRange(101))));
        assert!(matches!(parse_score("-3"), Err(ScoreError::OutOfRange(-3))));
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let completion: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "7" }, { "text": "5\n" }] } },
                { "content": { "parts": [{ "text": "1" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response_text(completion).unwrap(), "75\n");
    }

    #[test]
    fn blocked_response_is_empty() {
        let completion: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(
            response_text(completion),
            Err(ScoreError::EmptyResponse)
        ));
    }
}
