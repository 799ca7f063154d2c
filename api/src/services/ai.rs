//! Thin client for the Gemini generative completion service.
//!
//! All AI-assisted endpoints funnel through this module: plain text
//! generation, audio transcription (the audio resource is referenced by URI,
//! never downloaded locally), and translation. Failures surface as
//! `ApiError::Upstream` and are terminal for the request.

use serde::{Deserialize, Serialize};
use util::config;

use crate::response::ApiError;

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Request body for the Gemini API.
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file_data: None,
        }
    }

    fn file(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            text: None,
            file_data: Some(FileData {
                file_uri: uri.into(),
                mime_type: mime_type.into(),
            }),
        }
    }
}

#[derive(Serialize)]
struct FileData {
    file_uri: String,
    mime_type: String,
}

/// Response from the Gemini API.
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: String,
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn from_env() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config::gemini_api_key(),
        }
    }

    /// Generates text from a plain prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        self.complete(vec![Part::text(prompt)]).await
    }

    /// Transcribes the audio resource at `audio_url`.
    pub async fn transcribe(&self, audio_url: &str, mime_type: &str) -> Result<String, ApiError> {
        self.complete(vec![
            Part::text("Transcribe this audio recording. Output only the transcript text."),
            Part::file(audio_url, mime_type),
        ])
        .await
    }

    /// Translates already-transcribed text into the target language.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, ApiError> {
        let prompt = format!(
            "You are a professional translator. Translate the following text to {}. \
             Output only the translation.\n\n{}",
            target_language, text
        );
        self.complete(vec![Part::text(prompt)]).await
    }

    async fn complete(&self, parts: Vec<Part>) -> Result<String, ApiError> {
        let request_body = GeminiRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .client
            .post(format!("{}?key={}", GEMINI_URL, self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let response = serde_json::from_str::<GeminiResponse>(&response_text).map_err(|e| {
            ApiError::Upstream(format!(
                "error decoding response body: {}. Full response: {}",
                e, response_text
            ))
        })?;

        response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| ApiError::Upstream("Empty completion response".to_string()))
    }
}
