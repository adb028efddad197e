//! Gemini query assistant.
//!
//! One free-text prompt per call, sent as a single-turn conversation to the
//! `generateContent` REST endpoint. No history is kept between calls. A busy
//! flag admits at most one in-flight request; there is no retry, timeout, or
//! cancellation — a hung request holds the flag until reqwest settles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Fixed reply when the endpoint answers without usable candidate text.
pub const NO_VALID_RESPONSE: &str = "No valid response from Gemini.";

/// User-facing assistant failures. Every variant's Display text is shown
/// verbatim in the chat panel.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Please enter a question.")]
    EmptyPrompt,

    #[error("Still thinking about the previous question...")]
    Busy,

    #[error("Gemini request failed with HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Could not reach Gemini: {0}")]
    Network(String),

    #[error("Malformed Gemini response: {0}")]
    Malformed(String),
}

#[derive(Clone)]
pub struct Assistant {
    client: reqwest::Client,
    api_key: String,
    model: String,
    busy: Arc<AtomicBool>,
}

impl Assistant {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Assistant {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a request is currently in flight. The UI disables its trigger
    /// while this is true.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Send one question and return the first candidate's text.
    ///
    /// Whitespace-only prompts and concurrent calls are rejected before any
    /// network traffic. A well-formed response with no candidate text yields
    /// [`NO_VALID_RESPONSE`] as an ordinary reply, not an error.
    pub async fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        if prompt.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }

        let _guard = BusyGuard::acquire(&self.busy).ok_or(AssistantError::Busy)?;

        let url = format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, self.model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "could not read error body".to_string());
            return Err(AssistantError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Malformed(e.to_string()))?;

        Ok(extract_reply(parsed))
    }
}

/// Holds the busy flag for the duration of one request; releases on drop so
/// errors and panics can't wedge the assistant.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// First candidate's first text part, or the fixed fallback.
fn extract_reply(response: GenerateContentResponse) -> String {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .unwrap_or_else(|| NO_VALID_RESPONSE.to_string())
}
