use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::ClientError;

// ── Chat ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a conversation. `text` is markup when `is_formatted` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub is_formatted: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into(), is_formatted: false }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self { sender: Sender::Ai, text: text.into(), is_formatted: false }
    }

    pub fn ai_formatted(markup: impl Into<String>) -> Self {
        Self { sender: Sender::Ai, text: markup.into(), is_formatted: true }
    }
}

/// Append-only, display-ordered message log of one conversation view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

/// Request body for `POST /api/chat/ask`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct CandidateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Pull the reply text out of a candidate-style chat response. Any other shape
/// is shown to the user verbatim as compact JSON.
pub fn extract_reply_text(data: &Value) -> String {
    let text = serde_json::from_value::<CandidateReply>(data.clone())
        .ok()
        .and_then(|reply| reply.candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text);

    match text {
        Some(text) => text,
        None => {
            warn!("chat reply did not match the candidate shape");
            data.to_string()
        }
    }
}

// ── Notes search ──────────────────────────────────────────────────────────────

const RESTRICTED_MARKER: &str = "Restricted file:";

/// Normalise the search endpoint's payload: a bare array of names, or an object
/// wrapping one under `notes` or `result`.
pub fn note_list(data: &Value) -> Result<Vec<String>, ClientError> {
    let items = match data {
        Value::Array(items) => Some(items),
        Value::Object(map) => map
            .get("notes")
            .and_then(Value::as_array)
            .or_else(|| map.get("result").and_then(Value::as_array)),
        _ => None,
    }
    .ok_or_else(|| ClientError::UnexpectedShape(data.to_string()))?;

    Ok(items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

/// Like [`note_list`], but an unrecognised payload is an empty result.
pub fn parse_note_list(data: &Value) -> Vec<String> {
    note_list(data).unwrap_or_else(|e| {
        warn!("{e}");
        Vec::new()
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteHit {
    /// Backend refused access; shown with a warning and no link.
    Restricted(String),
    Downloadable(String),
}

impl NoteHit {
    pub fn classify(name: String) -> Self {
        if name.contains(RESTRICTED_MARKER) {
            NoteHit::Restricted(name)
        } else {
            NoteHit::Downloadable(name)
        }
    }
}

// ── Auth & profile ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

impl RegisterRequest {
    pub fn login(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Auth responses are free text; anything mentioning success counts as one.
    pub fn of_auth_message(message: &str) -> Self {
        if message.contains("success") {
            Severity::Success
        } else {
            Severity::Error
        }
    }

    pub fn of_profile_message(message: &str) -> Self {
        if message.contains("Error") {
            Severity::Error
        } else {
            Severity::Success
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert success",
            Severity::Error => "alert error",
        }
    }
}
