//! Direct client for the Gemini `generateContent` REST endpoint.

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use super::{ChatRequest, ChatService, PendingReply, Sender};
use crate::error::ChatError;

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiService {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiService {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn url(&self) -> String {
        format!("{ENDPOINT}/{}:generateContent?key={}", self.model, self.api_key)
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

fn request_body(request: &ChatRequest) -> Result<String, serde_json::Error> {
    let contents = request
        .history
        .iter()
        .map(|turn| Content {
            role: Some(match turn.sender {
                Sender::User => "user",
                Sender::Assistant => "model",
            }),
            parts: vec![Part { text: &turn.text }],
        })
        .collect();

    serde_json::to_string(&GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part { text: &request.system_prompt }],
        },
        contents,
    })
}

/// Text of the first candidate, with its parts concatenated.
fn parse_reply(body: &str) -> Result<String, ChatError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::MalformedResponse("no candidates".into()))?;
    let text: String = candidate.content.parts.into_iter().map(|p| p.text).collect();
    if text.is_empty() {
        return Err(ChatError::MalformedResponse("empty reply".into()));
    }
    Ok(text)
}

impl ChatService for GeminiService {
    fn send_message(&self, request: ChatRequest) -> PendingReply {
        let client = self.client.clone();
        let url = self.url();
        let body = request_body(&request);

        async move {
            let body = body.map_err(|e| ChatError::Service(e.to_string()))?;
            let response = client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(|e| ChatError::Service(e.to_string()))?;

            let status = response.status();
            let text = response.text().await.map_err(|e| ChatError::Service(e.to_string()))?;
            if !status.is_success() {
                return Err(ChatError::Service(format!("HTTP {}: {}", status, text)));
            }
            parse_reply(&text)
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::ChatTurn;

    #[test]
    fn body_maps_senders_to_gemini_roles() {
        let request = ChatRequest {
            system_prompt: "be brief".into(),
            history: vec![
                ChatTurn { sender: Sender::User, text: "hi".into() },
                ChatTurn { sender: Sender::Assistant, text: "hello".into() },
                ChatTurn { sender: Sender::User, text: "what is DNA?".into() },
            ],
        };
        let json: serde_json::Value = serde_json::from_str(&request_body(&request).unwrap()).unwrap();
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "be brief");
        assert!(json["system_instruction"].get("role").is_none());
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "what is DNA?");
    }

    #[test]
    fn reply_text_is_extracted() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"A double "},{"text":"helix."}]}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "A double helix.");
    }

    #[test]
    fn missing_candidates_is_malformed() {
        assert!(matches!(parse_reply(r#"{"candidates":[]}"#), Err(ChatError::MalformedResponse(_))));
        assert!(matches!(parse_reply("not json"), Err(ChatError::MalformedResponse(_))));
    }
}
