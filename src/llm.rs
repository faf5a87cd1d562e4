use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "gemma-7b-it";

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

/// Sends one user message to a Groq-style chat-completion endpoint and
/// returns the assistant reply. Every failure mode here counts as a
/// summarization failure, including transport errors.
pub async fn call_chat_completion(
    api_base: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String> {
    let client = Client::new();
    let body = ChatRequest {
        model: model.into(),
        messages: vec![Message {
            role: "user".into(),
            content: prompt.into(),
        }],
    };

    let res = client
        .post(format!("{api_base}/chat/completions"))
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::Summarization(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        let detail = res.text().await.unwrap_or_default();
        return Err(AppError::Summarization(format!(
            "LLM API returned {status}: {detail}"
        )));
    }

    let json: serde_json::Value = res
        .json()
        .await
        .map_err(|e| AppError::Summarization(e.to_string()))?;
    let reply = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| AppError::Summarization("Invalid response format from LLM".to_string()))?
        .to_string();

    Ok(reply)
}
