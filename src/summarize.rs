use async_trait::async_trait;

use crate::error::Result;
use crate::fetch::Document;
use crate::llm;

const PROMPT_PREFIX: &str = "Provide a summary of the following content in 300 words:\nContent:";

/// Summarization strategy over a non-empty set of documents.
#[async_trait]
pub trait SummaryChain: Send + Sync {
    async fn summarize(&self, api_key: &str, docs: &[Document]) -> Result<String>;
}

/// Stuff-mode chain: every document's text is concatenated into one prompt
/// and summarized in a single LLM call. No splitting, no map-reduce.
pub struct StuffChain {
    api_base: String,
    model: String,
}

impl StuffChain {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl SummaryChain for StuffChain {
    async fn summarize(&self, api_key: &str, docs: &[Document]) -> Result<String> {
        let stuffed = docs
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = build_prompt(&stuffed);
        llm::call_chat_completion(&self.api_base, api_key, &self.model, &prompt).await
    }
}

fn build_prompt(content: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_PREFIX.len() + content.len() + 1);
    prompt.push_str(PROMPT_PREFIX);
    prompt.push_str(content);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_the_fixed_template() {
        let prompt = build_prompt("Example content.");
        assert!(prompt.starts_with("Provide a summary of the following content in 300 words:"));
        assert!(prompt.ends_with("Content:Example content."));
    }
}
