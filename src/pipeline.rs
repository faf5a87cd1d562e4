use std::sync::Arc;

use crate::classify::{classify, UrlKind};
use crate::error::AppError;
use crate::fetch::ContentFetcher;
use crate::summarize::SummaryChain;
use crate::validate::validate_request;

const EMPTY_YOUTUBE_MSG: &str = "Failed to load YouTube video. Possible reasons:\n\
     1. Video is private/age-restricted\n\
     2. Invalid video ID\n\
     3. Network issues\n\
     Please check the URL and try again.";
const EMPTY_WEBSITE_MSG: &str = "Failed to load website content. Please check the URL and try again.";

/// Phases a request passes through on its way to a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Fetching,
    Summarizing,
}

/// Terminal outcome of a pipeline run. The first phase failure ends the
/// request; no phase is ever re-entered.
#[derive(Debug)]
pub enum Terminal {
    Success(SummaryOutput),
    Error(AppError),
}

#[derive(Debug, Clone)]
pub struct SummaryOutput {
    pub summary: String,
    pub source: &'static str,
    pub document_count: usize,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub trace: Vec<Phase>,
    pub terminal: Terminal,
}

/// One request's validate → fetch → summarize run.
///
/// A pipeline is built fresh per request and consumed by [`Pipeline::run`];
/// nothing it touches outlives the request, so re-running identical inputs
/// against identical collaborators gives identical output.
pub struct Pipeline {
    video_fetcher: Arc<dyn ContentFetcher>,
    page_fetcher: Arc<dyn ContentFetcher>,
    chain: Arc<dyn SummaryChain>,
    trace: Vec<Phase>,
}

impl Pipeline {
    pub fn new(
        video_fetcher: Arc<dyn ContentFetcher>,
        page_fetcher: Arc<dyn ContentFetcher>,
        chain: Arc<dyn SummaryChain>,
    ) -> Self {
        Self {
            video_fetcher,
            page_fetcher,
            chain,
            trace: vec![Phase::Idle],
        }
    }

    pub async fn run(mut self, api_key: &str, raw_url: &str) -> PipelineReport {
        self.enter(Phase::Validating);
        let url = match validate_request(api_key, raw_url) {
            Ok(url) => url,
            Err(err) => return self.fail(err),
        };

        self.enter(Phase::Fetching);
        let kind = match classify(&url) {
            Ok(kind) => kind,
            Err(err) => return self.fail(err),
        };
        let fetcher = match kind {
            UrlKind::YouTubeVideo { .. } => Arc::clone(&self.video_fetcher),
            UrlKind::GenericWebPage => Arc::clone(&self.page_fetcher),
        };
        let docs = match fetcher.fetch(&url).await {
            Ok(docs) => docs,
            Err(err) => return self.fail(err),
        };
        if docs.is_empty() {
            return self.fail(empty_content_error(&kind));
        }

        self.enter(Phase::Summarizing);
        let summary = match self.chain.summarize(api_key, &docs).await {
            Ok(summary) => summary,
            Err(err) => return self.fail(err),
        };

        tracing::info!(url = %url, source = kind.label(), "summary generated");
        PipelineReport {
            trace: self.trace,
            terminal: Terminal::Success(SummaryOutput {
                summary,
                source: kind.label(),
                document_count: docs.len(),
            }),
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.trace.push(phase);
    }

    fn fail(self, err: AppError) -> PipelineReport {
        tracing::warn!(phase = ?self.trace.last(), error = %err, "pipeline run failed");
        PipelineReport {
            trace: self.trace,
            terminal: Terminal::Error(err),
        }
    }
}

fn empty_content_error(kind: &UrlKind) -> AppError {
    match kind {
        UrlKind::YouTubeVideo { .. } => AppError::EmptyContent(EMPTY_YOUTUBE_MSG.to_string()),
        UrlKind::GenericWebPage => AppError::EmptyContent(EMPTY_WEBSITE_MSG.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::fetch::Document;
    use async_trait::async_trait;

    struct StubFetcher {
        docs: Vec<Document>,
    }

    #[async_trait]
    impl ContentFetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<Document>> {
            Ok(self.docs.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl ContentFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<Document>> {
            Err(AppError::Fetch("connection reset".to_string()))
        }
    }

    struct PanickingFetcher;

    #[async_trait]
    impl ContentFetcher for PanickingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<Document>> {
            panic!("fetcher must not be invoked");
        }
    }

    struct StubChain {
        reply: String,
    }

    #[async_trait]
    impl SummaryChain for StubChain {
        async fn summarize(&self, _api_key: &str, _docs: &[Document]) -> Result<String> {
            Ok(self.reply.clone())
        }
    }

    struct FailingChain;

    #[async_trait]
    impl SummaryChain for FailingChain {
        async fn summarize(&self, _api_key: &str, _docs: &[Document]) -> Result<String> {
            Err(AppError::Summarization("401 invalid api key".to_string()))
        }
    }

    struct PanickingChain;

    #[async_trait]
    impl SummaryChain for PanickingChain {
        async fn summarize(&self, _api_key: &str, _docs: &[Document]) -> Result<String> {
            panic!("summarizer must not be invoked");
        }
    }

    fn pipeline(
        video: impl ContentFetcher + 'static,
        page: impl ContentFetcher + 'static,
        chain: impl SummaryChain + 'static,
    ) -> Pipeline {
        Pipeline::new(Arc::new(video), Arc::new(page), Arc::new(chain))
    }

    #[tokio::test]
    async fn happy_path_walks_every_phase() {
        let docs = vec![Document::new("Example content.").with_metadata("source", "x")];
        let p = pipeline(
            PanickingFetcher,
            StubFetcher { docs },
            StubChain {
                reply: "A short summary.".to_string(),
            },
        );
        let report = p.run("gsk_test", "https://example.com/article").await;

        assert_eq!(
            report.trace,
            vec![Phase::Idle, Phase::Validating, Phase::Fetching, Phase::Summarizing]
        );
        match report.terminal {
            Terminal::Success(out) => {
                assert_eq!(out.summary, "A short summary.");
                assert_eq!(out.source, "website");
                assert_eq!(out.document_count, 1);
            }
            Terminal::Error(err) => panic!("expected success, got {err}"),
        }
    }

    #[tokio::test]
    async fn blank_inputs_never_reach_a_fetcher() {
        for (key, url) in [("", "https://example.com"), ("gsk_test", "  ")] {
            let p = pipeline(PanickingFetcher, PanickingFetcher, PanickingChain);
            let report = p.run(key, url).await;
            assert_eq!(report.trace, vec![Phase::Idle, Phase::Validating]);
            match report.terminal {
                Terminal::Error(AppError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn malformed_url_fails_validation() {
        let p = pipeline(PanickingFetcher, PanickingFetcher, PanickingChain);
        let report = p.run("gsk_test", "not a url").await;
        match report.terminal {
            Terminal::Error(AppError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unsupported_youtube_shape_fails_in_fetching_phase() {
        let p = pipeline(PanickingFetcher, PanickingFetcher, PanickingChain);
        let report = p
            .run("gsk_test", "https://www.youtube.com/playlist?list=PLabc")
            .await;
        assert_eq!(
            report.trace,
            vec![Phase::Idle, Phase::Validating, Phase::Fetching]
        );
        match report.terminal {
            Terminal::Error(AppError::UnsupportedYouTubeFormat(_)) => {}
            other => panic!("expected UnsupportedYouTubeFormat, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_video_fetch_never_reaches_the_summarizer() {
        let p = pipeline(
            StubFetcher { docs: Vec::new() },
            PanickingFetcher,
            PanickingChain,
        );
        let report = p
            .run("gsk_test", "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await;
        match report.terminal {
            Terminal::Error(AppError::EmptyContent(msg)) => {
                assert!(msg.contains("private/age-restricted"));
                assert!(msg.contains("Invalid video ID"));
                assert!(msg.contains("Network issues"));
            }
            other => panic!("expected EmptyContent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetcher_failure_is_terminal() {
        let p = pipeline(PanickingFetcher, FailingFetcher, PanickingChain);
        let report = p.run("gsk_test", "https://example.com/article").await;
        assert_eq!(
            report.trace,
            vec![Phase::Idle, Phase::Validating, Phase::Fetching]
        );
        match report.terminal {
            Terminal::Error(AppError::Fetch(msg)) => assert!(msg.contains("connection reset")),
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn summarizer_failure_is_terminal() {
        let docs = vec![Document::new("Example content.")];
        let p = pipeline(PanickingFetcher, StubFetcher { docs }, FailingChain);
        let report = p.run("gsk_test", "https://example.com/article").await;
        assert_eq!(
            report.trace,
            vec![Phase::Idle, Phase::Validating, Phase::Fetching, Phase::Summarizing]
        );
        match report.terminal {
            Terminal::Error(AppError::Summarization(msg)) => {
                assert!(msg.contains("invalid api key"))
            }
            other => panic!("expected Summarization, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn identical_runs_give_identical_summaries() {
        let mut outputs = Vec::new();
        for _ in 0..2 {
            let docs = vec![Document::new("Example content.")];
            let p = pipeline(
                PanickingFetcher,
                StubFetcher { docs },
                StubChain {
                    reply: "A short summary.".to_string(),
                },
            );
            let report = p.run("gsk_test", "https://example.com/article").await;
            match report.terminal {
                Terminal::Success(out) => outputs.push(out.summary),
                Terminal::Error(err) => panic!("expected success, got {err}"),
            }
        }
        assert_eq!(outputs[0], outputs[1]);
    }
}
