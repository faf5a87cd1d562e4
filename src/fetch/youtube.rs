use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;

use crate::classify::extract_video_id;
use crate::error::{AppError, Result};
use crate::fetch::webpage::BROWSER_USER_AGENT;
use crate::fetch::{ContentFetcher, Document};

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});

static BASE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""baseUrl":"([^"]+)""#).expect("Failed to parse baseUrl regex"));

static TEXT_NODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<text[^>]*>(.*?)</text>").expect("Failed to parse text regex"));

/// Video metadata from YouTube's public oEmbed endpoint.
#[derive(Debug, Deserialize)]
struct OembedInfo {
    title: String,
    author_name: String,
    thumbnail_url: Option<String>,
}

/// Fetches a YouTube video's transcript, with the video metadata attached
/// to the resulting document.
///
/// Resolution is three steps, each of which aborts the whole fetch on
/// failure: oEmbed metadata lookup, watch-page scan for the caption-track
/// list, then the timed-text download for the first track. A reachable
/// video with no caption tracks yields zero documents.
pub struct YoutubeFetcher;

impl YoutubeFetcher {
    pub fn new() -> Self {
        Self
    }

    async fn video_metadata(&self, url: &str) -> Result<OembedInfo> {
        let response = CLIENT
            .get(OEMBED_ENDPOINT)
            .query(&[("url", url), ("format", "json")])
            .send()
            .await
            .map_err(|e| youtube_error(&e.to_string()))?
            .error_for_status()
            .map_err(|e| youtube_error(&format!("could not resolve video info ({e})")))?;
        response
            .json::<OembedInfo>()
            .await
            .map_err(|e| youtube_error(&e.to_string()))
    }

    async fn caption_track_url(&self, video_id: &str) -> Result<Option<String>> {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        let html = CLIENT
            .get(&watch_url)
            .send()
            .await
            .map_err(|e| youtube_error(&e.to_string()))?
            .error_for_status()
            .map_err(|e| youtube_error(&e.to_string()))?
            .text()
            .await
            .map_err(|e| youtube_error(&e.to_string()))?;
        Ok(first_caption_track(&html))
    }

    async fn transcript(&self, track_url: &str) -> Result<String> {
        let xml = CLIENT
            .get(track_url)
            .send()
            .await
            .map_err(|e| youtube_error(&e.to_string()))?
            .error_for_status()
            .map_err(|e| youtube_error(&e.to_string()))?
            .text()
            .await
            .map_err(|e| youtube_error(&e.to_string()))?;
        Ok(transcript_text(&xml))
    }
}

impl Default for YoutubeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for YoutubeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Document>> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| youtube_error("could not extract a video id from the URL"))?;

        let info = self.video_metadata(url).await?;
        let Some(track_url) = self.caption_track_url(&video_id).await? else {
            return Ok(Vec::new());
        };
        let transcript = self.transcript(&track_url).await?;
        if transcript.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut doc = Document::new(transcript)
            .with_metadata("source", url)
            .with_metadata("video_id", video_id)
            .with_metadata("title", info.title)
            .with_metadata("author", info.author_name);
        if let Some(thumbnail) = info.thumbnail_url {
            doc = doc.with_metadata("thumbnail_url", thumbnail);
        }
        Ok(vec![doc])
    }
}

fn youtube_error(msg: &str) -> AppError {
    AppError::Fetch(format!(
        "YouTube Error: {msg}\nNote: Some videos cannot be loaded due to YouTube restrictions."
    ))
}

/// First caption-track URL embedded in the watch page's player JSON, if any.
fn first_caption_track(html: &str) -> Option<String> {
    let start = html.find("\"captionTracks\":")?;
    let caps = BASE_URL_RE.captures(&html[start..])?;
    // baseUrl values arrive JSON-escaped inside the page source
    Some(caps[1].replace("\\u0026", "&").replace("\\/", "/"))
}

/// Flattens timed-text XML into plain transcript text.
fn transcript_text(xml: &str) -> String {
    let segments: Vec<String> = TEXT_NODE_RE
        .captures_iter(xml)
        .map(|caps| decode_entities(&caps[1]))
        .filter(|s| !s.trim().is_empty())
        .collect();
    segments.join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_caption_track() {
        let html = r#"...,"captionTracks":[{"baseUrl":"https:\/\/www.youtube.com\/api\/timedtext?v=abc&lang=en","name":{"simpleText":"English"},"languageCode":"en"}],"audioTracks":..."#;
        assert_eq!(
            first_caption_track(html).unwrap(),
            "https://www.youtube.com/api/timedtext?v=abc&lang=en"
        );
    }

    #[test]
    fn no_caption_tracks_is_none() {
        assert_eq!(first_caption_track("<html>no player json</html>"), None);
    }

    #[test]
    fn flattens_timed_text() {
        let xml = r#"<?xml version="1.0"?><transcript>
            <text start="0.0" dur="1.5">Hello there,</text>
            <text start="1.5" dur="2.0">it&#39;s a test &amp; more</text>
            <text start="3.5" dur="1.0">   </text>
        </transcript>"#;
        assert_eq!(transcript_text(xml), "Hello there, it's a test & more");
    }

    #[test]
    fn empty_transcript_is_empty_string() {
        assert_eq!(transcript_text("<transcript></transcript>"), "");
    }
}
