use crate::error::{AppError, Result};

const UNSUPPORTED_YOUTUBE_MSG: &str =
    "Please use a full YouTube video URL (youtube.com/watch?v=... or youtu.be/...)";

/// The closed set of fetch strategies a URL can resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    YouTubeVideo { video_id: String },
    GenericWebPage,
}

impl UrlKind {
    pub fn label(&self) -> &'static str {
        match self {
            UrlKind::YouTubeVideo { .. } => "youtube",
            UrlKind::GenericWebPage => "website",
        }
    }
}

/// Decides which fetch strategy applies to an already-validated URL.
///
/// URLs on a YouTube host must match one of the two accepted video-link
/// shapes (watch-page query form or short-link form); anything else on a
/// YouTube host is rejected rather than fetched as a web page.
pub fn classify(url: &str) -> Result<UrlKind> {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        match extract_video_id(url) {
            Some(video_id) => Ok(UrlKind::YouTubeVideo { video_id }),
            None => Err(AppError::UnsupportedYouTubeFormat(
                UNSUPPORTED_YOUTUBE_MSG.to_string(),
            )),
        }
    } else {
        Ok(UrlKind::GenericWebPage)
    }
}

/// Pulls the video id out of the two accepted link shapes.
pub fn extract_video_id(url: &str) -> Option<String> {
    if let Some(start) = url.find("youtube.com/watch?v=") {
        let id_part = &url[start + "youtube.com/watch?v=".len()..];
        let id_end = id_part.find('&').unwrap_or(id_part.len());
        let id = &id_part[..id_end];
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    if let Some(start) = url.find("youtu.be/") {
        let id_part = &url[start + "youtu.be/".len()..];
        let id_end = id_part.find(['?', '&']).unwrap_or(id_part.len());
        let id = &id_part[..id_end];
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    None
}
