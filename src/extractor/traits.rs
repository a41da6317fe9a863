use crate::extractor::models::{Format, VideoInfo};
use crate::utils::Result;
use async_trait::async_trait;

/// Metadata service the downloader consults before fetching anything.
///
/// This trait isolates the application from the specific extraction method
/// (yt-dlp process, test doubles, ...).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "ytdlp")
    fn id(&self) -> &'static str;

    /// Extracts video information, including the raw format list
    async fn extract_info(&self, url: &str) -> Result<VideoInfo>;

    /// Gets available formats (calls extract_info internally)
    async fn get_formats(&self, url: &str) -> Result<Vec<Format>> {
        let info = self.extract_info(url).await?;
        Ok(info.formats)
    }
}
