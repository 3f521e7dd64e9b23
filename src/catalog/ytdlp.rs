use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use super::StreamCatalog;
use super::errors::CatalogError;
use super::models::{RemoteVideo, Resolution, StreamDescriptor, StreamKind};
use crate::downloader::core::HttpStreamDownloader;
use crate::downloader::error::FetchError;

// yt-dlp 输出的元数据中本工具关心的字段
#[derive(Debug, Deserialize)]
struct YtDlpMetadata {
    title: Option<String>,
    uploader: Option<String>,
    channel: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    formats: Vec<YtDlpFormat>,
}

#[derive(Debug, Deserialize)]
struct YtDlpFormat {
    format_id: Option<String>,
    url: Option<String>,
    ext: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
    height: Option<u32>,
    fps: Option<f64>,
}

// 基于 yt-dlp 的流目录实现：元数据走子进程，取流走 HTTP 直连
pub struct YtDlpCatalog {
    downloader: HttpStreamDownloader,
}

impl YtDlpCatalog {
    pub fn new() -> Self {
        Self {
            downloader: HttpStreamDownloader::new(),
        }
    }

    // 获取 yt-dlp 路径（支持环境变量）
    fn ytdlp_cmd() -> String {
        std::env::var("YTDLP_PATH").unwrap_or_else(|_| "yt-dlp".to_string())
    }

    async fn ensure_available(cmd: &str) -> Result<(), CatalogError> {
        let check = Command::new(cmd)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match check {
            Ok(status) if status.success() => Ok(()),
            _ => Err(CatalogError::ToolNotFound),
        }
    }

    fn parse_metadata(url: &str, raw: &str) -> Result<RemoteVideo, CatalogError> {
        let meta: YtDlpMetadata =
            serde_json::from_str(raw).map_err(|e| CatalogError::InvalidMetadata(e.to_string()))?;

        let streams: Vec<StreamDescriptor> = meta
            .formats
            .iter()
            .filter_map(Self::to_descriptor)
            .collect();

        if streams.is_empty() {
            warn!("元数据中没有任何可下载的媒体流: {}", url);
        }

        Ok(RemoteVideo {
            url: url.to_string(),
            title: meta.title.unwrap_or_else(|| "untitled".to_string()),
            author: meta
                .uploader
                .or(meta.channel)
                .unwrap_or_else(|| "未知".to_string()),
            duration: meta.duration.unwrap_or(0.0),
            streams,
        })
    }

    fn to_descriptor(format: &YtDlpFormat) -> Option<StreamDescriptor> {
        let source_url = format.url.clone()?;
        let has_video = format.vcodec.as_deref().is_some_and(|c| c != "none");
        let has_audio = format.acodec.as_deref().is_some_and(|c| c != "none");

        let kind = match (has_video, has_audio) {
            (true, true) => StreamKind::Progressive,
            (true, false) => StreamKind::VideoOnly,
            (false, true) => StreamKind::AudioOnly,
            // 故事板之类的非媒体条目
            (false, false) => return None,
        };

        Some(StreamDescriptor {
            format_id: format.format_id.clone().unwrap_or_default(),
            source_url,
            container: format.ext.clone().unwrap_or_else(|| "mp4".to_string()),
            resolution: format.height.map(Resolution),
            fps: format.fps,
            kind,
        })
    }
}

impl Default for YtDlpCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamCatalog for YtDlpCatalog {
    async fn resolve(&self, url: &str) -> Result<RemoteVideo, CatalogError> {
        let cmd = Self::ytdlp_cmd();
        Self::ensure_available(&cmd).await?;

        debug!("调用 yt-dlp 获取元数据: {}", url);
        let output = Command::new(&cmd)
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("-J")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            return Err(CatalogError::ToolFailed(err_msg.trim().to_string()));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        Self::parse_metadata(url, &raw)
    }

    async fn fetch(&self, descriptor: &StreamDescriptor, dest: &Path) -> Result<(), FetchError> {
        self.downloader.download(&descriptor.source_url, dest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "测试视频",
        "uploader": "某频道",
        "duration": 213.0,
        "formats": [
            {"format_id": "sb0", "url": "https://example.com/sb", "ext": "mhtml", "vcodec": "none", "acodec": "none"},
            {"format_id": "140", "url": "https://example.com/a", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2"},
            {"format_id": "137", "url": "https://example.com/v", "ext": "mp4", "vcodec": "avc1", "acodec": "none", "height": 1080, "fps": 30},
            {"format_id": "22", "url": "https://example.com/p", "ext": "mp4", "vcodec": "avc1", "acodec": "mp4a.40.2", "height": 720, "fps": 30}
        ]
    }"#;

    #[test]
    fn test_parse_metadata() {
        let video = YtDlpCatalog::parse_metadata("https://example.com/watch?v=abc", SAMPLE).unwrap();
        assert_eq!(video.title, "测试视频");
        assert_eq!(video.author, "某频道");
        assert_eq!(video.duration, 213.0);

        // 故事板条目被过滤掉
        assert_eq!(video.streams.len(), 3);
        assert_eq!(video.streams[0].kind, StreamKind::AudioOnly);
        assert_eq!(video.streams[1].kind, StreamKind::VideoOnly);
        assert_eq!(video.streams[2].kind, StreamKind::Progressive);
        assert_eq!(video.streams[2].resolution, Some(Resolution(720)));
    }

    #[test]
    fn test_parse_metadata_defaults() {
        let video = YtDlpCatalog::parse_metadata("https://example.com/x", r#"{"formats": []}"#).unwrap();
        assert_eq!(video.title, "untitled");
        assert_eq!(video.author, "未知");
        assert!(video.streams.is_empty());
    }

    #[test]
    fn test_parse_metadata_rejects_garbage() {
        let result = YtDlpCatalog::parse_metadata("https://example.com/x", "not json");
        assert!(matches!(result, Err(CatalogError::InvalidMetadata(_))));
    }
}
