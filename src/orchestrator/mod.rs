use thiserror::Error;
use tracing::{error, info, warn};

pub mod models;

use crate::catalog::StreamCatalog;
use crate::catalog::models::RemoteVideo;
use crate::catalog::selector::{QualityPolicy, SelectError, StreamSelector};
use crate::common::logger::PrettyLogger;
use crate::common::utils::FormatTool;
use crate::downloader::Fetcher;
use crate::extractor::AudioTranscoder;
use models::{DownloadConfig, Mode, Outcome};

// 输入校验失败，在任何网络活动之前返回
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("URL不能为空")]
    EmptyUrl,
    #[error("无效的URL: {0}")]
    MalformedUrl(String),
    #[error("不支持的URL协议: {0}")]
    UnsupportedScheme(String),
    #[error("无效的清晰度参数: {0}")]
    BadQuality(String),
}

// 本地前置校验：URL 格式与清晰度参数，不触发任何 I/O
pub fn validate_request(url: &str, quality: &str) -> Result<QualityPolicy, InvalidInput> {
    if url.trim().is_empty() {
        return Err(InvalidInput::EmptyUrl);
    }

    let parsed =
        url::Url::parse(url).map_err(|_| InvalidInput::MalformedUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(InvalidInput::UnsupportedScheme(other.to_string())),
    }

    QualityPolicy::parse(quality).ok_or_else(|| InvalidInput::BadQuality(quality.to_string()))
}

// 编排器：按模式驱动 选流 -> 下载 -> 提取，各步骤失败只记录不中断
pub struct Orchestrator<'a> {
    catalog: &'a dyn StreamCatalog,
    transcoder: &'a dyn AudioTranscoder,
    config: DownloadConfig,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        catalog: &'a dyn StreamCatalog,
        transcoder: &'a dyn AudioTranscoder,
        config: DownloadConfig,
    ) -> Self {
        Self {
            catalog,
            transcoder,
            config,
        }
    }

    // 运行入口：无论各步骤成败，总是正常返回 Outcome
    pub async fn run(&self, url: &str, mode: Mode) -> Outcome {
        let mut outcome = Outcome::default();

        let quality = match validate_request(url, &self.config.quality) {
            Ok(q) => q,
            Err(e) => {
                error!("输入校验失败: {}", e);
                PrettyLogger::error(format!("{}", e));
                return outcome;
            }
        };

        // 解析远端目录
        let video = match self.catalog.resolve(url).await {
            Ok(v) => v,
            Err(e) => {
                error!("解析失败: {}", e);
                PrettyLogger::error(format!("解析视频信息失败: {}", e));
                return outcome;
            }
        };
        self.report_video(&video);

        match mode {
            Mode::VideoOnly { also_extract } => {
                self.run_video(&video, &quality, also_extract, &mut outcome)
                    .await
            }
            Mode::Both => self.run_video(&video, &quality, true, &mut outcome).await,
            Mode::AudioOnly => self.run_audio_only(&video, &mut outcome).await,
        }

        outcome
    }

    // 视频路径：选流 -> 下载，extract_audio 时在视频旁提取音频
    // 视频本身是交付物，任何文件都不删除
    async fn run_video(
        &self,
        video: &RemoteVideo,
        quality: &QualityPolicy,
        extract_audio: bool,
        outcome: &mut Outcome,
    ) {
        let descriptor =
            match StreamSelector::select(&video.streams, quality, &self.config.container) {
                Ok(d) => d,
                Err(SelectError::NoStreamFound) => {
                    warn!("没有找到符合 {} 的视频流", self.config.quality);
                    PrettyLogger::warning(format!(
                        "没有找到符合 {} 的视频流",
                        self.config.quality
                    ));
                    self.report_available(video);
                    return;
                }
            };

        PrettyLogger::step_start(format!("下载 {} 视频", descriptor.quality_label()));
        let fetcher = Fetcher::new(self.catalog, &self.config.output_dir);
        let artifact = match fetcher.fetch(video, descriptor).await {
            Ok(a) => a,
            Err(e) => {
                error!("下载视频失败: {}", e);
                PrettyLogger::error(format!("下载视频失败: {}", e));
                return;
            }
        };
        PrettyLogger::file_info("视频已保存", artifact.path.display().to_string());
        outcome.video = Some(artifact.path.clone());

        if extract_audio {
            PrettyLogger::step_start("提取音频");
            match self.transcoder.extract(&artifact.path, None).await {
                Ok(audio) => {
                    PrettyLogger::file_info("音频已保存", audio.path.display().to_string());
                    outcome.audio = Some(audio.path);
                }
                Err(e) => {
                    error!("提取音频失败: {}", e);
                    PrettyLogger::error(format!("提取音频失败: {}", e));
                }
            }
        }
    }

    // 音频路径：取音频流 -> 下载容器 -> 转码；容器只是中间产物，
    // 音频产物就绪后删除
    async fn run_audio_only(&self, video: &RemoteVideo, outcome: &mut Outcome) {
        let descriptor = match StreamSelector::select(
            &video.streams,
            &QualityPolicy::AudioOnly,
            &self.config.container,
        ) {
            Ok(d) => d,
            Err(SelectError::NoStreamFound) => {
                warn!("没有找到音频流");
                PrettyLogger::warning("没有找到音频流");
                return;
            }
        };

        PrettyLogger::step_start("下载音频");
        let fetcher = Fetcher::new(self.catalog, &self.config.output_dir);
        let artifact = match fetcher.fetch(video, descriptor).await {
            Ok(a) => a,
            Err(e) => {
                error!("下载音频失败: {}", e);
                PrettyLogger::error(format!("下载音频失败: {}", e));
                return;
            }
        };

        match self.transcoder.extract(&artifact.path, None).await {
            Ok(audio) => {
                outcome.audio = Some(audio.path.clone());
                // 中间容器文件在音频产物就绪后才能删
                if let Err(e) = tokio::fs::remove_file(&artifact.path).await {
                    warn!("清理中间文件失败: {:?}: {}", artifact.path, e);
                }
                PrettyLogger::file_info("音频已保存", audio.path.display().to_string());
            }
            Err(e) => {
                error!("转码失败: {}", e);
                PrettyLogger::error(format!("转码失败: {}，中间文件保留在 {:?}", e, artifact.path));
            }
        }
    }

    fn report_video(&self, video: &RemoteVideo) {
        info!("标题: << {} >>", video.title);
        PrettyLogger::video_info(
            &video.title,
            format!(
                "{} · {}",
                video.author,
                FormatTool::format_duration(video.duration)
            ),
        );
    }

    // 选流失败时向用户展示可用清晰度，属于诊断输出而非错误
    fn report_available(&self, video: &RemoteVideo) {
        let available = video.available_qualities(&self.config.container);
        if available.is_empty() {
            PrettyLogger::info("该视频没有任何可用的合流清晰度");
            return;
        }
        PrettyLogger::info("可用清晰度:");
        for label in available {
            println!("  - {}", label);
        }
    }
}
