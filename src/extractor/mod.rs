use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::common::utils::unique_path;

pub mod error;

use error::ExtractionError;

// 独立音频产物，最终交付物，核心逻辑不会删除它
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub path: PathBuf,
}

// 媒体转码引擎的统一接口
// output_path 省略时在输入文件旁派生同名 mp3 路径
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn extract(
        &self,
        video_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<AudioArtifact, ExtractionError>;
}

// 基于系统 FFmpeg 工具链的音频提取实现
pub struct FfmpegExtractor;

impl FfmpegExtractor {
    // 获取 ffmpeg / ffprobe 路径（支持环境变量）
    fn ffmpeg_cmd() -> String {
        std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string())
    }

    fn ffprobe_cmd() -> String {
        std::env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string())
    }

    async fn ensure_available(cmd: &str, missing: ExtractionError) -> Result<(), ExtractionError> {
        let check = Command::new(cmd)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match check {
            Ok(status) if status.success() => Ok(()),
            _ => Err(missing),
        }
    }

    // 检查容器内是否存在音频轨
    async fn has_audio_track(media_path: &Path) -> Result<bool, ExtractionError> {
        let ffprobe = Self::ffprobe_cmd();
        Self::ensure_available(&ffprobe, ExtractionError::FfprobeNotFound).await?;

        let output = Command::new(&ffprobe)
            .arg("-v")
            .arg("error")
            .arg("-select_streams")
            .arg("a")
            .arg("-show_entries")
            .arg("stream=codec_type")
            .arg("-of")
            .arg("csv=p=0")
            .arg(media_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Probe(err_msg.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).contains("audio"))
    }

    // 读取媒体时长（秒）
    pub async fn probe_duration(media_path: &Path) -> Result<f64, ExtractionError> {
        let ffprobe = Self::ffprobe_cmd();
        Self::ensure_available(&ffprobe, ExtractionError::FfprobeNotFound).await?;

        let output = Command::new(&ffprobe)
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("csv=p=0")
            .arg(media_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Probe(err_msg.trim().to_string()));
        }

        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse::<f64>()
            .map_err(|e| ExtractionError::Probe(e.to_string()))
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegExtractor {
    // 从容器文件中提取音频并转码为 mp3
    // 输入文件不会被修改；失败时清理半成品输出
    async fn extract(
        &self,
        video_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<AudioArtifact, ExtractionError> {
        if !video_path.exists() {
            return Err(ExtractionError::FileNotFound(video_path.to_path_buf()));
        }

        let target = match output_path {
            Some(p) => p.to_path_buf(),
            None => video_path.with_extension("mp3"),
        };
        let target = unique_path(target);

        let ffmpeg = Self::ffmpeg_cmd();
        Self::ensure_available(&ffmpeg, ExtractionError::FfmpegNotFound).await?;

        if !Self::has_audio_track(video_path).await? {
            return Err(ExtractionError::NoAudioTrack);
        }

        info!("开始提取音频: {:?} -> {:?}", video_path, target);

        let output = Command::new(&ffmpeg)
            .arg("-i")
            .arg(video_path)
            .arg("-vn")
            .arg("-codec:a")
            .arg("libmp3lame")
            .arg("-q:a")
            .arg("2")
            .arg("-y")
            .arg(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            error!("ffmpeg 转码失败:\n{}", err_msg);

            // 清理转码中途留下的半成品
            if target.exists() {
                if let Err(e) = tokio::fs::remove_file(&target).await {
                    debug!("清理半成品失败: {}", e);
                }
            }

            return Err(ExtractionError::Transcode(err_msg.trim().to_string()));
        }

        info!("音频提取完成: {:?}", target);
        Ok(AudioArtifact { path: target })
    }
}
