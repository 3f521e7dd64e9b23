use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("文件不存在: {0:?}")]
    FileNotFound(PathBuf),
    #[error("输入文件中没有音频轨")]
    NoAudioTrack,
    #[error("未检测到 ffmpeg，请确保已安装并配置可执行路径，或设置环境变量 FFMPEG_PATH")]
    FfmpegNotFound,
    #[error("未检测到 ffprobe，请确保已安装并配置可执行路径，或设置环境变量 FFPROBE_PATH")]
    FfprobeNotFound,
    #[error("探测媒体信息失败: {0}")]
    Probe(String),
    #[error("转码失败: {0}")]
    Transcode(String),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}
