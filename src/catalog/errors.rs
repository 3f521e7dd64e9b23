use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("未检测到 yt-dlp，请确保已安装或设置环境变量 YTDLP_PATH")]
    ToolNotFound,
    #[error("元数据获取失败: {0}")]
    ToolFailed(String),
    #[error("元数据解析失败: {0}")]
    InvalidMetadata(String),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}
