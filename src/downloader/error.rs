use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP错误: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("请求被拒绝: {0}")]
    RateLimited(String),
    #[error("HTTP状态异常: {0}")]
    BadStatus(String),
    #[error("传输中断: {0}")]
    Stream(String),
}
