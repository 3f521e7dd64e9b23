use std::path::Path;

use futures::StreamExt;
use indicatif::ProgressBar;
use tracing::{debug, warn};

use super::error::FetchError;
use crate::common::utils::FormatTool;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

// HTTP 流式下载器：单文件单连接，边下边写
pub struct HttpStreamDownloader {
    client: reqwest::Client,
}

impl HttpStreamDownloader {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    // 下载 url 到 output_path，按 Content-Length 显示进度
    pub async fn download(&self, url: &str, output_path: &Path) -> Result<(), FetchError> {
        let response = self.client.get(url).send().await?;

        Self::check_response_status(&response, url)?;

        let total_size = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|ct_len| ct_len.to_str().ok())
            .and_then(|ct_len| ct_len.parse().ok())
            .unwrap_or(0u64);

        let pb = if total_size > 0 {
            let pb = ProgressBar::new(total_size);
            pb.set_style(
                indicatif::ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        debug!("开始下载: {}", url);

        let mut file = tokio::fs::File::create(output_path)
            .await
            .map_err(FetchError::Io)?;

        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(error) => {
                    if let Some(pb) = &pb {
                        pb.finish_with_message("下载失败");
                    }
                    return Err(FetchError::Stream(error.to_string()));
                }
            };

            tokio::io::AsyncWriteExt::write_all(&mut file, &chunk)
                .await
                .map_err(FetchError::Io)?;

            downloaded += chunk.len() as u64;
            if let Some(pb) = &pb {
                pb.set_position(downloaded);
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("下载完成");
        }

        debug!(
            "下载完成: {:?} ({})",
            output_path,
            FormatTool::format_size(downloaded)
        );
        Ok(())
    }

    // 检查响应状态；403/429 给出限流提示，但不做重试
    fn check_response_status(response: &reqwest::Response, url: &str) -> Result<(), FetchError> {
        let status = response.status();
        debug!("Response Status: {}", status);

        match status {
            reqwest::StatusCode::FORBIDDEN => {
                warn!("检测到 403 Forbidden，可能触发了访问限制");
                Err(FetchError::RateLimited(format!(
                    "访问被拒绝 (403 Forbidden)，URL: {}",
                    url
                )))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                warn!("检测到 429 Too Many Requests，请求过于频繁");
                Err(FetchError::RateLimited(format!(
                    "请求过于频繁 (429 Too Many Requests)，URL: {}",
                    url
                )))
            }
            status if status.is_success() => Ok(()),
            _ => Err(FetchError::BadStatus(format!(
                "HTTP 请求失败，状态码: {}，URL: {}",
                status, url
            ))),
        }
    }
}

impl Default for HttpStreamDownloader {
    fn default() -> Self {
        Self::new()
    }
}
