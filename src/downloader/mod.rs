use std::path::PathBuf;

use tracing::{debug, info};

use crate::catalog::StreamCatalog;
use crate::catalog::models::{RemoteVideo, StreamDescriptor};
use crate::common::utils::{sanitize_filename, unique_path};

pub mod core;
pub mod error;
pub mod models;

use error::FetchError;
use models::DownloadedArtifact;

// 下载器：负责目录准备、文件命名与取流
pub struct Fetcher<'a> {
    catalog: &'a dyn StreamCatalog,
    output_dir: PathBuf,
}

impl<'a> Fetcher<'a> {
    pub fn new(catalog: &'a dyn StreamCatalog, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            output_dir: output_dir.into(),
        }
    }

    // 将选定的流下载到输出目录，返回本地产物
    // 文件按视频标题命名；同名文件已存在时追加数字后缀
    pub async fn fetch(
        &self,
        video: &RemoteVideo,
        descriptor: &StreamDescriptor,
    ) -> Result<DownloadedArtifact, FetchError> {
        // 幂等地准备输出目录
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let file_name = format!(
            "{}.{}",
            sanitize_filename(&video.title),
            descriptor.container
        );
        let output_path = unique_path(self.output_dir.join(file_name));
        debug!("目标路径: {:?}", output_path);

        self.catalog.fetch(descriptor, &output_path).await?;

        info!("已保存: {:?}", output_path);
        Ok(DownloadedArtifact {
            path: output_path,
            kind: descriptor.kind,
        })
    }
}
