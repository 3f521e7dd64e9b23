use async_trait::async_trait;
use std::path::Path;

pub mod errors;
pub mod models;
pub mod selector;
pub mod ytdlp;

use crate::downloader::error::FetchError;
use errors::CatalogError;
use models::{RemoteVideo, StreamDescriptor};

// 远端流目录提供方的统一接口，核心逻辑只通过它访问远端
#[async_trait]
pub trait StreamCatalog: Send + Sync {
    // 解析URL，返回元数据与按源顺序排列的可用流
    async fn resolve(&self, url: &str) -> Result<RemoteVideo, CatalogError>;

    // 拉取指定流的全部字节并写入 dest
    async fn fetch(&self, descriptor: &StreamDescriptor, dest: &Path) -> Result<(), FetchError>;
}
