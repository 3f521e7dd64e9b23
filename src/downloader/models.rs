use std::path::PathBuf;

use crate::catalog::models::StreamKind;

// 一次下载产生的本地文件；每次 fetch 恰好产出一个
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    pub path: PathBuf,
    pub kind: StreamKind,
}
