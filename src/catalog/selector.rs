use thiserror::Error;

use super::models::{Resolution, StreamDescriptor};

// 清晰度选择策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityPolicy {
    Highest,
    Lowest,
    Exact(Resolution),
    AudioOnly,
}

impl QualityPolicy {
    // 解析命令行的 quality 值；"highest"/"lowest" 之外按具体清晰度处理
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "highest" => Some(Self::Highest),
            "lowest" => Some(Self::Lowest),
            other => Resolution::parse(other).map(Self::Exact),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("没有符合条件的流")]
    NoStreamFound,
}

pub struct StreamSelector;

impl StreamSelector {
    // 按策略从流列表中选择一个流，并列时取先出现者
    pub fn select<'a>(
        streams: &'a [StreamDescriptor],
        policy: &QualityPolicy,
        container: &str,
    ) -> Result<&'a StreamDescriptor, SelectError> {
        // 候选集：目标容器内、清晰度已知的合流
        let eligible = |s: &&StreamDescriptor| {
            s.is_progressive() && s.container == container && s.resolution.is_some()
        };

        match policy {
            QualityPolicy::AudioOnly => streams
                .iter()
                .find(|s| s.is_audio_only())
                .ok_or(SelectError::NoStreamFound),

            QualityPolicy::Exact(res) => streams
                .iter()
                .filter(eligible)
                .find(|s| s.resolution == Some(*res))
                .ok_or(SelectError::NoStreamFound),

            QualityPolicy::Highest | QualityPolicy::Lowest => {
                let mut best: Option<&StreamDescriptor> = None;
                for s in streams.iter().filter(eligible) {
                    let better = match best {
                        None => true,
                        Some(b) => match policy {
                            QualityPolicy::Highest => s.resolution > b.resolution,
                            _ => s.resolution < b.resolution,
                        },
                    };
                    if better {
                        best = Some(s);
                    }
                }
                best.ok_or(SelectError::NoStreamFound)
            }
        }
    }
}
