use std::fmt;

// 视频清晰度，按像素高度排序比较
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution(pub u32);

impl Resolution {
    // 解析 "720p" 或 "720" 形式的清晰度字符串
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().trim_end_matches(['p', 'P']);
        s.parse::<u32>().ok().map(Resolution)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.0)
    }
}

// 流的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Progressive, // 音视频合流
    VideoOnly,   // 仅视频轨
    AudioOnly,   // 仅音频轨
}

// 单个可下载流的描述，从远端目录解析得到后不再变化
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    pub format_id: String,
    // 不透明的取流句柄（提供方给出的媒体直链）
    pub source_url: String,
    // 容器扩展名，如 mp4 / m4a / webm
    pub container: String,
    pub resolution: Option<Resolution>,
    pub fps: Option<f64>,
    pub kind: StreamKind,
}

impl StreamDescriptor {
    pub fn is_progressive(&self) -> bool {
        self.kind == StreamKind::Progressive
    }

    pub fn is_audio_only(&self) -> bool {
        self.kind == StreamKind::AudioOnly
    }

    // 用于展示的清晰度标签
    pub fn quality_label(&self) -> String {
        match (self.resolution, self.fps) {
            (Some(res), Some(fps)) => format!("{} ({}fps)", res, fps.round() as u32),
            (Some(res), None) => res.to_string(),
            _ => "音频".to_string(),
        }
    }
}

// 解析出的远端视频：元数据加上有序的可用流列表
#[derive(Debug, Clone)]
pub struct RemoteVideo {
    pub url: String,
    pub title: String,
    pub author: String,
    pub duration: f64, // 秒
    pub streams: Vec<StreamDescriptor>,
}

impl RemoteVideo {
    // 目标容器内的合流列表，按源顺序
    pub fn progressive_streams(&self, container: &str) -> Vec<&StreamDescriptor> {
        self.streams
            .iter()
            .filter(|s| s.is_progressive() && s.container == container)
            .collect()
    }

    // 可用清晰度标签，供选流失败时向用户展示
    pub fn available_qualities(&self, container: &str) -> Vec<String> {
        self.progressive_streams(container)
            .iter()
            .map(|s| s.quality_label())
            .collect()
    }
}
