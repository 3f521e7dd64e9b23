use clap::Parser;
use std::path::PathBuf;

use crate::orchestrator::models::Mode;

/// YouTube视频下载器
#[derive(Parser, Debug)]
#[command(name = "tubedl")]
#[command(version = "1.0")]
#[command(about = "一个简单的YouTube视频下载工具", long_about = None)]
pub struct Cli {
    /// 视频链接
    #[arg(value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: String,

    /// 仅下载MP4视频
    #[arg(long)]
    pub video: bool,

    /// 下载并产出MP3音频
    #[arg(long)]
    pub audio: bool,

    /// 同时下载视频并从中提取音频
    #[arg(long)]
    pub both: bool,

    /// 视频质量
    #[arg(long, value_name = "QUALITY")]
    #[arg(default_value = "highest")]
    #[arg(help = "视频质量: highest, lowest 或具体清晰度如 720p")]
    pub quality: String,

    /// 视频保存目录
    #[arg(long, value_name = "DIR")]
    #[arg(default_value = "./downloads")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub output: PathBuf,
}

impl Cli {
    // 解析模式标志；--video 与 --audio 同时给出时走视频加提取
    // 没有任何模式标志时返回 None，由调用方打印使用指引
    pub fn mode(&self) -> Option<Mode> {
        if self.video {
            Some(Mode::VideoOnly {
                also_extract: self.audio,
            })
        } else if self.audio {
            Some(Mode::AudioOnly)
        } else if self.both {
            Some(Mode::Both)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_mode_flags() {
        let cli = parse(&["tubedl", "https://example.com/v", "--video"]);
        assert_eq!(cli.mode(), Some(Mode::VideoOnly { also_extract: false }));

        let cli = parse(&["tubedl", "https://example.com/v", "--video", "--audio"]);
        assert_eq!(cli.mode(), Some(Mode::VideoOnly { also_extract: true }));

        let cli = parse(&["tubedl", "https://example.com/v", "--audio"]);
        assert_eq!(cli.mode(), Some(Mode::AudioOnly));

        let cli = parse(&["tubedl", "https://example.com/v", "--both"]);
        assert_eq!(cli.mode(), Some(Mode::Both));

        let cli = parse(&["tubedl", "https://example.com/v"]);
        assert_eq!(cli.mode(), None);
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["tubedl", "https://example.com/v", "--video"]);
        assert_eq!(cli.quality, "highest");
        assert_eq!(cli.output, PathBuf::from("./downloads"));
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["tubedl", "--video"]).is_err());
    }
}
